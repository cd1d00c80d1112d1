//! chainview - Terminal Blockchain Explorer
//!
//! A terminal explorer for chains indexed behind a GraphQL API. Pages read
//! from reactive query accessors; live blocks and stats arrive over a
//! `graphql-transport-ws` subscription when a websocket endpoint is set.

pub mod app;
pub mod config;
pub mod events;
pub mod explorer;
pub mod format;
pub mod graphql;
pub mod logging;
pub mod pages;
pub mod query;
pub mod route;
pub mod search;
pub mod store;
pub mod theme;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use app::{App, Endpoints};
pub use config::Config;
pub use explorer::Explorer;
pub use route::Route;
pub use theme::Theme;

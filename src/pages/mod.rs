//! One page per route. Building a page starts its queries; dropping it
//! cancels whatever they still have in flight.

mod detail;
mod home;
mod list;

pub use detail::{AddressDetailPage, BlockDetailPage, TransactionDetailPage, TransactionLink};
pub use home::{HomePage, HomePanel, LATEST_LIMIT};
pub use list::ListPage;

use crate::events::BlockchainEvents;
use crate::explorer::{Explorer, TransactionFilter, DEFAULT_PAGE_SIZE};
use crate::graphql::{Address, Block, Transaction};
use crate::query::NoFilter;
use crate::route::Route;

pub enum Page {
    Home(HomePage),
    Blocks(ListPage<NoFilter, Block>),
    BlockDetail(BlockDetailPage),
    Transactions(ListPage<TransactionFilter, Transaction>),
    TransactionDetail(TransactionDetailPage),
    Addresses(ListPage<NoFilter, Address>),
    AddressDetail(AddressDetailPage),
    NotFound(String),
}

impl Page {
    pub fn open(route: &Route, explorer: &Explorer, events: &BlockchainEvents) -> Self {
        match route {
            Route::Home => Page::Home(HomePage::new(explorer, events)),
            Route::Blocks => Page::Blocks(ListPage::new(explorer.blocks(DEFAULT_PAGE_SIZE, 0))),
            Route::BlockDetail(id) => Page::BlockDetail(BlockDetailPage::new(explorer, id.clone())),
            Route::Transactions => Page::Transactions(ListPage::new(explorer.transactions(
                DEFAULT_PAGE_SIZE,
                0,
                TransactionFilter::default(),
            ))),
            Route::TransactionDetail(hash) => {
                Page::TransactionDetail(TransactionDetailPage::new(explorer, hash.clone()))
            }
            Route::Addresses => Page::Addresses(ListPage::new(explorer.addresses(DEFAULT_PAGE_SIZE, 0))),
            Route::AddressDetail(address) => {
                Page::AddressDetail(AddressDetailPage::new(explorer, address.clone()))
            }
            Route::NotFound(path) => Page::NotFound(path.clone()),
        }
    }

    /// Housekeeping run once per frame.
    pub fn tick(&mut self) {
        if let Page::BlockDetail(page) = self {
            page.sync_transactions();
        }
    }

    pub fn select_next(&mut self) {
        match self {
            Page::Home(page) => page.select_next(),
            Page::Blocks(list) => list.select_next(),
            Page::Transactions(list) => list.select_next(),
            Page::Addresses(list) => list.select_next(),
            Page::BlockDetail(page) => {
                if let Some(list) = &mut page.transactions {
                    list.select_next();
                }
            }
            Page::TransactionDetail(page) => page.select_next(),
            Page::AddressDetail(page) => page.transactions.select_next(),
            Page::NotFound(_) => {}
        }
    }

    pub fn select_prev(&mut self) {
        match self {
            Page::Home(page) => page.select_prev(),
            Page::Blocks(list) => list.select_prev(),
            Page::Transactions(list) => list.select_prev(),
            Page::Addresses(list) => list.select_prev(),
            Page::BlockDetail(page) => {
                if let Some(list) = &mut page.transactions {
                    list.select_prev();
                }
            }
            Page::TransactionDetail(page) => page.select_prev(),
            Page::AddressDetail(page) => page.transactions.select_prev(),
            Page::NotFound(_) => {}
        }
    }

    /// Right arrow: next page of a list, or the next block.
    pub fn next(&mut self) {
        match self {
            Page::Blocks(list) => {
                list.next_page();
            }
            Page::Transactions(list) => {
                list.next_page();
            }
            Page::Addresses(list) => {
                list.next_page();
            }
            Page::BlockDetail(page) => {
                page.next_block();
            }
            Page::AddressDetail(page) => {
                page.transactions.next_page();
            }
            Page::Home(page) => page.toggle_panel(),
            Page::TransactionDetail(_) | Page::NotFound(_) => {}
        }
    }

    pub fn prev(&mut self) {
        match self {
            Page::Blocks(list) => {
                list.prev_page();
            }
            Page::Transactions(list) => {
                list.prev_page();
            }
            Page::Addresses(list) => {
                list.prev_page();
            }
            Page::BlockDetail(page) => {
                page.prev_block();
            }
            Page::AddressDetail(page) => {
                page.transactions.prev_page();
            }
            Page::Home(page) => page.toggle_panel(),
            Page::TransactionDetail(_) | Page::NotFound(_) => {}
        }
    }

    /// Where Enter leads from the current selection.
    pub fn selected_route(&self) -> Option<Route> {
        match self {
            Page::Home(page) => page.selected_route(),
            Page::Blocks(list) => list
                .selected_item()
                .map(|b| Route::BlockDetail(b.number.into())),
            Page::Transactions(list) => list
                .selected_item()
                .map(|t| Route::TransactionDetail(t.hash)),
            Page::Addresses(list) => list
                .selected_item()
                .map(|a| Route::AddressDetail(a.address)),
            Page::BlockDetail(page) => page.selected_route(),
            Page::TransactionDetail(page) => page.selected_route(),
            Page::AddressDetail(page) => page.selected_route(),
            Page::NotFound(_) => Some(Route::Home),
        }
    }

    pub fn refresh(&self) {
        match self {
            Page::Home(page) => page.refresh(),
            Page::Blocks(list) => list.refresh(),
            Page::Transactions(list) => list.refresh(),
            Page::Addresses(list) => list.refresh(),
            Page::BlockDetail(page) => page.refresh(),
            Page::TransactionDetail(page) => page.refresh(),
            Page::AddressDetail(page) => page.refresh(),
            Page::NotFound(_) => {}
        }
    }

    pub fn is_loading(&self) -> bool {
        match self {
            Page::Home(page) => page.is_loading(),
            Page::Blocks(list) => list.is_loading(),
            Page::Transactions(list) => list.is_loading(),
            Page::Addresses(list) => list.is_loading(),
            Page::BlockDetail(page) => page.is_loading(),
            Page::TransactionDetail(page) => page.is_loading(),
            Page::AddressDetail(page) => page.is_loading(),
            Page::NotFound(_) => false,
        }
    }

    /// The error of the page's main query, if any.
    pub fn error(&self) -> Option<String> {
        match self {
            Page::Home(page) => page.displayed_stats().error,
            Page::Blocks(list) => list.state().error,
            Page::Transactions(list) => list.state().error,
            Page::Addresses(list) => list.state().error,
            Page::BlockDetail(page) => page.state().error,
            Page::TransactionDetail(page) => page.state().error,
            Page::AddressDetail(page) => page.state().error,
            Page::NotFound(_) => None,
        }
    }

    /// Waits for every query the page has started.
    pub async fn settled(&self) {
        match self {
            Page::Home(page) => page.settled().await,
            Page::Blocks(list) => {
                list.settled().await;
            }
            Page::Transactions(list) => {
                list.settled().await;
            }
            Page::Addresses(list) => {
                list.settled().await;
            }
            Page::BlockDetail(page) => page.settled().await,
            Page::TransactionDetail(page) => page.settled().await,
            Page::AddressDetail(page) => page.settled().await,
            Page::NotFound(_) => {}
        }
    }
}

//! Dark / light theme shared by every page.

use std::sync::Arc;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                accent: Color::Cyan,
                text: Color::White,
                dim: Color::DarkGray,
                border: Color::Gray,
                highlight_fg: Color::Black,
                highlight_bg: Color::Cyan,
                success: Color::Green,
                warning: Color::Yellow,
                error: Color::Red,
                link: Color::Cyan,
                value: Color::Yellow,
            },
            Theme::Light => Palette {
                accent: Color::Blue,
                text: Color::Black,
                dim: Color::Gray,
                border: Color::DarkGray,
                highlight_fg: Color::White,
                highlight_bg: Color::Blue,
                success: Color::Green,
                warning: Color::Magenta,
                error: Color::Red,
                link: Color::Blue,
                value: Color::Magenta,
            },
        }
    }

    /// Guesses from `COLORFGBG` (`fg;bg`); dark when unknown.
    pub fn from_colorfgbg(value: Option<&str>) -> Self {
        let background = value
            .and_then(|v| v.rsplit(';').next())
            .and_then(|bg| bg.trim().parse::<u8>().ok());
        match background {
            Some(7) | Some(9..=15) => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn system() -> Self {
        Self::from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
    }
}

/// Terminal colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub accent: Color,
    pub text: Color,
    pub dim: Color,
    pub border: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub link: Color,
    pub value: Color,
}

/// The current theme, observable by anyone holding a clone.
#[derive(Debug, Clone)]
pub struct ThemeContext {
    tx: Arc<watch::Sender<Theme>>,
}

impl ThemeContext {
    pub fn new(theme: Theme) -> Self {
        let (tx, _) = watch::channel(theme);
        Self { tx: Arc::new(tx) }
    }

    /// Saved preference first, then the terminal's background.
    pub fn init(saved: Option<Theme>) -> Self {
        Self::new(saved.unwrap_or_else(Theme::system))
    }

    pub fn current(&self) -> Theme {
        *self.tx.borrow()
    }

    pub fn set(&self, theme: Theme) {
        self.tx.send_replace(theme);
    }

    pub fn toggle(&self) -> Theme {
        let next = self.current().toggled();
        self.set(next);
        next
    }

    pub fn subscribe(&self) -> watch::Receiver<Theme> {
        self.tx.subscribe()
    }

    pub fn palette(&self) -> Palette {
        self.current().palette()
    }
}

impl Default for ThemeContext {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use crate::config::{validate_endpoint, Config};
use crate::events::BlockchainEvents;
use crate::explorer::Explorer;
use crate::graphql::GraphqlError;
use crate::pages::Page;
use crate::query::{Sequence, TaskGuard};
use crate::route::Route;
use crate::search::{self, SearchOutcome};
use crate::store::AppStore;
use crate::theme::ThemeContext;

/// Results from background tasks, drained on every tick.
#[derive(Debug)]
pub enum AppMessage {
    SearchFinished { seq: u64, query: String, outcome: SearchOutcome },
}

/// Where to reach the indexer for this session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub http: String,
    pub ws: Option<String>,
}

impl Endpoints {
    /// Command-line values win over the saved config.
    pub fn resolve(http: Option<String>, ws: Option<String>, config: &Config) -> Option<Self> {
        let http = http.or_else(|| config.graphql_endpoint.clone())?;
        let ws = ws
            .or_else(|| config.graphql_ws_endpoint.clone())
            .filter(|s| !s.trim().is_empty());
        Some(Self { http, ws })
    }
}

pub struct App {
    pub config: Config,
    pub explorer: Option<Explorer>,
    pub endpoints: Option<Endpoints>,
    pub route: Route,
    pub page: Option<Page>,
    pub history: Vec<Route>,
    pub search_input: Input,
    pub endpoint_input: Input,
    pub search_focused: bool,
    pub selected_history_index: Option<usize>,
    pub searching: bool,
    pub store: AppStore,
    pub theme: ThemeContext,
    pub events: BlockchainEvents,
    pub should_quit: bool,
    tx: mpsc::UnboundedSender<AppMessage>,
    rx: mpsc::UnboundedReceiver<AppMessage>,
    search_task: Option<TaskGuard>,
    search_seq: Sequence,
}

impl App {
    /// Must run inside a tokio runtime: connecting opens the home page,
    /// which starts its queries.
    pub fn new(config: Config, endpoints: Option<Endpoints>) -> Self {
        let mut app = Self::disconnected(config);
        if let Some(endpoints) = endpoints {
            if let Err(e) = app.connect(endpoints) {
                app.store.set_error(Some(e.to_string()));
            }
        }
        app
    }

    /// An app bound to an existing explorer.
    pub fn with_explorer(config: Config, explorer: Explorer) -> Self {
        let mut app = Self::disconnected(config);
        app.attach(explorer);
        app
    }

    fn disconnected(config: Config) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            theme: ThemeContext::init(config.theme),
            config,
            explorer: None,
            endpoints: None,
            route: Route::Home,
            page: None,
            history: Vec::new(),
            search_input: Input::default(),
            endpoint_input: Input::default(),
            search_focused: false,
            selected_history_index: None,
            searching: false,
            store: AppStore::default(),
            events: BlockchainEvents::new(),
            should_quit: false,
            tx,
            rx,
            search_task: None,
            search_seq: Sequence::default(),
        }
    }

    pub fn connect(&mut self, endpoints: Endpoints) -> Result<(), GraphqlError> {
        let explorer = Explorer::connect(&endpoints.http, endpoints.ws.as_deref())?;
        info!(endpoint = %endpoints.http, ws = ?endpoints.ws, "connected");
        self.endpoints = Some(endpoints);
        self.attach(explorer);
        Ok(())
    }

    fn attach(&mut self, explorer: Explorer) {
        self.route = Route::Home;
        self.history.clear();
        self.page = Some(Page::open(&self.route, &explorer, &self.events));
        self.explorer = Some(explorer);
    }

    pub fn needs_endpoint_setup(&self) -> bool {
        self.explorer.is_none()
    }

    /// Accepts `<http-url> [<ws-url>]` from the setup screen and persists it.
    pub fn submit_endpoint(&mut self) -> Result<(), String> {
        let value = self.endpoint_input.value().trim().to_string();
        let mut parts = value.split_whitespace();
        let Some(http) = parts.next() else {
            return Err("GraphQL endpoint cannot be empty".to_string());
        };
        let ws = parts.next();

        validate_endpoint(http, &["http", "https"]).map_err(|e| format!("{e:#}"))?;
        if let Some(ws) = ws {
            validate_endpoint(ws, &["ws", "wss"]).map_err(|e| format!("{e:#}"))?;
        }

        let endpoints = Endpoints {
            http: http.to_string(),
            ws: ws.map(str::to_string),
        };
        self.connect(endpoints.clone())
            .map_err(|e| format!("Invalid GraphQL endpoint: {e}"))?;

        if let Err(e) = self
            .config
            .set_endpoint(endpoints.http, Some(endpoints.ws.unwrap_or_default()))
        {
            warn!(error = %e, "could not save endpoint");
        }
        self.endpoint_input.reset();
        self.store.clear_error();
        Ok(())
    }

    pub fn is_on_home(&self) -> bool {
        self.route == Route::Home
    }

    /// Opens `route`, remembering the current one. Re-opening the current
    /// route refreshes it instead.
    pub fn navigate_to(&mut self, route: Route) {
        let Some(explorer) = &self.explorer else {
            return;
        };
        if route == self.route {
            if let Some(page) = &self.page {
                page.refresh();
            }
            return;
        }

        info!(from = %self.route, to = %route, "navigate");
        let previous = std::mem::replace(&mut self.route, route);
        self.history.push(previous);
        self.page = Some(Page::open(&self.route, explorer, &self.events));
        self.store.clear_error();
    }

    pub fn go_back(&mut self) {
        match self.history.pop() {
            Some(route) => self.open(route),
            None => self.go_home(),
        }
    }

    pub fn go_home(&mut self) {
        self.history.clear();
        if self.route != Route::Home {
            self.open(Route::Home);
        }
    }

    /// Replaces the current page without touching history.
    fn open(&mut self, route: Route) {
        let Some(explorer) = &self.explorer else {
            return;
        };
        self.route = route;
        self.page = Some(Page::open(&self.route, explorer, &self.events));
        self.store.clear_error();
    }

    pub fn focus_search(&mut self) {
        self.search_focused = true;
        self.selected_history_index = None;
    }

    pub fn blur_search(&mut self) {
        self.search_focused = false;
        self.selected_history_index = None;
    }

    pub fn get_recent_searches(&self) -> &[String] {
        &self.config.recent_searches
    }

    pub fn select_history_prev(&mut self) {
        let len = self.config.recent_searches.len();
        if len == 0 {
            return;
        }
        self.selected_history_index = match self.selected_history_index {
            None => Some(len - 1),
            Some(0) => None,
            Some(i) => Some(i - 1),
        };
    }

    pub fn select_history_next(&mut self) {
        let len = self.config.recent_searches.len();
        if len == 0 {
            return;
        }
        self.selected_history_index = match self.selected_history_index {
            None => Some(0),
            Some(i) if i + 1 >= len => None,
            Some(i) => Some(i + 1),
        };
    }

    pub fn delete_selected_history(&mut self) {
        let Some(idx) = self.selected_history_index else {
            return;
        };
        if idx >= self.config.recent_searches.len() {
            return;
        }
        self.config.recent_searches.remove(idx);
        if let Err(e) = self.config.save() {
            warn!(error = %e, "could not save recent searches");
        }
        let len = self.config.recent_searches.len();
        self.selected_history_index = if len == 0 { None } else { Some(idx.min(len - 1)) };
    }

    /// Starts a search for the selected history entry or the typed text.
    /// A newer search cancels one still in flight.
    pub fn submit_search(&mut self) {
        let query = match self.selected_history_index {
            Some(i) => self.config.recent_searches.get(i).cloned().unwrap_or_default(),
            None => self.search_input.value().trim().to_string(),
        };
        self.selected_history_index = None;

        let Some(explorer) = self.explorer.clone() else {
            return;
        };
        if !query.is_empty() {
            if let Err(e) = self.config.add_recent_search(query.clone()) {
                warn!(error = %e, "could not save recent searches");
            }
        }

        self.searching = true;
        self.store.clear_error();
        let tx = self.tx.clone();
        let seq = self.search_seq.issue();
        self.search_task = Some(TaskGuard::new(tokio::spawn(async move {
            let outcome = search::search(&explorer, &query).await;
            let _ = tx.send(AppMessage::SearchFinished { seq, query, outcome });
        })));
    }

    pub fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::SearchFinished { seq, query, outcome } => {
                // A superseded search may have finished before it was replaced.
                if !self.search_seq.is_latest(seq) {
                    debug!(%query, "discarding stale search result");
                    return;
                }
                self.searching = false;
                self.search_task = None;
                match outcome {
                    SearchOutcome::Navigate(route) => {
                        info!(%query, %route, "search matched");
                        self.search_input.reset();
                        self.blur_search();
                        self.navigate_to(route);
                    }
                    SearchOutcome::Failed(message) => {
                        info!(%query, %message, "search failed");
                        self.store.set_error(Some(message));
                    }
                }
            }
        }
    }

    /// Waits for the latest search, if any, and applies its result.
    pub async fn wait_for_search(&mut self) {
        while self.searching {
            match self.rx.recv().await {
                Some(message) => self.handle_message(message),
                None => break,
            }
        }
    }

    /// Applies background results and mirrors page state into the store.
    pub fn tick(&mut self) {
        while let Ok(message) = self.rx.try_recv() {
            self.handle_message(message);
        }

        let Some(page) = &mut self.page else {
            return;
        };
        page.tick();
        self.store.set_loading(self.searching || page.is_loading());
        if let Page::Home(home) = page {
            if let Some(stats) = home.displayed_stats().data {
                self.store.apply_stats(&stats);
            }
        }
    }

    pub fn toggle_theme(&mut self) {
        let theme = self.theme.toggle();
        if let Err(e) = self.config.set_theme(theme) {
            warn!(error = %e, "could not save theme");
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.needs_endpoint_setup() {
            self.handle_setup_key(key);
        } else if self.search_focused {
            self.handle_search_key(key);
        } else {
            self.handle_page_key(key);
        }
    }

    fn handle_setup_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                if let Err(e) = self.submit_endpoint() {
                    self.store.set_error(Some(e));
                }
            }
            KeyCode::Esc => self.should_quit = true,
            _ => {
                self.endpoint_input.handle_event(&Event::Key(key));
            }
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_search(),
            KeyCode::Esc => self.blur_search(),
            KeyCode::Up => self.select_history_prev(),
            KeyCode::Down => self.select_history_next(),
            KeyCode::Delete if self.selected_history_index.is_some() => {
                self.delete_selected_history();
            }
            _ => {
                self.selected_history_index = None;
                self.search_input.handle_event(&Event::Key(key));
            }
        }
    }

    fn handle_page_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('k') if ctrl => self.focus_search(),
            KeyCode::Char('/') => self.focus_search(),
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('H') => self.go_home(),
            KeyCode::Char('B') => self.navigate_to(Route::Blocks),
            KeyCode::Char('T') => self.navigate_to(Route::Transactions),
            KeyCode::Char('A') => self.navigate_to(Route::Addresses),
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Char('r') => {
                if let Some(page) = &self.page {
                    page.refresh();
                }
            }
            KeyCode::Backspace | KeyCode::Char('b') => self.go_back(),
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(page) = &mut self.page {
                    page.select_prev();
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(page) = &mut self.page {
                    page.select_next();
                }
            }
            KeyCode::Left => {
                if let Some(page) = &mut self.page {
                    page.prev();
                }
            }
            KeyCode::Right | KeyCode::Tab => {
                if let Some(page) = &mut self.page {
                    page.next();
                }
            }
            KeyCode::Enter => {
                if let Some(route) = self.page.as_ref().and_then(Page::selected_route) {
                    self.navigate_to(route);
                }
            }
            _ => {}
        }
    }
}

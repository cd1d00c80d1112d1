use tokio::sync::watch;
use tracing::debug;

use crate::events::BlockchainEvents;
use crate::explorer::{Explorer, TransactionFilter};
use crate::graphql::{Block, Stats, Transaction, UserGrowth};
use crate::query::{DetailQuery, DetailState, ListQuery, ListState, LiveQuery, NoFilter, Refetch, TaskGuard};
use crate::route::Route;

pub const LATEST_LIMIT: u32 = 10;

/// Which of the two "latest" tables has the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HomePanel {
    #[default]
    Blocks,
    Transactions,
}

pub struct HomePage {
    pub stats: DetailQuery<(), Stats>,
    pub live_stats: LiveQuery<Stats>,
    pub blocks: ListQuery<NoFilter, Block>,
    pub transactions: ListQuery<TransactionFilter, Transaction>,
    pub user_growth: DetailQuery<(), UserGrowth>,
    pub live_blocks: LiveQuery<Block>,
    pub panel: HomePanel,
    pub selected: usize,
    _relay: Option<TaskGuard>,
    _refresh: TaskGuard,
}

impl HomePage {
    pub fn new(explorer: &Explorer, events: &BlockchainEvents) -> Self {
        let blocks = explorer.blocks(LATEST_LIMIT, 0);
        let transactions = explorer.transactions(LATEST_LIMIT, 0, TransactionFilter::default());
        let live_blocks = explorer.live_blocks();

        let relay = live_blocks
            .is_active()
            .then(|| TaskGuard::new(tokio::spawn(relay_new_blocks(live_blocks.subscribe(), events.clone()))));
        let refresh = TaskGuard::new(tokio::spawn(refresh_on_new_block(
            events.subscribe(),
            blocks.clone(),
            transactions.clone(),
        )));

        Self {
            stats: explorer.stats(),
            live_stats: explorer.live_stats(),
            blocks,
            transactions,
            user_growth: explorer.user_growth(),
            live_blocks,
            panel: HomePanel::default(),
            selected: 0,
            _relay: relay,
            _refresh: refresh,
        }
    }

    /// Pushed stats win over the last query result.
    pub fn displayed_stats(&self) -> DetailState<Stats> {
        let mut state = self.stats.state();
        if let Some(live) = self.live_stats.latest() {
            state.data = Some(live);
            state.error = None;
        }
        state
    }

    pub fn latest_blocks(&self) -> ListState<Block> {
        self.blocks.state()
    }

    pub fn latest_transactions(&self) -> ListState<Transaction> {
        self.transactions.state()
    }

    pub fn toggle_panel(&mut self) {
        self.panel = match self.panel {
            HomePanel::Blocks => HomePanel::Transactions,
            HomePanel::Transactions => HomePanel::Blocks,
        };
        self.selected = 0;
    }

    fn panel_len(&self) -> usize {
        match self.panel {
            HomePanel::Blocks => self.blocks.state().items.len(),
            HomePanel::Transactions => self.transactions.state().items.len(),
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.panel_len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_route(&self) -> Option<Route> {
        match self.panel {
            HomePanel::Blocks => self
                .blocks
                .state()
                .items
                .get(self.selected)
                .map(|b| Route::BlockDetail(b.number.into())),
            HomePanel::Transactions => self
                .transactions
                .state()
                .items
                .get(self.selected)
                .map(|t| Route::TransactionDetail(t.hash.clone())),
        }
    }

    pub fn refresh(&self) {
        self.stats.spawn_refetch();
        self.user_growth.spawn_refetch();
        self.blocks.spawn_refetch(Refetch::default());
        self.transactions.spawn_refetch(Refetch::default());
    }

    pub fn is_loading(&self) -> bool {
        self.stats.state().loading || self.blocks.state().loading || self.transactions.state().loading
    }

    pub async fn settled(&self) {
        self.stats.settled().await;
        self.user_growth.settled().await;
        self.blocks.settled().await;
        self.transactions.settled().await;
    }
}

async fn relay_new_blocks(mut live: watch::Receiver<Option<Block>>, events: BlockchainEvents) {
    while live.changed().await.is_ok() {
        let number = live.borrow_and_update().as_ref().map(|b| b.number);
        if let Some(number) = number {
            debug!(number, "new block pushed");
            events.trigger_new_block();
        }
    }
}

async fn refresh_on_new_block(
    mut ticks: watch::Receiver<u64>,
    blocks: ListQuery<NoFilter, Block>,
    transactions: ListQuery<TransactionFilter, Transaction>,
) {
    while ticks.changed().await.is_ok() {
        ticks.borrow_and_update();
        blocks.spawn_refetch(Refetch::default());
        transactions.spawn_refetch(Refetch::default());
    }
}

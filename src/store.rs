use crate::graphql::Stats;

/// Coarse application state shown in the status bar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppStore {
    pub is_loading: bool,
    pub error: Option<String>,
    pub latest_block_number: u64,
    pub total_blocks: u64,
    pub total_transactions: u64,
}

impl AppStore {
    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    pub fn update_stats(&mut self, latest_block_number: u64, total_blocks: u64, total_transactions: u64) {
        self.latest_block_number = latest_block_number;
        self.total_blocks = total_blocks;
        self.total_transactions = total_transactions;
    }

    /// Blocks are numbered from zero, so the count is one past the height.
    pub fn apply_stats(&mut self, stats: &Stats) {
        self.update_stats(
            stats.current_block_height,
            stats.current_block_height.saturating_add(1),
            stats.total_transactions,
        );
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

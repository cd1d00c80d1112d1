use std::sync::Arc;

use tokio::sync::watch;

/// Process-wide "a new block arrived" signal.
///
/// The counter only ever grows; observers react to it changing.
#[derive(Debug, Clone)]
pub struct BlockchainEvents {
    tx: Arc<watch::Sender<u64>>,
}

impl BlockchainEvents {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(0);
        Self { tx: Arc::new(tx) }
    }

    pub fn trigger_new_block(&self) {
        self.tx.send_modify(|n| *n += 1);
    }

    pub fn current(&self) -> u64 {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}

impl Default for BlockchainEvents {
    fn default() -> Self {
        Self::new()
    }
}

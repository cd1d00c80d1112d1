use tokio::sync::watch;

use super::list::ListPage;
use crate::explorer::{BlockId, Explorer, TransactionFilter, DEFAULT_PAGE_SIZE};
use crate::graphql::{AddressDetail, BlockDetail, Transaction, TransactionDetail};
use crate::query::{fixed_key, DetailQuery, DetailState};
use crate::route::Route;

/// A block with its transactions. Previous/next navigation changes the
/// identifier in place instead of opening a new page.
pub struct BlockDetailPage {
    id: watch::Sender<BlockId>,
    pub detail: DetailQuery<BlockId, BlockDetail>,
    /// Created once the block number is known, then re-filtered per block.
    pub transactions: Option<ListPage<TransactionFilter, Transaction>>,
    explorer: Explorer,
    listed_block: Option<u64>,
}

impl BlockDetailPage {
    pub fn new(explorer: &Explorer, id: BlockId) -> Self {
        let (tx, rx) = watch::channel(id);
        Self {
            id: tx,
            detail: explorer.block_detail(rx),
            transactions: None,
            explorer: explorer.clone(),
            listed_block: None,
        }
    }

    pub fn id(&self) -> BlockId {
        self.id.borrow().clone()
    }

    pub fn state(&self) -> DetailState<BlockDetail> {
        self.detail.state()
    }

    /// The requested number. A hash identifier only has one once its
    /// block has loaded.
    pub fn block_number(&self) -> Option<u64> {
        match self.id() {
            BlockId::Number(n) => Some(n),
            BlockId::Hash(_) => self.detail.state().data.map(|b| b.number),
        }
    }

    pub fn set_id(&mut self, id: BlockId) {
        self.id.send_if_modified(|current| {
            if *current == id {
                return false;
            }
            *current = id;
            true
        });
    }

    pub fn next_block(&mut self) -> bool {
        match self.block_number() {
            Some(n) => {
                self.set_id(BlockId::Number(n.saturating_add(1)));
                true
            }
            None => false,
        }
    }

    pub fn prev_block(&mut self) -> bool {
        match self.block_number() {
            Some(n) if n > 0 => {
                self.set_id(BlockId::Number(n - 1));
                true
            }
            _ => false,
        }
    }

    /// Points the transaction list at the loaded block.
    pub fn sync_transactions(&mut self) {
        let Some(number) = self.detail.state().data.map(|b| b.number) else {
            return;
        };
        if self.listed_block == Some(number) {
            return;
        }
        self.listed_block = Some(number);
        match &mut self.transactions {
            Some(list) => list.set_filter(TransactionFilter::block(number)),
            None => {
                self.transactions = Some(ListPage::new(self.explorer.transactions(
                    DEFAULT_PAGE_SIZE,
                    0,
                    TransactionFilter::block(number),
                )));
            }
        }
    }

    pub fn selected_route(&self) -> Option<Route> {
        self.transactions
            .as_ref()
            .and_then(|list| list.selected_item())
            .map(|tx| Route::TransactionDetail(tx.hash))
    }

    pub fn refresh(&self) {
        self.detail.spawn_refetch();
        if let Some(list) = &self.transactions {
            list.refresh();
        }
    }

    pub fn is_loading(&self) -> bool {
        self.detail.state().loading || self.transactions.as_ref().is_some_and(|l| l.is_loading())
    }

    pub async fn settled(&self) {
        self.detail.settled().await;
        if let Some(list) = &self.transactions {
            list.settled().await;
        }
    }
}

/// Navigable fields of a transaction, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionLink {
    Block,
    From,
    To,
    Contract,
}

pub struct TransactionDetailPage {
    pub detail: DetailQuery<String, TransactionDetail>,
    pub selected: usize,
}

impl TransactionDetailPage {
    pub fn new(explorer: &Explorer, hash: String) -> Self {
        Self {
            detail: explorer.transaction_detail(fixed_key(hash)),
            selected: 0,
        }
    }

    pub fn state(&self) -> DetailState<TransactionDetail> {
        self.detail.state()
    }

    pub fn links(&self) -> Vec<(TransactionLink, Route)> {
        let Some(tx) = self.detail.state().data else {
            return Vec::new();
        };
        let mut links = vec![(TransactionLink::Block, Route::BlockDetail(tx.block_number.into()))];
        if let Some(from) = tx.from_address {
            links.push((TransactionLink::From, Route::AddressDetail(from)));
        }
        if let Some(to) = tx.to_address {
            links.push((TransactionLink::To, Route::AddressDetail(to)));
        }
        if let Some(contract) = tx.contract_address {
            links.push((TransactionLink::Contract, Route::AddressDetail(contract)));
        }
        links
    }

    pub fn selected_link(&self) -> Option<TransactionLink> {
        self.links().get(self.selected).map(|(link, _)| *link)
    }

    /// Wraps around like the link cursor on the other detail pages.
    pub fn select_next(&mut self) {
        let len = self.links().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_prev(&mut self) {
        let len = self.links().len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    pub fn selected_route(&self) -> Option<Route> {
        self.links().into_iter().nth(self.selected).map(|(_, route)| route)
    }

    pub fn refresh(&self) {
        self.detail.spawn_refetch();
    }

    pub fn is_loading(&self) -> bool {
        self.detail.state().loading
    }

    pub async fn settled(&self) {
        self.detail.settled().await;
    }
}

/// An address summary with every transaction it took part in.
pub struct AddressDetailPage {
    pub detail: DetailQuery<String, AddressDetail>,
    pub transactions: ListPage<TransactionFilter, Transaction>,
}

impl AddressDetailPage {
    pub fn new(explorer: &Explorer, address: String) -> Self {
        Self {
            transactions: ListPage::new(explorer.transactions(
                DEFAULT_PAGE_SIZE,
                0,
                TransactionFilter::address(address.clone()),
            )),
            detail: explorer.address_detail(fixed_key(address)),
        }
    }

    pub fn address(&self) -> String {
        self.detail.key()
    }

    pub fn state(&self) -> DetailState<AddressDetail> {
        self.detail.state()
    }

    pub fn selected_route(&self) -> Option<Route> {
        self.transactions
            .selected_item()
            .map(|tx| Route::TransactionDetail(tx.hash))
    }

    pub fn refresh(&self) {
        self.detail.spawn_refetch();
        self.transactions.refresh();
    }

    pub fn is_loading(&self) -> bool {
        self.detail.state().loading || self.transactions.is_loading()
    }

    pub async fn settled(&self) {
        self.detail.settled().await;
        self.transactions.settled().await;
    }
}

use crate::format::page_count;
use crate::query::{ListFilter, ListQuery, ListState, Refetch};

/// A paginated table with a cursor.
///
/// Pages are 1-based; the cursor resets whenever the page changes.
pub struct ListPage<F, T> {
    query: ListQuery<F, T>,
    page: u32,
    page_size: u32,
    pub selected: usize,
}

impl<F, T> ListPage<F, T>
where
    F: ListFilter,
    T: Clone + Send + Sync + 'static,
{
    pub fn new(query: ListQuery<F, T>) -> Self {
        let request = query.request();
        let page_size = request.limit.max(1);
        Self {
            query,
            page: request.offset / page_size + 1,
            page_size,
            selected: 0,
        }
    }

    pub fn state(&self) -> ListState<T> {
        self.query.state()
    }

    pub fn current_page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total_pages(&self) -> u32 {
        page_count(self.query.state().total_count, self.page_size)
    }

    /// Jumps to `page`, clamped to the known range. Returns whether a
    /// refetch was issued.
    pub fn go_to_page(&mut self, page: u32) -> bool {
        let page = page.clamp(1, self.total_pages());
        if page == self.page {
            return false;
        }
        self.page = page;
        self.selected = 0;
        self.query
            .spawn_refetch(Refetch::page(self.page_size, page_offset(page, self.page_size)));
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.page.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> bool {
        self.go_to_page(self.page.saturating_sub(1))
    }

    /// Swaps the filter and goes back to the first page.
    pub fn set_filter(&mut self, filter: F) {
        self.page = 1;
        self.selected = 0;
        self.query.spawn_refetch(Refetch {
            offset: Some(0),
            filter: Some(filter),
            ..Refetch::default()
        });
    }

    pub fn refresh(&self) {
        self.query.spawn_refetch(Refetch::default());
    }

    pub fn select_next(&mut self) {
        let len = self.query.state().items.len();
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_item(&self) -> Option<T> {
        self.query.state().items.get(self.selected).cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.query.state().loading
    }

    pub async fn settled(&self) -> ListState<T> {
        self.query.settled().await
    }
}

/// Offset of the first row of 1-based `page`, saturating at `u32::MAX`.
fn page_offset(page: u32, page_size: u32) -> u32 {
    let offset = u64::from(page.saturating_sub(1)) * u64::from(page_size);
    u32::try_from(offset).unwrap_or(u32::MAX)
}

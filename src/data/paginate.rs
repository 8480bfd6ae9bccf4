use super::model::{Dataset, Record};

/// Rows per page of the records table.
pub const PAGE_SIZE: usize = 50;

// ---------------------------------------------------------------------------
// Page position
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub page_size: usize,
    /// 1-based.
    pub current_page: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            current_page: 1,
        }
    }
}

impl PageState {
    /// Number of pages needed for `total` rows; never less than 1.
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.page_size.max(1)).max(1)
    }

    /// Clamp `page` into `[1, total_pages]` and store it.
    pub fn go_to(&mut self, page: usize, total: usize) {
        self.current_page = page.clamp(1, self.total_pages(total));
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }
}

/// One slice of the filtered view.
#[derive(Debug, Clone)]
pub struct Page<'a> {
    pub items: Vec<&'a Record>,
    pub current_page: usize,
    pub total_pages: usize,
    /// Size of the whole filtered view.
    pub total_count: usize,
}

/// Slice the filtered view (`indices` into `dataset`) at the page position,
/// clamping the position first.
pub fn paginate<'a>(dataset: &'a Dataset, indices: &[usize], state: PageState) -> Page<'a> {
    let total_count = indices.len();
    let total_pages = state.total_pages(total_count);
    let current_page = state.current_page.clamp(1, total_pages);

    let size = state.page_size.max(1);
    let start = ((current_page - 1) * size).min(total_count);
    let end = (start + size).min(total_count);

    let items = indices[start..end]
        .iter()
        .filter_map(|&i| dataset.get(i))
        .collect();

    Page {
        items,
        current_page,
        total_pages,
        total_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(n: usize) -> Dataset {
        Dataset::from_records(
            (0..n)
                .map(|i| Record {
                    url: format!("https://example.com/{i}"),
                    ..Default::default()
                })
                .collect(),
        )
    }

    #[test]
    fn test_total_pages() {
        let state = PageState::default();
        assert_eq!(state.total_pages(0), 1);
        assert_eq!(state.total_pages(50), 1);
        assert_eq!(state.total_pages(51), 2);
        assert_eq!(state.total_pages(120), 3);
    }

    #[test]
    fn test_slices_pages() {
        let ds = dataset(120);
        let indices: Vec<usize> = (0..120).collect();

        let page = paginate(&ds, &indices, PageState { page_size: 50, current_page: 3 });
        assert_eq!(page.items.len(), 20);
        assert_eq!(page.items[0].url, "https://example.com/100");
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_count, 120);
    }

    #[test]
    fn test_out_of_range_page_is_clamped() {
        let ds = dataset(60);
        let indices: Vec<usize> = (0..60).step_by(2).collect();
        let page = paginate(&ds, &indices, PageState { page_size: 10, current_page: 9 });
        assert_eq!(page.current_page, 3);
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.items[0].url, "https://example.com/40");

        let page = paginate(&ds, &indices, PageState { page_size: 10, current_page: 0 });
        assert_eq!(page.current_page, 1);
    }

    #[test]
    fn test_empty_view_is_single_empty_page() {
        let ds = dataset(5);
        let page = paginate(&ds, &[], PageState::default());
        assert!(page.items.is_empty());
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_count, 0);
    }

    #[test]
    fn test_go_to_clamps() {
        let mut state = PageState::default();
        state.go_to(7, 120);
        assert_eq!(state.current_page, 3);
        state.go_to(0, 120);
        assert_eq!(state.current_page, 1);
    }
}

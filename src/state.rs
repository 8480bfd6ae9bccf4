use crate::data::aggregate::{Aggregates, FrequencyTable, PriorityMatrix, SummaryStats};
use crate::data::filter::{filtered_indices, FilterState, RecommendationFilter};
use crate::data::model::{Dataset, Priority};
use crate::data::paginate::{paginate, Page, PageState};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full dashboard state, independent of rendering.
///
/// Owns the dataset and every view derived from it. Mutators recompute
/// eagerly, so getters are plain reads.
pub struct AppState {
    /// Loaded dataset (None until user loads a file). Only replaced through
    /// `set_dataset`, which keeps the derived views in step.
    dataset: Option<Dataset>,

    /// Whole-dataset tables, computed once per dataset.
    aggregates: Aggregates,

    filters: FilterState,

    page: PageState,

    /// Indices of records passing the current filters (cached).
    visible_indices: Vec<usize>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            aggregates: Aggregates::compute(&Dataset::default()),
            filters: FilterState::default(),
            page: PageState::default(),
            visible_indices: Vec::new(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset: compute aggregates, reset filters and paging.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.aggregates = Aggregates::compute(&dataset);
        self.filters = FilterState::default();
        self.page = PageState::default();
        self.visible_indices = (0..dataset.len()).collect();

        log::info!(
            "Dataset ready: {} records, {} schema types, {} recommended schemas",
            dataset.len(),
            self.aggregates.schema_frequency.len(),
            self.aggregates.priority_matrix.len()
        );

        self.dataset = Some(dataset);
        self.status_message = None;
    }

    // -- Getters --

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn summary_stats(&self) -> &SummaryStats {
        &self.aggregates.summary
    }

    pub fn schema_frequency(&self) -> &FrequencyTable {
        &self.aggregates.schema_frequency
    }

    pub fn page_type_frequency(&self) -> &FrequencyTable {
        &self.aggregates.page_type_frequency
    }

    pub fn priority_matrix(&self) -> &PriorityMatrix {
        &self.aggregates.priority_matrix
    }

    /// `"All"` followed by the sorted schema types.
    pub fn schema_catalog(&self) -> &[String] {
        &self.aggregates.schema_catalog
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn visible_count(&self) -> usize {
        self.visible_indices.len()
    }

    /// The current page of the filtered view.
    pub fn current_page(&self) -> Page<'_> {
        match &self.dataset {
            Some(ds) => paginate(ds, &self.visible_indices, self.page),
            None => Page {
                items: Vec::new(),
                current_page: 1,
                total_pages: 1,
                total_count: 0,
            },
        }
    }

    // -- Filter mutators (each one resets paging) --

    pub fn set_search_term(&mut self, text: &str) {
        self.filters.search_term = text.to_string();
        self.refilter();
    }

    pub fn set_schema_type_filter(&mut self, name: &str) {
        self.filters.schema_type = name.to_string();
        self.refilter();
    }

    /// Cross-filter from a priority chart selection; replaces any previous one.
    pub fn set_recommendation_filter(&mut self, schema: &str, priority: Priority) {
        self.filters.recommendation = Some(RecommendationFilter {
            schema: schema.to_string(),
            priority,
        });
        self.refilter();
    }

    pub fn clear_recommendation_filter(&mut self) {
        self.filters.recommendation = None;
        self.refilter();
    }

    /// Recompute `visible_indices` after filter change and go back to page 1.
    fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(ds, &self.filters);
        }
        self.page.reset();
        log::debug!(
            "Filters {:?} -> {} visible records",
            self.filters,
            self.visible_indices.len()
        );
    }

    // -- Page navigation --

    pub fn go_to_page(&mut self, page: usize) {
        self.page.go_to(page, self.visible_indices.len());
        log::debug!("Page {}", self.page.current_page);
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.page.current_page.saturating_add(1));
    }

    pub fn previous_page(&mut self) {
        self.go_to_page(self.page.current_page.saturating_sub(1));
    }
}

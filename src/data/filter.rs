use super::model::{Dataset, Priority, Record};
use super::tokens::{parse_multi_value, parse_priority_tokens};

/// Catch-all entry of the schema-type selector.
pub const ALL_SCHEMAS: &str = "All";

// ---------------------------------------------------------------------------
// Filter predicate: search text, schema type and chart cross-filter
// ---------------------------------------------------------------------------

/// Cross-filter set by selecting a segment of the priority chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationFilter {
    pub schema: String,
    pub priority: Priority,
}

/// User-selected filter state. All active predicates must hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// Case-insensitive substring of the URL; empty matches everything.
    pub search_term: String,
    /// `"All"` or a schema catalog entry.
    pub schema_type: String,
    /// At most one active cross-filter.
    pub recommendation: Option<RecommendationFilter>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            schema_type: ALL_SCHEMAS.to_string(),
            recommendation: None,
        }
    }
}

impl FilterState {
    /// Whether no predicate narrows the view.
    pub fn is_unfiltered(&self) -> bool {
        self.search_term.is_empty() && self.schema_type == ALL_SCHEMAS && self.recommendation.is_none()
    }
}

/// Whether a record passes every active filter.
///
/// A record passes when:
/// * its URL contains the search term, ignoring case
/// * the schema type is `"All"`, or one of its `schema_types_found` tokens
///   equals it exactly
/// * no cross-filter is set, or one of its recommendation tokens has the same
///   schema and priority
pub fn matches(record: &Record, filters: &FilterState) -> bool {
    if !contains_case_insensitive(&record.url, &filters.search_term) {
        return false;
    }

    if filters.schema_type != ALL_SCHEMAS
        && !parse_multi_value(&record.schema_types_found).contains(&filters.schema_type.as_str())
    {
        return false;
    }

    match &filters.recommendation {
        None => true,
        Some(wanted) => parse_priority_tokens(&record.recommendation_priority)
            .iter()
            .any(|t| t.schema == wanted.schema && t.priority == wanted.priority),
    }
}

fn contains_case_insensitive(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Return indices of records that pass all active filters, in dataset order.
pub fn filtered_indices(dataset: &Dataset, filters: &FilterState) -> Vec<usize> {
    if filters.is_unfiltered() {
        return (0..dataset.len()).collect();
    }
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, record)| matches(record, filters))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(url: &str, schemas: &str, priorities: &str) -> Record {
        Record {
            url: url.to_string(),
            schema_types_found: schemas.to_string(),
            recommendation_priority: priorities.to_string(),
            ..Default::default()
        }
    }

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            record("https://shop.example/Pricing", "WebPage, Product", "FAQPage(High)"),
            record("https://shop.example/blog/faq", "Article, FAQPage", "Review(Low)"),
            record("https://docs.example/start", "WebPage", "FAQPage(Medium), Review(High)"),
            record("https://shop.example/about", "Unknown", ""),
        ])
    }

    #[test]
    fn test_default_filters_keep_everything_in_order() {
        let ds = dataset();
        assert_eq!(filtered_indices(&ds, &FilterState::default()), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let ds = dataset();
        let filters = FilterState {
            search_term: "SHOP.example".into(),
            ..Default::default()
        };
        assert_eq!(filtered_indices(&ds, &filters), vec![0, 1, 3]);

        let filters = FilterState {
            search_term: "pricing".into(),
            ..Default::default()
        };
        assert_eq!(filtered_indices(&ds, &filters), vec![0]);
    }

    #[test]
    fn test_schema_type_matches_exact_token() {
        let ds = dataset();
        let filters = FilterState {
            schema_type: "WebPage".into(),
            ..Default::default()
        };
        assert_eq!(filtered_indices(&ds, &filters), vec![0, 2]);

        let filters = FilterState {
            schema_type: "Web".into(),
            ..Default::default()
        };
        assert!(filtered_indices(&ds, &filters).is_empty());
    }

    #[test]
    fn test_recommendation_cross_filter() {
        let ds = dataset();
        let filters = FilterState {
            recommendation: Some(RecommendationFilter {
                schema: "FAQPage".into(),
                priority: Priority::High,
            }),
            ..Default::default()
        };
        assert_eq!(filtered_indices(&ds, &filters), vec![0]);
    }

    #[test]
    fn test_predicates_are_combined() {
        let ds = dataset();
        let filters = FilterState {
            search_term: "example".into(),
            schema_type: "WebPage".into(),
            recommendation: Some(RecommendationFilter {
                schema: "Review".into(),
                priority: Priority::High,
            }),
        };
        assert_eq!(filtered_indices(&ds, &filters), vec![2]);
    }
}

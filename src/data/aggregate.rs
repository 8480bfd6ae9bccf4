use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use super::filter::ALL_SCHEMAS;
use super::model::{Dataset, Priority, Record};
use super::tokens::{is_sentinel, parse_multi_value, parse_priority_tokens};

/// Bucket for records without a page type; never shown in the page-type table.
pub const UNCATEGORIZED: &str = "Uncategorized";

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryStats {
    pub total_count: usize,
    /// Mean completeness score rounded to one decimal; `None` when there are
    /// no records to average.
    pub average_score: Option<f64>,
    pub review_count: usize,
    pub faq_count: usize,
}

pub fn summary_stats(records: &[Record]) -> SummaryStats {
    let total_count = records.len();
    let average_score = if total_count == 0 {
        None
    } else {
        let sum: f64 = records.iter().map(|r| r.schema_completeness_score).sum();
        Some(round1(sum / total_count as f64))
    };

    SummaryStats {
        total_count,
        average_score,
        review_count: records.iter().filter(|r| r.has_reviews).count(),
        faq_count: records.iter().filter(|r| r.has_faq).count(),
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Frequency tables
// ---------------------------------------------------------------------------

/// `(name, count)` rows sorted by count descending, ties in first-seen order.
pub type FrequencyTable = Vec<(String, usize)>;

/// Counter that remembers the order in which keys were first seen.
#[derive(Default)]
struct FirstSeenCounter<V> {
    index: HashMap<String, usize>,
    rows: Vec<(String, V)>,
}

impl<V: Default> FirstSeenCounter<V> {
    fn entry(&mut self, key: &str) -> &mut V {
        let slot = match self.index.get(key) {
            Some(&slot) => slot,
            None => {
                self.index.insert(key.to_string(), self.rows.len());
                self.rows.push((key.to_string(), V::default()));
                self.rows.len() - 1
            }
        };
        &mut self.rows[slot].1
    }

    /// Stable sort keeps first-seen order among equal keys.
    fn into_sorted_by<K: Ord>(mut self, key: impl Fn(&V) -> K) -> Vec<(String, V)> {
        self.rows.sort_by(|a, b| key(&b.1).cmp(&key(&a.1)));
        self.rows
    }
}

/// Count non-sentinel `schema_types_found` tokens across all records.
pub fn schema_frequency(records: &[Record]) -> FrequencyTable {
    let mut counter = FirstSeenCounter::<usize>::default();
    for record in records {
        for token in parse_multi_value(&record.schema_types_found) {
            if !is_sentinel(token) {
                *counter.entry(token) += 1;
            }
        }
    }
    counter.into_sorted_by(|count| *count)
}

/// Count records per page type, leaving out the uncategorized bucket.
pub fn page_type_frequency(records: &[Record]) -> FrequencyTable {
    let mut counter = FirstSeenCounter::<usize>::default();
    for record in records {
        let key = record.page_type.as_deref().unwrap_or(UNCATEGORIZED);
        if key != UNCATEGORIZED {
            *counter.entry(key) += 1;
        }
    }
    counter.into_sorted_by(|count| *count)
}

// ---------------------------------------------------------------------------
// Priority matrix
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl PriorityCounts {
    pub fn get(&self, priority: Priority) -> usize {
        match priority {
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }

    fn bump(&mut self, priority: Priority) {
        match priority {
            Priority::High => self.high += 1,
            Priority::Medium => self.medium += 1,
            Priority::Low => self.low += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriorityRow {
    pub schema: String,
    pub counts: PriorityCounts,
}

impl PriorityRow {
    /// Priority of the stacked segment at height `value`, stacking High at
    /// the bottom, then Medium, then Low.
    pub fn segment_at(&self, value: f64) -> Option<Priority> {
        if value.is_nan() || value < 0.0 {
            return None;
        }
        let mut top = 0.0;
        for priority in Priority::ALL {
            let count = self.counts.get(priority);
            if count == 0 {
                continue;
            }
            top += count as f64;
            if value < top {
                return Some(priority);
            }
        }
        None
    }
}

/// Rows sorted by total descending, ties in first-seen order.
pub type PriorityMatrix = Vec<PriorityRow>;

pub fn priority_matrix(records: &[Record]) -> PriorityMatrix {
    let mut counter = FirstSeenCounter::<PriorityCounts>::default();
    for record in records {
        for token in parse_priority_tokens(&record.recommendation_priority) {
            counter.entry(&token.schema).bump(token.priority);
        }
    }
    counter
        .into_sorted_by(PriorityCounts::total)
        .into_iter()
        .map(|(schema, counts)| PriorityRow { schema, counts })
        .collect()
}

// ---------------------------------------------------------------------------
// Schema catalog
// ---------------------------------------------------------------------------

/// `"All"` followed by every distinct non-sentinel schema token, ascending.
pub fn schema_catalog(records: &[Record]) -> Vec<String> {
    let distinct: BTreeSet<&str> = records
        .iter()
        .flat_map(|r| parse_multi_value(&r.schema_types_found))
        .filter(|t| !is_sentinel(t) && *t != ALL_SCHEMAS)
        .collect();

    std::iter::once(ALL_SCHEMAS)
        .chain(distinct)
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Cached aggregates
// ---------------------------------------------------------------------------

/// Everything derived from the whole dataset. Independent of filter state,
/// so it is computed once per loaded dataset.
#[derive(Debug, Clone, Default)]
pub struct Aggregates {
    pub summary: SummaryStats,
    pub schema_frequency: FrequencyTable,
    pub page_type_frequency: FrequencyTable,
    pub priority_matrix: PriorityMatrix,
    pub schema_catalog: Vec<String>,
}

impl Aggregates {
    pub fn compute(dataset: &Dataset) -> Self {
        let records = dataset.records();
        Aggregates {
            summary: summary_stats(records),
            schema_frequency: schema_frequency(records),
            page_type_frequency: page_type_frequency(records),
            priority_matrix: priority_matrix(records),
            schema_catalog: schema_catalog(records),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn record(schemas: &str, page_type: Option<&str>, priorities: &str, score: f64) -> Record {
        Record {
            url: format!("https://example.com/{schemas}"),
            page_type: page_type.map(str::to_string),
            schema_types_found: schemas.to_string(),
            recommendation_priority: priorities.to_string(),
            schema_completeness_score: score,
            ..Default::default()
        }
    }

    #[test]
    fn test_average_score_rounds_to_one_decimal() {
        let records = vec![
            record("", None, "", 80.0),
            record("", None, "", 50.0),
            record("", None, "", 30.0),
        ];
        let stats = summary_stats(&records);
        assert_eq!(stats.total_count, 3);
        assert_relative_eq!(stats.average_score.unwrap(), 53.3);
    }

    #[test]
    fn test_empty_dataset_has_no_average() {
        let stats = summary_stats(&[]);
        assert_eq!(stats.total_count, 0);
        assert_eq!(stats.average_score, None);
        assert_eq!(stats.review_count, 0);
    }

    #[test]
    fn test_review_and_faq_counts() {
        let mut a = record("", None, "", 10.0);
        a.has_reviews = true;
        let mut b = record("", None, "", 10.0);
        b.has_reviews = true;
        b.has_faq = true;
        let stats = summary_stats(&[a, b, record("", None, "", 0.0)]);
        assert_eq!(stats.review_count, 2);
        assert_eq!(stats.faq_count, 1);
    }

    #[test]
    fn test_schema_frequency_fan_out_and_tie_break() {
        let records = vec![
            record("WebPage, Organization", None, "", 0.0),
            record("Organization, Unknown, FAQPage", None, "", 0.0),
            record("Unspecified, WebPage, BreadcrumbList", None, "", 0.0),
        ];
        let table = schema_frequency(&records);
        assert_eq!(
            table,
            vec![
                ("WebPage".to_string(), 2),
                ("Organization".to_string(), 2),
                ("FAQPage".to_string(), 1),
                ("BreadcrumbList".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_frequency_sum_equals_non_sentinel_tokens() {
        let records = vec![
            record("A, B, Unknown", None, "", 0.0),
            record(",C,,A", None, "", 0.0),
            record("Unspecified", None, "", 0.0),
        ];
        let expected: usize = records
            .iter()
            .map(|r| {
                parse_multi_value(&r.schema_types_found)
                    .into_iter()
                    .filter(|t| !is_sentinel(t))
                    .count()
            })
            .sum();
        let total: usize = schema_frequency(&records).iter().map(|(_, c)| c).sum();
        assert_eq!(total, expected);
        assert_eq!(total, 4);
    }

    #[test]
    fn test_page_type_frequency_drops_uncategorized() {
        let records = vec![
            record("", Some("Blog"), "", 0.0),
            record("", None, "", 0.0),
            record("", Some("Product"), "", 0.0),
            record("", Some("Uncategorized"), "", 0.0),
            record("", Some("Product"), "", 0.0),
        ];
        assert_eq!(
            page_type_frequency(&records),
            vec![("Product".to_string(), 2), ("Blog".to_string(), 1)]
        );
    }

    #[test]
    fn test_priority_matrix_counts_and_order() {
        let records = vec![
            record("", None, "Review(Low), FAQPage(High)", 0.0),
            record("", None, "FAQPage(Medium), Article(Bogus), HowTo(High)", 0.0),
            record("", None, "Review(High), FAQPage(High)", 0.0),
        ];
        let matrix = priority_matrix(&records);
        let schemas: Vec<&str> = matrix.iter().map(|r| r.schema.as_str()).collect();
        assert_eq!(schemas, vec!["FAQPage", "Review", "HowTo"]);
        assert_eq!(
            matrix[0].counts,
            PriorityCounts {
                high: 2,
                medium: 1,
                low: 0
            }
        );
        assert_eq!(matrix[1].counts.total(), 2);
    }

    #[test]
    fn test_segment_at_stacks_high_first() {
        let row = PriorityRow {
            schema: "FAQPage".into(),
            counts: PriorityCounts {
                high: 2,
                medium: 0,
                low: 3,
            },
        };
        assert_eq!(row.segment_at(0.5), Some(Priority::High));
        assert_eq!(row.segment_at(2.0), Some(Priority::Low));
        assert_eq!(row.segment_at(4.9), Some(Priority::Low));
        assert_eq!(row.segment_at(5.0), None);
        assert_eq!(row.segment_at(-1.0), None);
    }

    #[test]
    fn test_schema_catalog_sorted_with_all_first() {
        let records = vec![
            record("WebPage, Organization", None, "", 0.0),
            record("organization, Unknown, FAQPage", None, "", 0.0),
        ];
        assert_eq!(
            schema_catalog(&records),
            vec!["All", "FAQPage", "Organization", "WebPage", "organization"]
        );
        assert_eq!(schema_catalog(&[]), vec!["All"]);
    }
}

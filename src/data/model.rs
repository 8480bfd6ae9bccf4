use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CellValue – a single raw cell as read by the loader
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring the dtypes found in exported audits.
/// Loaders produce rows of these; [`Record::from_cells`] normalizes them once.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64`, accepting numeric text.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) if v.is_finite() => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    /// Truthiness used for the `has_*` flags.
    pub fn as_flag(&self) -> bool {
        match self {
            CellValue::Bool(b) => *b,
            CellValue::Integer(i) => *i != 0,
            CellValue::Float(v) => v.is_finite() && *v != 0.0,
            CellValue::String(s) => {
                let s = s.trim();
                s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("yes") || s == "1"
            }
            CellValue::Null => false,
        }
    }

    /// Text form, with `Null` rendered as the empty string.
    pub fn as_text(&self) -> String {
        self.to_string().trim().to_string()
    }
}

pub type Row = BTreeMap<String, CellValue>;

// ---------------------------------------------------------------------------
// Priority / RecommendationToken
// ---------------------------------------------------------------------------

/// Urgency bucket of a schema recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// Exact, case-sensitive match on `High` / `Medium` / `Low`.
    pub fn parse(s: &str) -> Option<Priority> {
        match s {
            "High" => Some(Priority::High),
            "Medium" => Some(Priority::Medium),
            "Low" => Some(Priority::Low),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed `Name(Priority)` element of `recommendation_priority`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationToken {
    pub schema: String,
    pub priority: Priority,
}

// ---------------------------------------------------------------------------
// Record – one analyzed page
// ---------------------------------------------------------------------------

/// Values that mean "no value" in text columns of the exported audit.
const MISSING_MARKERS: [&str; 4] = ["", "Unknown", "None", "nan"];

/// A single analyzed page. Immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub url: String,
    /// `None` is shown and counted as "Uncategorized".
    pub page_type: Option<String>,
    pub primary_schema_type: Option<String>,
    /// Comma-separated multi-value field.
    pub schema_types_found: String,
    pub recommended_schemas: String,
    /// Comma-separated `Name(Priority)` elements.
    pub recommendation_priority: String,
    pub missing_required_properties: String,
    pub schema_completeness_score: f64,
    pub has_reviews: bool,
    pub has_faq: bool,
    pub validation_errors: u32,
}

impl Record {
    /// Normalize a raw loader row into a record.
    ///
    /// Returns `None` for rows that should not be analyzed at all, i.e. pages
    /// that have a `status_code` column whose value is not exactly 200
    /// (null, blank and non-numeric codes included).
    pub fn from_cells(row: &Row) -> Option<Record> {
        if let Some(code) = row.get("status_code") {
            if code.as_f64() != Some(200.0) {
                return None;
            }
        }

        let text = |col: &str| row.get(col).map(CellValue::as_text).unwrap_or_default();
        let optional = |col: &str| {
            let value = text(col);
            if MISSING_MARKERS.contains(&value.as_str()) {
                None
            } else {
                Some(value)
            }
        };

        Some(Record {
            url: text("url"),
            page_type: optional("page_type"),
            primary_schema_type: optional("primary_schema_type"),
            schema_types_found: clean_schema_list(&text("schema_types_found")),
            recommended_schemas: text("recommended_schemas"),
            recommendation_priority: text("recommendation_priority"),
            missing_required_properties: text("missing_required_properties"),
            schema_completeness_score: row
                .get("schema_completeness_score")
                .and_then(CellValue::as_f64)
                .unwrap_or(0.0),
            has_reviews: row.get("has_reviews").is_some_and(CellValue::as_flag),
            has_faq: row.get("has_faq").is_some_and(CellValue::as_flag),
            validation_errors: row
                .get("validation_errors")
                .map(error_count)
                .unwrap_or(0),
        })
    }

    /// A page is valid when it reported no validation errors.
    pub fn is_valid(&self) -> bool {
        self.validation_errors == 0
    }

    /// Status label shown in the records table.
    pub fn validation_label(&self) -> String {
        match self.validation_errors {
            0 => "Valid".to_string(),
            1 => "1 error".to_string(),
            n => format!("{n} errors"),
        }
    }
}

/// Drop `unknown` (any case) and empty tokens, re-join with ", ".
fn clean_schema_list(raw: &str) -> String {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty() && !t.eq_ignore_ascii_case("unknown"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn error_count(cell: &CellValue) -> u32 {
    match cell {
        CellValue::Null => 0,
        CellValue::String(s) if s.trim().is_empty() => 0,
        CellValue::String(s) => match s.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => v.max(0.0) as u32,
            // Free text means something was reported.
            _ => 1,
        },
        other => other.as_f64().map(|v| v.max(0.0) as u32).unwrap_or(0),
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded corpus
// ---------------------------------------------------------------------------

/// Immutable sequence of records, in load order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        Dataset { records }
    }

    /// Normalize raw rows, dropping those [`Record::from_cells`] rejects.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let total = rows.len();
        let records: Vec<Record> = rows.iter().filter_map(Record::from_cells).collect();
        let dropped = total - records.len();
        if dropped > 0 {
            log::warn!("Dropped {dropped} of {total} rows without a 200 status code");
        }
        Dataset { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, CellValue)]) -> Row {
        cells
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_normalizes_optional_text() {
        let rec = Record::from_cells(&row(&[
            ("url", CellValue::String("https://a.example/".into())),
            ("page_type", CellValue::String("Unknown".into())),
            ("primary_schema_type", CellValue::Null),
        ]))
        .unwrap();
        assert_eq!(rec.url, "https://a.example/");
        assert_eq!(rec.page_type, None);
        assert_eq!(rec.primary_schema_type, None);
        assert_eq!(rec.schema_types_found, "");
        assert_eq!(rec.schema_completeness_score, 0.0);
    }

    #[test]
    fn test_strips_unknown_schema_tokens() {
        let rec = Record::from_cells(&row(&[(
            "schema_types_found",
            CellValue::String("Organization, unknown, ,FAQPage,UNKNOWN".into()),
        )]))
        .unwrap();
        assert_eq!(rec.schema_types_found, "Organization, FAQPage");
    }

    #[test]
    fn test_flags_and_validation() {
        let rec = Record::from_cells(&row(&[
            ("has_reviews", CellValue::String("True".into())),
            ("has_faq", CellValue::Integer(0)),
            ("validation_errors", CellValue::String("".into())),
        ]))
        .unwrap();
        assert!(rec.has_reviews);
        assert!(!rec.has_faq);
        assert!(rec.is_valid());
        assert_eq!(rec.validation_label(), "Valid");

        let rec = Record::from_cells(&row(&[("validation_errors", CellValue::Float(3.0))])).unwrap();
        assert_eq!(rec.validation_errors, 3);
        assert_eq!(rec.validation_label(), "3 errors");

        let rec = Record::from_cells(&row(&[(
            "validation_errors",
            CellValue::String("missing @context".into()),
        )]))
        .unwrap();
        assert_eq!(rec.validation_errors, 1);
    }

    #[test]
    fn test_non_200_rows_are_dropped() {
        let ok = row(&[("status_code", CellValue::Integer(200))]);
        let missing = row(&[("status_code", CellValue::Integer(404))]);
        let absent = row(&[("url", CellValue::String("x".into()))]);
        let ds = Dataset::from_rows(vec![ok, missing, absent]);
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn test_unparseable_status_codes_are_dropped() {
        let rows = vec![
            row(&[("status_code", CellValue::Null)]),
            row(&[("status_code", CellValue::String("timeout".into()))]),
            row(&[("status_code", CellValue::String("  ".into()))]),
            row(&[("status_code", CellValue::String("200".into()))]),
            row(&[("status_code", CellValue::Float(200.0))]),
        ];
        let ds = Dataset::from_rows(rows);
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn test_nan_flag_is_false() {
        assert!(!CellValue::Float(f64::NAN).as_flag());
        assert!(!CellValue::Float(f64::INFINITY).as_flag());
        assert!(CellValue::Float(1.0).as_flag());
    }

    #[test]
    fn test_priority_parse_is_exact() {
        assert_eq!(Priority::parse("High"), Some(Priority::High));
        assert_eq!(Priority::parse("high"), None);
        assert_eq!(Priority::parse("Foo"), None);
    }
}

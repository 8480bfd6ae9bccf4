use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;

use schema_scope::data::model::Record;

/// Write a deterministic sample schema-audit dataset.
#[derive(Parser, Debug)]
#[command(about)]
struct Args {
    /// Output file; the format follows the extension (.json, .csv, .parquet)
    #[arg(short, long, default_value = "sample_audit.json")]
    output: PathBuf,

    /// Number of pages to generate
    #[arg(short, long, default_value_t = 500)]
    count: usize,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

const PAGE_TYPES: [&str; 6] = ["Product", "Blog", "Landing", "Support", "Pricing", "Uncategorized"];
const SCHEMAS: [&str; 8] = [
    "WebPage",
    "Organization",
    "BreadcrumbList",
    "Product",
    "Article",
    "FAQPage",
    "WebSite",
    "Unknown",
];
const RECOMMENDED: [&str; 6] = ["FAQPage", "Review", "HowTo", "Product", "BreadcrumbList", "VideoObject"];
const PRIORITIES: [&str; 3] = ["High", "Medium", "Low"];

fn generate(rng: &mut SimpleRng, count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            let page_type = rng.pick(&PAGE_TYPES);

            let mut found: Vec<&str> = SCHEMAS.iter().copied().filter(|_| rng.chance(0.3)).collect();
            if found.is_empty() {
                found.push("Unspecified");
            }

            let recommended: Vec<&str> = RECOMMENDED
                .iter()
                .copied()
                .filter(|s| !found.contains(s) && rng.chance(0.35))
                .collect();
            let priorities: Vec<String> = recommended
                .iter()
                .map(|s| format!("{s}({})", rng.pick(&PRIORITIES)))
                .collect();

            let errors = if rng.chance(0.8) { 0 } else { 1 + rng.next_u64() % 4 };

            Record {
                url: format!("https://www.example.com/{}/page-{i}", page_type.to_lowercase()),
                page_type: (page_type != "Uncategorized").then(|| page_type.to_string()),
                primary_schema_type: found.first().map(|s| s.to_string()),
                schema_types_found: found.join(", "),
                recommended_schemas: recommended.join(", "),
                recommendation_priority: priorities.join(", "),
                missing_required_properties: String::new(),
                schema_completeness_score: (rng.next_f64() * 100.0).round(),
                has_reviews: rng.chance(0.25),
                has_faq: found.contains(&"FAQPage"),
                validation_errors: errors as u32,
            }
        })
        .collect()
}

fn write_json(path: &Path, records: &[Record]) -> Result<()> {
    let file = std::fs::File::create(path).context("creating output file")?;
    serde_json::to_writer_pretty(file, records).context("writing JSON")?;
    Ok(())
}

fn write_csv(path: &Path, records: &[Record]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating output file")?;
    for record in records {
        writer.serialize(record).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &Path, records: &[Record]) -> Result<()> {
    let text = |f: fn(&Record) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(records.iter().map(f).collect::<Vec<_>>()))
    };
    let optional = |f: fn(&Record) -> Option<&str>| -> ArrayRef {
        Arc::new(StringArray::from(records.iter().map(f).collect::<Vec<_>>()))
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("url", DataType::Utf8, false),
        Field::new("status_code", DataType::Int64, false),
        Field::new("page_type", DataType::Utf8, true),
        Field::new("primary_schema_type", DataType::Utf8, true),
        Field::new("schema_types_found", DataType::Utf8, false),
        Field::new("recommended_schemas", DataType::Utf8, false),
        Field::new("recommendation_priority", DataType::Utf8, false),
        Field::new("schema_completeness_score", DataType::Float64, false),
        Field::new("has_reviews", DataType::Boolean, false),
        Field::new("has_faq", DataType::Boolean, false),
        Field::new("validation_errors", DataType::Int64, false),
    ]));

    let columns: Vec<ArrayRef> = vec![
        text(|r| r.url.as_str()),
        Arc::new(Int64Array::from(vec![200i64; records.len()])),
        optional(|r| r.page_type.as_deref()),
        optional(|r| r.primary_schema_type.as_deref()),
        text(|r| r.schema_types_found.as_str()),
        text(|r| r.recommended_schemas.as_str()),
        text(|r| r.recommendation_priority.as_str()),
        Arc::new(Float64Array::from(
            records.iter().map(|r| r.schema_completeness_score).collect::<Vec<_>>(),
        )),
        Arc::new(BooleanArray::from(records.iter().map(|r| r.has_reviews).collect::<Vec<_>>())),
        Arc::new(BooleanArray::from(records.iter().map(|r| r.has_faq).collect::<Vec<_>>())),
        Arc::new(Int64Array::from(
            records.iter().map(|r| r.validation_errors as i64).collect::<Vec<_>>(),
        )),
    ];

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut rng = SimpleRng::new(args.seed);
    let records = generate(&mut rng, args.count);

    let ext = args
        .output
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "json" => write_json(&args.output, &records)?,
        "csv" => write_csv(&args.output, &records)?,
        "parquet" | "pq" => write_parquet(&args.output, &records)?,
        other => bail!("Unsupported output extension: .{other}"),
    }

    log::info!("Wrote {} page records to {}", records.len(), args.output.display());
    println!("Wrote {} page records to {}", records.len(), args.output.display());
    Ok(())
}

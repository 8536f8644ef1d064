//! medintake: classify Medicare plan documents, read client intake fields,
//! and compare plans.
//!
//! Usage:
//!   medintake --catalog catalog.json classify sob.pdf
//!   medintake --catalog plans/ batch *.pdf *.png --archive-dir accepted/
//!   medintake intake medicare-card.jpg
//!   medintake --catalog catalog.json compare --current-plan 10 --state WA --county King

mod display;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use medintake_classify::DocumentClassifier;
use medintake_core::{Catalog, ClassificationResult, ClientProfile, RawDocument};
use medintake_extract::{TesseractCli, read_document};
use medintake_extract::ocr::DEFAULT_OCR_LANG;
use medintake_store::{ComparisonSnapshot, archive_document, archive_file_name, load_catalog};

#[derive(Parser, Debug)]
#[command(name = "medintake")]
#[command(about = "Medicare document classification and plan comparison")]
#[command(version)]
struct Cli {
    /// Catalog: a .json file, or a directory with carriers.parquet and plans.parquet
    #[arg(long, global = true, env = "MEDINTAKE_CATALOG")]
    catalog: Option<PathBuf>,

    /// Tesseract binary used for image OCR
    #[arg(long, global = true, default_value = "tesseract", env = "MEDINTAKE_TESSERACT")]
    tesseract: PathBuf,

    /// OCR language model
    #[arg(long, global = true, default_value = DEFAULT_OCR_LANG, env = "MEDINTAKE_OCR_LANG")]
    ocr_lang: String,

    /// Print results as JSON instead of cards
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify one document against the catalog
    Classify {
        file: PathBuf,
        /// Copy the document here when it is auto-assigned
        #[arg(long)]
        archive_dir: Option<PathBuf>,
    },
    /// Classify many documents; one failure does not stop the rest
    Batch {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Documents processed at once
        #[arg(long, default_value = "4", env = "MEDINTAKE_CONCURRENCY")]
        concurrency: usize,
        /// Copy auto-assigned documents here
        #[arg(long)]
        archive_dir: Option<PathBuf>,
    },
    /// Read client identity fields (name, Medicare number, SSN, ...) from a document
    Intake { file: PathBuf },
    /// Rank up to three alternatives to the client's current plan
    Compare {
        /// Catalog ID of the client's current plan
        #[arg(long)]
        current_plan: i64,
        /// Client state code
        #[arg(long)]
        state: String,
        /// Client county
        #[arg(long)]
        county: String,
        /// Client is restricted to a specific provider network (recorded only)
        #[arg(long)]
        restricted_network: bool,
        /// Write an immutable snapshot of the result here
        #[arg(long)]
        snapshot_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "medintake=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    info!("medintake v{}", env!("CARGO_PKG_VERSION"));

    let ocr = TesseractCli::new(&cli.tesseract, &cli.ocr_lang);
    let classifier = DocumentClassifier::new().context("compiling classification patterns")?;

    match &cli.command {
        Command::Classify { file, archive_dir } => {
            let catalog = require_catalog(cli.catalog.as_deref())?;
            let doc = read_document(file)
                .await
                .with_context(|| format!("reading {}", file.display()))?;
            let result = classifier
                .classify_document(&doc, &catalog, &ocr)
                .await
                .with_context(|| format!("classifying {}", file.display()))?;

            if let Some(dir) = archive_dir {
                archive_if_matched(dir, &doc, &result)?;
            }
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                display::print_classification_card(&file.display().to_string(), &result);
            }
        }

        Command::Batch {
            files,
            concurrency,
            archive_dir,
        } => {
            let catalog = require_catalog(cli.catalog.as_deref())?;
            let items = classifier
                .classify_files(files.clone(), &catalog, &ocr, *concurrency)
                .await;

            if let Some(dir) = archive_dir {
                for item in &items {
                    if let (Some(doc), Ok(result)) = (&item.document, &item.result)
                        && let Err(e) = archive_if_matched(dir, doc, result)
                    {
                        let detail = format!("{e:#}");
                        warn!(document = %item.name, error = %detail, "archive failed");
                    }
                }
            }

            if cli.json {
                let out: Vec<serde_json::Value> = items
                    .iter()
                    .map(|item| match &item.result {
                        Ok(result) => serde_json::json!({ "name": item.name, "result": result }),
                        Err(e) => serde_json::json!({ "name": item.name, "error": e.to_string() }),
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                for item in &items {
                    match &item.result {
                        Ok(result) => display::print_classification_card(&item.name, result),
                        Err(e) => display::print_failure(&item.name, e),
                    }
                }
                display::print_batch_summary(&items);
            }
        }

        Command::Intake { file } => {
            let doc = read_document(file)
                .await
                .with_context(|| format!("reading {}", file.display()))?;
            let fields = classifier
                .intake_document(&doc, &ocr)
                .await
                .with_context(|| format!("extracting text from {}", file.display()))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&fields)?);
            } else {
                display::print_intake_card(&file.display().to_string(), &fields);
            }
        }

        Command::Compare {
            current_plan,
            state,
            county,
            restricted_network,
            snapshot_dir,
        } => {
            let catalog = require_catalog(cli.catalog.as_deref())?;
            let Some(current) = catalog.plan(*current_plan) else {
                bail!("plan {current_plan} is not in the catalog");
            };
            let client = ClientProfile {
                state: state.clone(),
                county: county.clone(),
                uses_restricted_network: *restricted_network,
            };
            let result = medintake_compare::compare_plans(current, &client, &catalog.plans);

            if let Some(dir) = snapshot_dir {
                let path = ComparisonSnapshot::new(client.clone(), result.clone())
                    .write_to(dir)
                    .with_context(|| format!("writing snapshot to {}", dir.display()))?;
                eprintln!("Snapshot: {}", path.display());
            }
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                display::print_comparison_card(&client, &result);
            }
        }
    }

    Ok(())
}

fn require_catalog(path: Option<&Path>) -> Result<Catalog> {
    let path = path.context("this command needs --catalog (or MEDINTAKE_CATALOG)")?;
    let catalog =
        load_catalog(path).with_context(|| format!("loading catalog {}", path.display()))?;
    if catalog.is_empty() {
        warn!(path = %path.display(), "catalog is empty, nothing can match");
    }
    Ok(catalog)
}

/// Copy an auto-assigned document into the archive. Returns the archived path.
fn archive_if_matched(
    dir: &Path,
    doc: &RawDocument,
    result: &ClassificationResult,
) -> Result<Option<PathBuf>> {
    let Some(plan) = result.matched_plan.as_ref().filter(|_| result.is_auto_assignable()) else {
        return Ok(None);
    };
    let name = archive_file_name(result.document_type, plan, Utc::now(), &doc.extension);
    let path = archive_document(dir, &name, &doc.bytes)
        .with_context(|| format!("archiving to {}", dir.display()))?;
    eprintln!("Archived: {}", path.display());
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_compare_with_globals_after_subcommand() {
        let cli = Cli::try_parse_from([
            "medintake",
            "compare",
            "--current-plan",
            "10",
            "--state",
            "WA",
            "--county",
            "King",
            "--catalog",
            "catalog.json",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.catalog.as_deref(), Some(Path::new("catalog.json")));
        match cli.command {
            Command::Compare {
                current_plan,
                restricted_network,
                ..
            } => {
                assert_eq!(current_plan, 10);
                assert!(!restricted_network);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn batch_requires_files() {
        assert!(Cli::try_parse_from(["medintake", "batch"]).is_err());
    }

    #[test]
    fn missing_catalog_is_reported() {
        let err = require_catalog(None).unwrap_err();
        assert!(err.to_string().contains("--catalog"));
    }

    #[test]
    fn accepted_documents_in_the_same_second_are_all_archived() {
        use medintake_core::{Carrier, DocumentType, MatchOutcome, Plan};

        let result = ClassificationResult {
            document_type: DocumentType::SummaryOfBenefits,
            matched_carrier: Some(Carrier {
                id: 1,
                name: "Evergreen Health".into(),
            }),
            matched_plan: Some(Plan {
                id: 10,
                carrier_id: 1,
                name: "Evergreen Gold H1111-001".into(),
                ..Default::default()
            }),
            confidence: 100.0,
            carrier_candidates: Vec::new(),
            plan_candidates: Vec::new(),
            extracted_benefits: None,
            outcome: MatchOutcome::Matched,
        };
        let dir = tempfile::tempdir().unwrap();
        let a = RawDocument::new(b"first".to_vec(), "png");
        let b = RawDocument::new(b"second".to_vec(), "png");

        let first = archive_if_matched(dir.path(), &a, &result).unwrap().unwrap();
        let second = archive_if_matched(dir.path(), &b, &result).unwrap().unwrap();
        assert_ne!(first, second);
        assert_eq!(std::fs::read(&first).unwrap(), b"first");
        assert_eq!(std::fs::read(&second).unwrap(), b"second");
    }

    #[test]
    fn review_results_are_not_archived() {
        let result = ClassificationResult {
            document_type: medintake_core::DocumentType::Unknown,
            matched_carrier: None,
            matched_plan: None,
            confidence: 0.0,
            carrier_candidates: Vec::new(),
            plan_candidates: Vec::new(),
            extracted_benefits: None,
            outcome: medintake_core::MatchOutcome::Unrecognized {
                suggestions: Default::default(),
            },
        };
        let dir = tempfile::tempdir().unwrap();
        let doc = RawDocument::new(b"x".to_vec(), "png");
        assert!(archive_if_matched(dir.path(), &doc, &result).unwrap().is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}

//! Carrier/plan catalog loading.
//!
//! A catalog is either one JSON file (`{"carriers": [...], "plans": [...]}`)
//! or a directory holding `carriers.parquet` and `plans.parquet`.
//!
//! Parquet columns:
//!
//! - carriers: `id` (int), `name` (string)
//! - plans: `id`, `carrier_id`, `name` required; `state_code`, `counties`
//!   (list of string), `monthly_premium`, `moop`, `pcp_copay`,
//!   `specialist_copay` (float or int), `snp_type` (`C-SNP`/`D-SNP`/`I-SNP`)
//!   optional.

use std::path::Path;

use arrow::array::{
    Array, Float32Array, Float64Array, Int32Array, Int64Array, LargeListArray, LargeStringArray,
    ListArray, StringArray,
};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use tracing::{info, warn};

use medintake_core::{Carrier, Catalog, Plan, SnpType};

use crate::StoreError;

pub const CARRIERS_FILE: &str = "carriers.parquet";
pub const PLANS_FILE: &str = "plans.parquet";

/// Load a catalog from a `.json` file or a Parquet directory.
pub fn load_catalog(path: &Path) -> Result<Catalog, StoreError> {
    if !path.exists() {
        return Err(StoreError::NotFound(path.to_path_buf()));
    }

    let catalog = if path.is_dir() {
        let carriers = carriers_from_batches(&read_parquet(&path.join(CARRIERS_FILE))?)?;
        let plans = plans_from_batches(&read_parquet(&path.join(PLANS_FILE))?)?;
        Catalog::new(carriers, plans)
    } else if path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
    {
        catalog_from_json(&std::fs::read_to_string(path)?)?
    } else {
        return Err(StoreError::UnsupportedCatalog(path.to_path_buf()));
    };

    info!(
        path = %path.display(),
        carriers = catalog.carriers.len(),
        plans = catalog.plans.len(),
        "loaded catalog"
    );
    if catalog.plans.iter().any(|p| catalog.carrier(p.carrier_id).is_none()) {
        warn!("catalog has plans whose carrier is not listed");
    }
    Ok(catalog)
}

pub fn catalog_from_json(json: &str) -> Result<Catalog, StoreError> {
    Ok(serde_json::from_str(json)?)
}

/// Read a Parquet file into Arrow RecordBatches.
pub fn read_parquet(path: &Path) -> Result<Vec<RecordBatch>, StoreError> {
    if !path.exists() {
        return Err(StoreError::NotFound(path.to_path_buf()));
    }
    let file = std::fs::File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;
    let batches: Result<Vec<RecordBatch>, _> = reader.collect();
    Ok(batches?)
}

/// Build carriers from batches with `id` and `name` columns.
pub fn carriers_from_batches(batches: &[RecordBatch]) -> Result<Vec<Carrier>, StoreError> {
    const TABLE: &str = "carriers";
    let mut carriers = Vec::new();

    for batch in batches {
        let id_col = required(batch, TABLE, "id")?;
        let name_col = required(batch, TABLE, "name")?;

        for row in 0..batch.num_rows() {
            carriers.push(Carrier {
                id: get_i64(id_col, row).ok_or_else(|| invalid(TABLE, "id", row))?,
                name: get_string(name_col, row).ok_or_else(|| invalid(TABLE, "name", row))?,
            });
        }
    }
    Ok(carriers)
}

/// Build plans from batches; optional columns may be absent or null.
pub fn plans_from_batches(batches: &[RecordBatch]) -> Result<Vec<Plan>, StoreError> {
    const TABLE: &str = "plans";
    let mut plans = Vec::new();

    for batch in batches {
        let id_col = required(batch, TABLE, "id")?;
        let carrier_col = required(batch, TABLE, "carrier_id")?;
        let name_col = required(batch, TABLE, "name")?;
        let state_col = optional(batch, "state_code");
        let counties_col = optional(batch, "counties");
        let premium_col = optional(batch, "monthly_premium");
        let moop_col = optional(batch, "moop");
        let pcp_col = optional(batch, "pcp_copay");
        let specialist_col = optional(batch, "specialist_copay");
        let snp_col = optional(batch, "snp_type");

        for row in 0..batch.num_rows() {
            let mut plan = Plan {
                id: get_i64(id_col, row).ok_or_else(|| invalid(TABLE, "id", row))?,
                carrier_id: get_i64(carrier_col, row)
                    .ok_or_else(|| invalid(TABLE, "carrier_id", row))?,
                name: get_string(name_col, row).ok_or_else(|| invalid(TABLE, "name", row))?,
                ..Default::default()
            };
            plan.state_code = state_col.and_then(|c| get_string(c, row));
            plan.counties = counties_col
                .and_then(|c| get_string_list(c, row))
                .unwrap_or_default();
            plan.monthly_premium = premium_col.and_then(|c| get_f64(c, row));
            plan.moop = moop_col.and_then(|c| get_f64(c, row));
            plan.pcp_copay = pcp_col.and_then(|c| get_f64(c, row));
            plan.specialist_copay = specialist_col.and_then(|c| get_f64(c, row));

            if let Some(col) = snp_col
                && let Some(raw) = get_string(col, row)
            {
                plan.snp_type = SnpType::parse(&raw);
                if plan.snp_type.is_none() {
                    warn!(plan = plan.id, snp_type = %raw, "unknown snp type, ignored");
                }
            }
            plans.push(plan);
        }
    }
    Ok(plans)
}

fn required<'a>(
    batch: &'a RecordBatch,
    table: &'static str,
    column: &'static str,
) -> Result<&'a dyn Array, StoreError> {
    batch
        .column_by_name(column)
        .map(|c| c.as_ref())
        .ok_or(StoreError::MissingColumn { table, column })
}

fn optional<'a>(batch: &'a RecordBatch, column: &str) -> Option<&'a dyn Array> {
    batch.column_by_name(column).map(|c| c.as_ref())
}

fn invalid(table: &'static str, column: &'static str, row: usize) -> StoreError {
    StoreError::InvalidValue { table, column, row }
}

// ── Arrow extraction helpers ──

/// String value from a Utf8 or LargeUtf8 column.
fn get_string(col: &dyn Array, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    col.as_any()
        .downcast_ref::<StringArray>()
        .map(|arr| arr.value(row).to_string())
        .or_else(|| {
            col.as_any()
                .downcast_ref::<LargeStringArray>()
                .map(|arr| arr.value(row).to_string())
        })
}

/// List of strings from a List or LargeList column; null items are skipped.
fn get_string_list(col: &dyn Array, row: usize) -> Option<Vec<String>> {
    if col.is_null(row) {
        return None;
    }
    if let Some(list) = col.as_any().downcast_ref::<ListArray>() {
        return Some(strings_from_array(list.value(row).as_ref()));
    }
    if let Some(list) = col.as_any().downcast_ref::<LargeListArray>() {
        return Some(strings_from_array(list.value(row).as_ref()));
    }
    None
}

fn strings_from_array(arr: &dyn Array) -> Vec<String> {
    (0..arr.len()).filter_map(|i| get_string(arr, i)).collect()
}

fn get_i64(col: &dyn Array, row: usize) -> Option<i64> {
    if col.is_null(row) {
        return None;
    }
    let any = col.as_any();
    any.downcast_ref::<Int64Array>()
        .map(|a| a.value(row))
        .or_else(|| any.downcast_ref::<Int32Array>().map(|a| i64::from(a.value(row))))
}

fn get_f64(col: &dyn Array, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    let any = col.as_any();
    any.downcast_ref::<Float64Array>()
        .map(|a| a.value(row))
        .or_else(|| any.downcast_ref::<Float32Array>().map(|a| f64::from(a.value(row))))
        .or_else(|| any.downcast_ref::<Int64Array>().map(|a| a.value(row) as f64))
        .or_else(|| any.downcast_ref::<Int32Array>().map(|a| f64::from(a.value(row))))
}

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::aggregator::total_units;
use crate::api::{self, ApiModel};
use crate::demo::generate_records;
use crate::error::{Result, SalesError};
use crate::models::SaleRecord;

/// Where a record batch comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Demo { seed: u64 },
    File(PathBuf),
}

/// Parse a records file. Accepts a flat record array or an analytics API response.
pub fn parse_records(content: &str, month: Option<&str>) -> Result<Vec<SaleRecord>> {
    match serde_json::from_str::<Vec<SaleRecord>>(content) {
        Ok(records) => {
            debug!(count = records.len(), "parsed flat record list");
            if let Some(month) = month {
                warn!(month, "month filter ignored: flat record lists carry no month");
            }
            Ok(records)
        }
        Err(flat_err) => {
            debug!(error = %flat_err, "not a flat record list, trying API response shape");
            let models: Vec<ApiModel> = serde_json::from_str(content)?;
            api::flatten(&models, month)
        }
    }
}

pub fn read_records(path: &Path, month: Option<&str>) -> Result<Vec<SaleRecord>> {
    let content = std::fs::read_to_string(path)?;
    parse_records(&content, month)
}

/// Load a batch. If the file cannot be read and `fallback_seed` is set,
/// demo records are returned instead. Parse and data errors in a readable
/// file are always returned.
pub fn load(source: &Source, month: Option<&str>, fallback_seed: Option<u64>) -> Result<Vec<SaleRecord>> {
    match source {
        Source::Demo { seed } => {
            info!(seed, "generating demo records");
            Ok(generate_records(*seed))
        }
        Source::File(path) => match read_records(path, month) {
            Ok(records) => {
                info!(
                    path = %path.display(),
                    count = records.len(),
                    units = total_units(&records),
                    "loaded records"
                );
                Ok(records)
            }
            Err(SalesError::Io(e)) => match fallback_seed {
                Some(seed) => {
                    warn!(path = %path.display(), error = %e, seed, "falling back to demo records");
                    Ok(generate_records(seed))
                }
                None => Err(SalesError::Io(e)),
            },
            Err(e) => Err(e),
        },
    }
}

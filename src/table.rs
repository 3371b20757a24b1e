// table.rs — Embedding table loading.
//
// Input layout: delimited file with a header row (skipped), first column =
// row label, remaining columns = numeric vector components. Row order is
// preserved end to end; the viewer matches labels to tensor rows
// positionally, so this order is the one invariant everything else hangs on.

use std::fs::File;
use std::path::Path;

use serde::Deserialize;

use crate::config;
use crate::error::ExportError;

#[derive(Debug, Deserialize)]
struct RawRow {
    label: String,
    components: Vec<f32>,
}

#[derive(Debug)]
pub struct EmbeddingTable {
    labels: Vec<String>,
    vectors: Vec<Vec<f32>>,
}

impl EmbeddingTable {
    /// Load and validate a table. All rows must carry the same nonzero
    /// number of components; the first data row fixes the dimensionality.
    pub fn load(path: &Path) -> Result<Self, ExportError> {
        let file = File::open(path).map_err(|e| ExportError::load(path, e))?;

        // flexible(true): we report ragged rows ourselves with the row label
        // attached instead of csv's first-record-width error.
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(config::table::DELIMITER)
            .flexible(true)
            .from_reader(file);

        let mut labels: Vec<String> = Vec::new();
        let mut vectors: Vec<Vec<f32>> = Vec::new();
        let mut dim: Option<usize> = None;

        for (idx, result) in reader.records().enumerate() {
            // Data rows start at line 2; line 1 is the header.
            let line = idx + 2;
            let record = result.map_err(|e| ExportError::load(path, format!("line {line}: {e}")))?;
            let row: RawRow = record
                .deserialize(None)
                .map_err(|e| ExportError::load(path, format!("line {line}: {e}")))?;

            if row.components.is_empty() {
                return Err(ExportError::load(
                    path,
                    format!("line {line}: row '{}' has no numeric components", row.label),
                ));
            }

            match dim {
                None => dim = Some(row.components.len()),
                Some(d) if d != row.components.len() => {
                    return Err(ExportError::load(
                        path,
                        format!(
                            "line {line}: row '{}' has {} components, expected {d}",
                            row.label,
                            row.components.len()
                        ),
                    ));
                }
                Some(_) => {}
            }

            labels.push(row.label);
            vectors.push(row.components);
        }

        if labels.is_empty() {
            return Err(ExportError::load(path, "table contains no data rows"));
        }

        Ok(Self { labels, vectors })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Vector dimensionality shared by every row.
    pub fn dim(&self) -> usize {
        self.vectors.first().map(|v| v.len()).unwrap_or(0)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn vectors(&self) -> &[Vec<f32>] {
        &self.vectors
    }
}

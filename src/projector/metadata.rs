// metadata.rs — Label file writing.

use std::fs;
use std::path::Path;

use crate::error::ExportError;

/// Write the metadata file: one label per line, table order. Any existing
/// file at `path` is replaced, never appended to.
pub fn write_metadata(labels: &[String], path: &Path) -> Result<(), ExportError> {
    let mut out = String::with_capacity(labels.len() * 16);
    for label in labels {
        out.push_str(label);
        out.push('\n');
    }

    fs::write(path, out).map_err(|e| ExportError::write(path, e))?;
    log::info!("Wrote {} labels to {}", labels.len(), path.display());
    Ok(())
}

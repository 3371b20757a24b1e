// projector/ — Artifacts for the external embedding-projector viewer.
//
// Provides:
// - Metadata (label) file writing
// - Projector descriptor serialization (pbtxt)
// - Named tensor construction + checkpoint persistence with retention

pub mod checkpoint;
pub mod descriptor;
pub mod metadata;
pub mod tensor;

use std::fs;
use std::path::{Path, PathBuf};

use crate::config;
use crate::error::ExportError;
use crate::table::EmbeddingTable;

use checkpoint::CheckpointManager;
use descriptor::ProjectorDescriptor;
use tensor::NamedTensor;

/// Everything one export run needs to know, passed explicitly instead of
/// living in process-wide state.
pub struct ExportContext {
    pub output_dir: PathBuf,
    pub tensor_name: String,
    pub max_to_keep: usize,
}

impl ExportContext {
    pub fn new(output_dir: PathBuf, tensor_name: String, max_to_keep: usize) -> Self {
        Self {
            output_dir,
            tensor_name,
            max_to_keep,
        }
    }
}

#[derive(Debug)]
pub struct ExportSummary {
    pub rows: usize,
    pub dims: usize,
    pub checkpoint_path: PathBuf,
}

/// Run one export: load the table, then write the label file, the
/// descriptor, and the checkpoint into the output directory.
///
/// Write failures abort mid-run; artifacts already written stay on disk
/// (one-shot tool, no rollback).
pub fn run_export(input: &Path, ctx: &ExportContext) -> Result<ExportSummary, ExportError> {
    // Load before touching the output directory: a bad input must leave it
    // unchanged.
    let table = EmbeddingTable::load(input)?;
    log::info!(
        "Loaded {} embeddings ({} dims) from {}",
        table.len(),
        table.dim(),
        input.display()
    );

    fs::create_dir_all(&ctx.output_dir).map_err(|e| ExportError::write(&ctx.output_dir, e))?;

    metadata::write_metadata(
        table.labels(),
        &ctx.output_dir.join(config::export::METADATA_FILE_NAME),
    )?;

    let tensor = NamedTensor::from_rows(&ctx.tensor_name, table.vectors());

    // metadata_path is relative to the output directory, where the
    // descriptor itself lives.
    ProjectorDescriptor::new(&ctx.tensor_name, config::export::METADATA_FILE_NAME)
        .write(&ctx.output_dir.join(config::export::PROJECTOR_CONFIG_FILE_NAME))?;

    let manager = CheckpointManager::new(
        &ctx.output_dir,
        config::export::CHECKPOINT_PREFIX,
        ctx.max_to_keep,
    );
    let checkpoint_path = manager.save(&tensor)?;

    Ok(ExportSummary {
        rows: table.len(),
        dims: table.dim(),
        checkpoint_path,
    })
}

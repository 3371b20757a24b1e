// descriptor.rs — Projector descriptor serialization.
//
// The viewer reads a small pbtxt file to find the tensor and its labels:
//
//   embeddings {
//     tensor_name: "glove_embedding"
//     metadata_path: "metadata.tsv"
//   }
//
// metadata_path is relative to the directory the descriptor lives in.

use std::fs;
use std::path::Path;

use crate::error::ExportError;

pub struct ProjectorDescriptor {
    pub tensor_name: String,
    pub metadata_path: String,
}

impl ProjectorDescriptor {
    pub fn new(tensor_name: &str, metadata_path: &str) -> Self {
        Self {
            tensor_name: tensor_name.to_string(),
            metadata_path: metadata_path.to_string(),
        }
    }

    /// Pure serialization to the fixed pbtxt text format.
    pub fn to_pbtxt(&self) -> String {
        format!(
            "embeddings {{\n  tensor_name: \"{}\"\n  metadata_path: \"{}\"\n}}\n",
            escape(&self.tensor_name),
            escape(&self.metadata_path),
        )
    }

    /// Serialize to `path`, replacing any previous descriptor.
    pub fn write(&self, path: &Path) -> Result<(), ExportError> {
        fs::write(path, self.to_pbtxt()).map_err(|e| ExportError::write(path, e))?;
        log::info!("Wrote projector descriptor to {}", path.display());
        Ok(())
    }
}

// pbtxt string fields are double-quoted; backslashes and quotes inside the
// value must be escaped.
fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

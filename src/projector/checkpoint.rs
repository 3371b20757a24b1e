// checkpoint.rs — Tensor checkpoint persistence with retention.
//
// Each save writes `<prefix>-<step>.safetensors` (step picks up from
// whatever is already in the directory) and rewrites the text `checkpoint`
// state file. Checkpoints beyond `max_to_keep` are deleted, oldest first.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use chrono::Utc;
use safetensors::tensor::TensorView;
use safetensors::Dtype;

use crate::config;
use crate::error::ExportError;

use super::tensor::NamedTensor;

pub struct CheckpointManager {
    dir: PathBuf,
    prefix: String,
    max_to_keep: usize,
}

impl CheckpointManager {
    /// `max_to_keep` below 1 would delete the checkpoint just written, so
    /// it is clamped to 1.
    pub fn new(dir: &Path, prefix: &str, max_to_keep: usize) -> Self {
        Self {
            dir: dir.to_path_buf(),
            prefix: prefix.to_string(),
            max_to_keep: max_to_keep.max(1),
        }
    }

    /// Persist the tensor as the next checkpoint, apply the retention cap,
    /// and rewrite the state file. Returns the new checkpoint's path.
    pub fn save(&self, tensor: &NamedTensor) -> Result<PathBuf, ExportError> {
        let step = self.list_checkpoints()?.last().map(|(n, _)| *n).unwrap_or(0) + 1;
        let path = self.dir.join(format!("{}-{step}.safetensors", self.prefix));

        let shape = tensor.shape();
        let view = TensorView::new(Dtype::F32, shape.to_vec(), tensor.as_bytes())
            .map_err(|e| ExportError::write(&path, format!("{e:?}")))?;

        safetensors::tensor::serialize_to_file(
            std::iter::once((tensor.name().to_string(), view)),
            &None::<HashMap<String, String>>,
            &path,
        )
        .map_err(|e| ExportError::write(&path, format!("{e:?}")))?;

        log::info!(
            "Saved checkpoint {} (tensor '{}', {} x {})",
            path.display(),
            tensor.name(),
            shape[0],
            shape[1]
        );

        let retained = self.apply_retention()?;
        self.write_state_file(&retained)?;

        Ok(path)
    }

    /// Checkpoints currently in the directory, oldest step first.
    fn list_checkpoints(&self) -> Result<Vec<(u64, PathBuf)>, ExportError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| ExportError::write(&self.dir, e))?;

        let mut found: Vec<(u64, PathBuf)> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ExportError::write(&self.dir, e))?;
            let name = entry.file_name();
            if let Some(step) = self.checkpoint_step(&name.to_string_lossy()) {
                found.push((step, entry.path()));
            }
        }

        found.sort_by_key(|(step, _)| *step);
        Ok(found)
    }

    /// Parse `<prefix>-<step>.safetensors`, ignoring everything else.
    fn checkpoint_step(&self, file_name: &str) -> Option<u64> {
        file_name
            .strip_prefix(self.prefix.as_str())?
            .strip_prefix('-')?
            .strip_suffix(".safetensors")?
            .parse()
            .ok()
    }

    /// Delete checkpoints beyond the cap; return the survivors, oldest
    /// first.
    fn apply_retention(&self) -> Result<Vec<(u64, PathBuf)>, ExportError> {
        let mut all = self.list_checkpoints()?;
        let stale_count = all.len().saturating_sub(self.max_to_keep);
        for (_, stale) in all.drain(..stale_count) {
            fs::remove_file(&stale).map_err(|e| ExportError::write(&stale, e))?;
            log::info!("Removed stale checkpoint {}", stale.display());
        }
        Ok(all)
    }

    /// Rewrite the `checkpoint` state file: current checkpoint, retained
    /// paths oldest first, and their save timestamps (seconds since epoch).
    fn write_state_file(&self, retained: &[(u64, PathBuf)]) -> Result<(), ExportError> {
        let path = self.dir.join(config::export::CHECKPOINT_STATE_FILE_NAME);
        let now = Utc::now().timestamp_micros() as f64 / 1_000_000.0;

        let Some((_, current)) = retained.last() else {
            return Err(ExportError::write(&path, "no checkpoint left to record"));
        };

        let mut out = String::new();
        out.push_str(&format!(
            "model_checkpoint_path: \"{}\"\n",
            file_name_of(current)
        ));
        for (_, p) in retained {
            out.push_str(&format!("all_model_checkpoint_paths: \"{}\"\n", file_name_of(p)));
        }
        for (_, p) in retained {
            out.push_str(&format!(
                "all_model_checkpoint_timestamps: {:.6}\n",
                saved_at(p).unwrap_or(now)
            ));
        }
        out.push_str(&format!("last_preserved_timestamp: {now:.6}\n"));

        fs::write(&path, out).map_err(|e| ExportError::write(&path, e))
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name().unwrap_or_default().to_string_lossy().into_owned()
}

fn saved_at(path: &Path) -> Option<f64> {
    let modified = fs::metadata(path).and_then(|m| m.modified()).ok()?;
    Some(modified.duration_since(UNIX_EPOCH).ok()?.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tensor() -> NamedTensor {
        NamedTensor::from_rows("glove_embedding", &[vec![0.1f32, 0.2], vec![0.3, 0.4]])
    }

    fn checkpoint_files(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|n| n.ends_with(".safetensors"))
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_save_writes_checkpoint_and_state_file() {
        let dir = tempfile::tempdir().unwrap();
        let manager = CheckpointManager::new(dir.path(), "embedding.ckpt", 1);

        let path = manager.save(&sample_tensor()).unwrap();

        assert_eq!(path, dir.path().join("embedding.ckpt-1.safetensors"));
        assert!(path.exists());

        let state = fs::read_to_string(dir.path().join("checkpoint")).unwrap();
        assert!(state.contains("model_checkpoint_path: \"embedding.ckpt-1.safetensors\""));
        assert!(state.contains("last_preserved_timestamp:"));
    }

    #[test]
    fn test_second_save_retains_single_checkpoint() {
        let dir = tempfile::tempdir().unwrap();
        let manager = CheckpointManager::new(dir.path(), "embedding.ckpt", 1);

        manager.save(&sample_tensor()).unwrap();
        manager.save(&sample_tensor()).unwrap();

        assert_eq!(checkpoint_files(dir.path()), vec!["embedding.ckpt-2.safetensors"]);

        let state = fs::read_to_string(dir.path().join("checkpoint")).unwrap();
        assert!(state.contains("model_checkpoint_path: \"embedding.ckpt-2.safetensors\""));
        assert_eq!(state.matches("all_model_checkpoint_paths:").count(), 1);
    }

    #[test]
    fn test_cap_of_two_keeps_newest_two() {
        let dir = tempfile::tempdir().unwrap();
        let manager = CheckpointManager::new(dir.path(), "embedding.ckpt", 2);

        manager.save(&sample_tensor()).unwrap();
        manager.save(&sample_tensor()).unwrap();
        manager.save(&sample_tensor()).unwrap();

        assert_eq!(
            checkpoint_files(dir.path()),
            vec!["embedding.ckpt-2.safetensors", "embedding.ckpt-3.safetensors"]
        );

        let state = fs::read_to_string(dir.path().join("checkpoint")).unwrap();
        assert!(state.contains("model_checkpoint_path: \"embedding.ckpt-3.safetensors\""));
        assert_eq!(state.matches("all_model_checkpoint_paths:").count(), 2);
    }

    #[test]
    fn test_checkpoint_roundtrips_tensor_values() {
        let dir = tempfile::tempdir().unwrap();
        let manager = CheckpointManager::new(dir.path(), "embedding.ckpt", 1);

        let path = manager.save(&sample_tensor()).unwrap();

        let buf = fs::read(&path).unwrap();
        let st = safetensors::SafeTensors::deserialize(&buf).unwrap();
        let view = st.tensor("glove_embedding").unwrap();
        assert_eq!(view.shape(), &[2, 2]);

        let values: Vec<f32> = view
            .data()
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes(b.try_into().unwrap()))
            .collect();
        assert_eq!(values, vec![0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn test_unrelated_files_do_not_affect_step_numbering() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("metadata.tsv"), "cat\n").unwrap();
        fs::write(dir.path().join("other-7.safetensors"), "x").unwrap();

        let manager = CheckpointManager::new(dir.path(), "embedding.ckpt", 1);
        let path = manager.save(&sample_tensor()).unwrap();

        assert_eq!(path, dir.path().join("embedding.ckpt-1.safetensors"));
        assert!(dir.path().join("metadata.tsv").exists());
        assert!(dir.path().join("other-7.safetensors").exists());
    }
}

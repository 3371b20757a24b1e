// IMPORTANT:
// Keep ALL fixed names and numeric values centralized here (repo rule: no
// hardcoded values scattered around).

// NOTE: TOOL_VERSION must stay in sync with the `version` field in Cargo.toml.
pub const TOOL_VERSION: &str = "0.1.0";

pub mod logging {
    pub const DEFAULT_LOG_SPEC: &str = "info";
}

pub mod table {
    /// Input tables are comma-delimited; the metadata file is TSV, the
    /// input is not.
    pub const DELIMITER: u8 = b',';
}

pub mod export {
    /// Label file, consumed positionally by the viewer: line i labels tensor row i.
    pub const METADATA_FILE_NAME: &str = "metadata.tsv";

    /// Descriptor file the viewer reads to find the tensor and its labels.
    pub const PROJECTOR_CONFIG_FILE_NAME: &str = "projector_config.pbtxt";

    /// Checkpoint files are named `<prefix>-<step>.safetensors`.
    pub const CHECKPOINT_PREFIX: &str = "embedding.ckpt";

    /// Text state file listing the retained checkpoints, newest last.
    pub const CHECKPOINT_STATE_FILE_NAME: &str = "checkpoint";

    pub const DEFAULT_TENSOR_NAME: &str = "glove_embedding";

    /// Checkpoints retained after a save. One is enough for a viewer that
    /// only ever reads the latest snapshot.
    pub const DEFAULT_MAX_TO_KEEP: usize = 1;
}

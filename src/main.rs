mod config;
mod error;
mod logging;
mod projector;
mod table;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};

use crate::projector::ExportContext;

fn main() {
    if let Err(e) = real_main() {
        // Keep stderr noisy: this is a supervised one-shot tool and the
        // operator is watching.
        eprintln!("[projector_export] fatal error: {e:?}");
        log::error!("Fatal error: {:?}", e);
        std::process::exit(1);
    }
}

fn real_main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    logging::init_logging()?;

    let input = read_arg_value(&args, "--input").context("missing --input <path> (see --help)")?;
    let output_dir =
        read_arg_value(&args, "--output-dir").context("missing --output-dir <path> (see --help)")?;
    let tensor_name = read_arg_value(&args, "--tensor-name")
        .unwrap_or_else(|| config::export::DEFAULT_TENSOR_NAME.to_string());
    let max_to_keep = match read_arg_value(&args, "--max-to-keep") {
        Some(v) => v
            .parse::<usize>()
            .with_context(|| format!("invalid --max-to-keep value: {v}"))?,
        None => config::export::DEFAULT_MAX_TO_KEEP,
    };
    if max_to_keep == 0 {
        bail!("--max-to-keep must be at least 1");
    }

    let ctx = ExportContext::new(PathBuf::from(output_dir), tensor_name, max_to_keep);
    let summary = projector::run_export(Path::new(&input), &ctx)?;

    log::info!(
        "Export complete: {} embeddings ({} dims) -> {} (checkpoint {})",
        summary.rows,
        summary.dims,
        ctx.output_dir.display(),
        summary.checkpoint_path.display()
    );

    Ok(())
}

fn read_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn print_usage() {
    println!(
        "\
projector_export {version}
Export a labeled embedding table to embedding-projector viewer artifacts.

USAGE:
    projector_export --input <table.csv> --output-dir <dir> [OPTIONS]

OPTIONS:
    --input <path>         Delimited table: header row, label column, then float components
    --output-dir <path>    Directory receiving metadata.tsv, projector_config.pbtxt and the checkpoint
    --tensor-name <name>   Tensor name recorded in descriptor and checkpoint (default: {tensor})
    --max-to-keep <n>      Checkpoints to retain, newest first (default: {keep})
    -h, --help             Show this help",
        version = config::TOOL_VERSION,
        tensor = config::export::DEFAULT_TENSOR_NAME,
        keep = config::export::DEFAULT_MAX_TO_KEEP,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_arg_value() {
        let args: Vec<String> = ["bin", "--input", "a.csv", "--output-dir", "out"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(read_arg_value(&args, "--input"), Some("a.csv".to_string()));
        assert_eq!(read_arg_value(&args, "--output-dir"), Some("out".to_string()));
        assert_eq!(read_arg_value(&args, "--tensor-name"), None);
    }

    #[test]
    fn test_read_arg_value_missing_trailing_value() {
        let args: Vec<String> = ["bin", "--input"].iter().map(|s| s.to_string()).collect();
        assert_eq!(read_arg_value(&args, "--input"), None);
    }
}

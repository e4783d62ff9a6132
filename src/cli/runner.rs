use std::io::{self, Write};

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use whiteout::api::process_assets_root;
use whiteout::{Error, ExtensionMatch, ProcessingParams};

use super::args::CliArgs;
use super::errors::AppError;
use super::report::ConsoleReporter;

/// Merge a JSON preset (if any) with the flags given on the command line.
fn resolve_params(args: &CliArgs) -> Result<ProcessingParams, AppError> {
    let mut params = match &args.config {
        Some(path) => ProcessingParams::from_json_file(path).map_err(|source| AppError::Config {
            path: path.clone(),
            source,
        })?,
        None => ProcessingParams::default(),
    };

    if let Some(tolerance) = args.tolerance {
        params.tolerance = tolerance;
    }
    if let Some(ext) = &args.extension {
        params.extension = ext.clone();
    }
    if args.ignore_case {
        params.extension_match = ExtensionMatch::IgnoreCase;
    }
    if !args.subdirs.is_empty() {
        params.subdirs = args.subdirs.clone();
    }
    Ok(params)
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    run_with(args, io::stdout().lock())
}

fn run_with<W: Write>(args: CliArgs, out: W) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_writer(io::stderr)
            .init();
    }

    let params = resolve_params(&args)?;
    let filter = params.extension_filter()?;
    info!(
        "Tolerance {} (threshold {}), extension .{} ({})",
        params.tolerance,
        params.tolerance.threshold(),
        filter.extension(),
        filter.mode()
    );

    let mut reporter = ConsoleReporter::new(out, filter.label());
    reporter.banner();
    if !args.root.is_dir() {
        reporter.root_missing(&args.root);
        return Err(AppError::MissingRoot {
            path: args.root.clone(),
        }
        .into());
    }
    reporter.root_found(&args.root);

    let run = match process_assets_root(&args.root, &params, &mut reporter) {
        Ok(run) => run,
        Err(Error::RootNotFound { path }) => return Err(AppError::MissingRoot { path }.into()),
        Err(e) => return Err(AppError::Library(e).into()),
    };

    reporter.summary(&run.totals);

    if let Some(path) = &args.report {
        run.write_json(path)?;
        info!("Wrote run report to {:?}", path);
    }

    if !run.totals.all_succeeded() {
        for failure in run.failures() {
            warn!("Failed: {:?}: {}", failure.path, failure.message);
        }
        if args.strict {
            return Err(AppError::PartialFailure {
                failed: run.totals.failed,
            }
            .into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use whiteout::Tolerance;

    #[test]
    fn flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"tolerance": 5, "extension": "webp", "subdirs": ["ui"]}}"#
        )
        .unwrap();
        let config = file.path().to_str().unwrap().to_string();

        let args =
            CliArgs::try_parse_from(["whiteout", "--config", &config, "--tolerance", "40"])
                .unwrap();
        let params = resolve_params(&args).unwrap();
        assert_eq!(params.tolerance, Tolerance(40));
        assert_eq!(params.extension, "webp");
        assert_eq!(params.subdirs, vec!["ui"]);
    }

    #[test]
    fn unreadable_config_is_reported() {
        let args =
            CliArgs::try_parse_from(["whiteout", "--config", "/nonexistent/whiteout.json"])
                .unwrap();
        assert!(matches!(
            resolve_params(&args),
            Err(AppError::Config { .. })
        ));
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("missing");
        let args =
            CliArgs::try_parse_from(["whiteout", "--root", root.to_str().unwrap()]).unwrap();
        let mut out = Vec::new();
        let err = run_with(args, &mut out).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Assets directory not found: {}", root.display())
        );

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with(&format!("\nAssets directory not found: {}\n", root.display())));
        assert!(!text.contains("Assets directory: "));
        assert!(!text.contains("[FOLDER]"));
    }

    #[test]
    fn existing_root_prints_progress() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("gem")).unwrap();
        image::RgbaImage::new(1, 1)
            .save(dir.path().join("gem/ruby.png"))
            .unwrap();
        let root = dir.path().to_str().unwrap();
        let args = CliArgs::try_parse_from(["whiteout", "--root", root]).unwrap();

        let mut out = Vec::new();
        run_with(args, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(&format!("Assets directory: {root}\n")));
        assert!(text.contains("[FOLDER] gem"));
        assert!(text.contains("Processing: ruby.png ... [OK]"));
        assert!(text.contains("[WARNING] 'weapon' folder not found. Skipping."));
        assert!(text.contains("  Success: 1\n"));
    }

    #[test]
    fn strict_mode_fails_on_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("gem")).unwrap();
        std::fs::write(dir.path().join("gem/broken.png"), b"nope").unwrap();
        let root = dir.path().to_str().unwrap();

        let lenient = CliArgs::try_parse_from(["whiteout", "--root", root]).unwrap();
        assert!(run_with(lenient, io::sink()).is_ok());

        let strict = CliArgs::try_parse_from(["whiteout", "--root", root, "--strict"]).unwrap();
        let err = run_with(strict, io::sink()).unwrap_err();
        assert_eq!(err.to_string(), "1 file(s) failed to process");
    }
}

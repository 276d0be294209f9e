use anyhow::{Context, Result, bail};
use decomment::cli::{Cli, parse_args};
use decomment::config::{CONFIG_FILE_NAMES, Config};
use decomment::language::is_supported;
use decomment::logging::init_tracing;
use decomment::models::options::Mode;
use decomment::output::{OutputWriter, RunSummary};
use decomment::processor::Processor;
use decomment::utils::path::expand_paths;
use rayon::prelude::*;
use std::process::ExitCode;
use tracing::{debug, info};

/// Files handed to each worker per batch
const FILES_PER_THREAD: usize = 16;

fn main() -> ExitCode {
    let cli = parse_args();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;

    if cli.init {
        let path = cwd.join(CONFIG_FILE_NAMES[0]);
        if path.exists() {
            bail!("Config file already exists: {}", path.display());
        }
        std::fs::write(&path, Config::template())
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        println!("Created {}", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = Config::load(cli.config.as_deref(), &cwd)?;
    cli.apply_to(&mut config.global);
    config.validate()?;
    let resolved = config.global.resolve();

    let mut files = expand_paths(&cli.paths, resolved.respect_gitignore);
    if !resolved.force {
        files.retain(|path| {
            let supported = is_supported(path);
            if !supported {
                debug!(path = %path.display(), "skipping unsupported file");
            }
            supported
        });
    }

    if files.is_empty() {
        eprintln!("No files found matching the provided patterns.");
        return Ok(ExitCode::SUCCESS);
    }

    info!(
        files = files.len(),
        threads = resolved.threads,
        mode = ?resolved.process.mode,
        "processing"
    );
    if cli.dry_run && resolved.process.mode == Mode::Strip {
        println!("Dry run mode - no files will be modified");
    }

    let processor = Processor::new(resolved.process.clone())?.with_force(resolved.force);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(resolved.threads)
        .build()
        .context("Failed to build thread pool")?;

    let writer = OutputWriter::new(cli.dry_run, cli.verbose)
        .with_backup(resolved.backup)
        .with_json(cli.json);
    let mut summary = RunSummary::default();

    // at most one batch is held in memory; batches are written in input order
    for batch in files.chunks(resolved.threads.max(1) * FILES_PER_THREAD) {
        let results: Vec<_> = pool.install(|| {
            batch
                .par_iter()
                .map(|path| (path, processor.process_file(path)))
                .collect()
        });

        for (path, result) in results {
            match result.and_then(|processed| {
                writer.write_file(&processed)?;
                Ok(processed)
            }) {
                Ok(processed) => summary.record(&processed),
                Err(err) => {
                    eprintln!("Error processing {}: {err:#}", path.display());
                    summary.record_failure();
                }
            }
        }
    }

    writer.print_summary(&summary);

    if summary.failed_files > 0 {
        Ok(ExitCode::from(2))
    } else if summary.modified_files > 0 {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

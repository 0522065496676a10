use std::path::PathBuf;
use std::process;
use std::thread;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use schemagen::emit::{read_source, run_target, Target};
use schemagen::error::{Error, Result};
use schemagen::settings::{OpenApiFormat, Settings};
use schemagen::validate::validate;

/// Render a YAML database schema into SQL, OpenAPI, ER diagram and workbook artifacts
#[derive(Parser, Debug)]
#[command(name = "schemagen", version, about, long_about = None)]
struct Args {
    /// Schema document (YAML)
    input: PathBuf,

    /// Output directory (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Only render these targets (default: all)
    #[arg(long, value_enum, value_delimiter = ',')]
    only: Vec<Target>,

    /// Config file (default: ./schemagen.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// OpenAPI serialization (overrides config)
    #[arg(long, value_enum)]
    openapi_format: Option<OpenApiFormat>,

    /// Report schema problems as warnings before rendering
    #[arg(long)]
    validate: bool,

    /// Refuse to render when validation finds problems
    #[arg(long)]
    strict: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "schemagen=debug" } else { "schemagen=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            tracing::error!("{}", e);
            process::exit(1);
        }
    }
}

/// Returns `false` when at least one target failed.
fn run(args: Args) -> Result<bool> {
    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(dir) = args.output {
        settings.output_dir = dir;
    }
    if let Some(format) = args.openapi_format {
        settings.openapi_format = format;
    }
    settings.validate |= args.validate;
    settings.strict |= args.strict;

    let source = read_source(&args.input)?;
    let doc = schemagen::load(&source)?;

    if settings.validate || settings.strict {
        let issues = validate(&doc);
        for issue in &issues {
            tracing::warn!("{}", issue);
        }
        if settings.strict && !issues.is_empty() {
            return Err(Error::Validation(issues));
        }
    }

    let targets: Vec<Target> = Target::ALL
        .into_iter()
        .filter(|t| args.only.is_empty() || args.only.contains(t))
        .collect();
    let today = chrono::Local::now().date_naive();

    // Every target is a pure function of `doc`; run them side by side and
    // wait for all of them before reporting.
    let results: Vec<(Target, Result<Vec<PathBuf>>)> = thread::scope(|scope| {
        let handles: Vec<_> = targets
            .iter()
            .map(|&target| {
                let doc = &doc;
                let settings = &settings;
                (target, scope.spawn(move || run_target(target, doc, settings, today)))
            })
            .collect();

        handles
            .into_iter()
            .map(|(target, handle)| {
                let result = handle
                    .join()
                    .unwrap_or_else(|payload| std::panic::resume_unwind(payload));
                (target, result)
            })
            .collect()
    });

    let mut failed = 0;
    for (target, result) in results {
        match result {
            Ok(paths) => {
                for path in paths {
                    println!("{}: {}", target.name(), path.display());
                }
            }
            Err(e) => {
                tracing::error!(artifact = target.name(), "{}", e);
                failed += 1;
            }
        }
    }

    Ok(failed == 0)
}

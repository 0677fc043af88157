use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use fractic_schedule_iii_notes::{errors::WriteError, util::ScheduleIiiNotesUtil};
use fractic_server_error::ServerError;
use tracing::{info, warn};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
struct Args {
    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Fill note templates from a trial balance
    Generate {
        /// Trial balance (.csv or .json)
        #[arg(short, long, value_name = "TRIAL_BALANCE")]
        trial_balance: PathBuf,

        /// Note templates: a JSON file or a directory of JSON files
        #[arg(short = 'n', long, value_name = "TEMPLATES")]
        templates: PathBuf,

        /// Mapping configuration (JSON or RON), merged over the default
        #[arg(short, long, value_name = "CONFIG")]
        config: Option<PathBuf>,

        /// Where to write the filled notes (default: stdout)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Also write figures, mapping summary and issues as JSON
        #[arg(long, value_name = "REPORT")]
        report: Option<PathBuf>,

        /// Print a plain-text summary to stderr
        #[arg(long)]
        summary: bool,

        /// Fail on unresolved placeholders and inconsistent totals
        #[arg(long)]
        strict: bool,
    },

    /// Classify trial balance accounts into notes, without templates
    Classify {
        /// Trial balance (.csv or .json)
        #[arg(short, long, value_name = "TRIAL_BALANCE")]
        trial_balance: PathBuf,

        /// Mapping configuration (JSON or RON), merged over the default
        #[arg(short, long, value_name = "CONFIG")]
        config: Option<PathBuf>,

        /// Where to write the classification (default: stdout)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Write the default mapping configuration
    InitConfig {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
}

async fn emit(output: Option<&Path>, content: &str) -> Result<(), ServerError> {
    match output {
        Some(path) => {
            tokio::fs::write(path, content)
                .await
                .map_err(|e| WriteError::with_debug(&e))?;
            info!(path = %path.display(), "wrote output");
            Ok(())
        }
        None => {
            println!("{}", content);
            Ok(())
        }
    }
}

async fn run(args: Args) -> Result<(), ServerError> {
    match args.command {
        Command::Generate {
            trial_balance,
            templates,
            config,
            output,
            report,
            summary,
            strict,
        } => {
            let util = if strict {
                ScheduleIiiNotesUtil::strict()
            } else {
                ScheduleIiiNotesUtil::new()
            };
            let (generated, json) = util
                .from_file(trial_balance, templates, config)
                .await?;
            emit(output.as_deref(), &json).await?;
            if let Some(report) = report {
                emit(Some(&report), &util.report_json(&generated)?).await?;
            }
            if summary {
                eprintln!("{}", util.summary(&generated));
            }
            if generated.has_blocking_issues() {
                warn!("some notes are incomplete or inconsistent; see the reported issues");
            }
            Ok(())
        }
        Command::Classify {
            trial_balance,
            config,
            output,
        } => {
            let (classification, json) = ScheduleIiiNotesUtil::new()
                .classify_file(trial_balance, config)
                .await?;
            info!(
                mapped = classification.summary.mapped_records,
                unmapped = classification.summary.unmapped_records,
                "classification done"
            );
            emit(output.as_deref(), &json).await
        }
        Command::InitConfig { path } => {
            ScheduleIiiNotesUtil::write_default_config(&path).await?;
            info!(path = %path.display(), "wrote default configuration");
            Ok(())
        }
    }
}

/// Default level from `-v`, applied to every target (the library and this
/// binary log under different names). `RUST_LOG` directives, when set,
/// replace it.
fn log_filter(verbose: u8, directives: &str) -> EnvFilter {
    let level = match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(directives)
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let filter = log_filter(
        args.verbose,
        &std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default(),
    );
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args).await {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_sets_the_default_level() {
        assert_eq!(log_filter(0, "").max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(log_filter(1, "").max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(log_filter(3, "").max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn default_filter_is_not_scoped_to_the_library() {
        // A bare level directive matches this binary's target as well.
        assert_eq!(log_filter(0, "").to_string(), "info");
    }

    #[test]
    fn env_directives_replace_the_default() {
        let filter = log_filter(0, "fractic_schedule_iii_notes=trace");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }
}

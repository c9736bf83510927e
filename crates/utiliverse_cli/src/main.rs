//! `utiliverse` command-line front end.
//!
//! # Responsibility
//! - Resolve data, store and log locations, then start logging.
//! - Play the listing page and every tool page as subcommands.
//!
//! # Invariants
//! - Exit status `2` means the input was rejected with a form message.
//! - Exit status `1` means an infrastructure failure (store, files, logging).
//! - Degraded platform actions print a notice and still exit `0`.

mod commands;
mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::age::AgeArgs;
use commands::bmi::BmiArgs;
use commands::cache::CacheAction;
use commands::convert::ConvertArgs;
use commands::qr::QrArgs;
use config::Paths;
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;
use utiliverse_core::{default_log_level, init_logging, AppContext, LoggingConfig, ServiceError};

const FORM_REJECTED: u8 = 2;
const INFRASTRUCTURE_FAILURE: u8 = 1;

#[derive(Debug, Parser)]
#[command(name = "utiliverse", version, about = "Small everyday tools in one place")]
struct Cli {
    /// Directory holding the store and, by default, the logs
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error (default: debug in debug builds, info otherwise)
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Directory for rolling log files (default: <data dir>/logs)
    #[arg(long, global = true, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Mirror warnings to stderr
    #[arg(long, global = true)]
    log_stderr: bool,

    /// Use a throwaway in-memory store; nothing is remembered
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every tool in catalog order
    List,
    /// Fuzzy-search the catalog by title, description and tags
    Search {
        /// Search text; blank lists everything
        #[arg(default_value = "")]
        query: String,
    },
    /// Show a tool's header by id or route
    Show {
        /// Tool id (e.g. `unit-converter`) or route (`/tools/unit-converter`)
        id: String,
    },
    /// Age calculator
    Age(AgeArgs),
    /// BMI calculator
    Bmi(BmiArgs),
    /// Unit converter
    Convert(ConvertArgs),
    /// List conversion categories, or the units of one category
    Units {
        /// Category name, e.g. `Length`
        category: Option<String>,
    },
    /// QR code generator
    Qr(QrArgs),
    /// Manage remembered inputs
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err),
    }
}

fn run(cli: Cli) -> Result<()> {
    let paths = Paths::resolve(cli.data_dir.as_deref(), cli.log_dir.as_deref())?;
    let logging = LoggingConfig {
        level: cli
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string()),
        log_dir: paths.log_dir.clone(),
        echo_warnings: cli.log_stderr,
    };
    init_logging(&logging)
        .map_err(anyhow::Error::msg)
        .context("failed to initialize logging")?;

    let ctx = if cli.ephemeral {
        AppContext::open_in_memory()?
    } else {
        AppContext::open(&paths.store)
            .with_context(|| format!("failed to open store `{}`", paths.store.display()))?
    };
    info!(
        "event=cli_start module=cli status=ok ephemeral={}",
        cli.ephemeral
    );

    match cli.command {
        Command::List => commands::catalog::list(&ctx),
        Command::Search { query } => commands::catalog::search(&ctx, &query),
        Command::Show { id } => commands::catalog::show(&ctx, &id),
        Command::Age(args) => commands::age::run(&ctx, args),
        Command::Bmi(args) => commands::bmi::run(&ctx, args),
        Command::Convert(args) => commands::convert::run(&ctx, args),
        Command::Units { category } => commands::convert::list_units(category.as_deref()),
        Command::Qr(args) => commands::qr::run(&ctx, args),
        Command::Cache { action } => commands::cache::run(&ctx, action),
    }
}

/// Prints `err` and maps it to the exit status.
fn report(err: &anyhow::Error) -> ExitCode {
    let (status, message) = classify(err);
    eprintln!("{message}");
    ExitCode::from(status)
}

/// Exit status and stderr line for a failed run.
///
/// Form rejections are found through any context added on the way up.
fn classify(err: &anyhow::Error) -> (u8, String) {
    match err
        .downcast_ref::<ServiceError>()
        .and_then(ServiceError::as_form)
    {
        Some(form) => (FORM_REJECTED, form.to_string()),
        None => (INFRASTRUCTURE_FAILURE, format!("Error: {err:#}")),
    }
}

#[cfg(test)]
mod tests {
    use super::{classify, commands, Cli, Command, FORM_REJECTED, INFRASTRUCTURE_FAILURE};
    use anyhow::anyhow;
    use clap::{CommandFactory, Parser};
    use utiliverse_core::tools::qr::QrError;
    use utiliverse_core::{AppContext, FormError, ServiceError};

    fn qr_args(argv: &[&str]) -> commands::qr::QrArgs {
        let mut full = vec!["utiliverse", "qr"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Command::Qr(args) => args,
            other => panic!("expected qr command, got {other:?}"),
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_are_accepted_after_the_subcommand() {
        let cli = Cli::try_parse_from(["utiliverse", "list", "--ephemeral", "--log-level", "warn"])
            .unwrap();
        assert!(cli.ephemeral);
        assert_eq!(cli.log_level.as_deref(), Some("warn"));
        assert!(matches!(cli.command, Command::List));
    }

    #[test]
    fn negative_values_reach_the_converter() {
        let cli = Cli::try_parse_from([
            "utiliverse",
            "convert",
            "--value",
            "-40",
            "--precision",
            "-1",
        ]);
        assert!(cli.is_ok());
    }

    #[test]
    fn qr_reset_conflicts_with_text() {
        let cli = Cli::try_parse_from(["utiliverse", "qr", "--reset", "--text", "hi"]);
        assert!(cli.is_err());
    }

    #[test]
    fn qr_export_paths_are_optional() {
        let cli = Cli::try_parse_from(["utiliverse", "qr", "--svg", "--png", "out.png"]).unwrap();
        assert!(matches!(cli.command, Command::Qr(_)));
    }

    #[test]
    fn form_rejection_exits_two_through_context() {
        let err = anyhow::Error::from(ServiceError::from(FormError::InvalidNumber))
            .context("while converting")
            .context("outer");
        assert_eq!(
            classify(&err),
            (FORM_REJECTED, "Please enter a valid number.".to_string())
        );
    }

    #[test]
    fn infrastructure_failure_exits_one_with_its_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err = anyhow::Error::from(ServiceError::from(QrError::Io(io)))
            .context("failed to open store `x`");
        let (status, message) = classify(&err);
        assert_eq!(status, INFRASTRUCTURE_FAILURE);
        assert!(message.starts_with("Error: failed to open store `x`"), "{message}");
        assert!(message.contains("disk full"), "{message}");
    }

    #[test]
    fn plain_errors_exit_one() {
        let err = anyhow!("unknown tool `nope`");
        assert_eq!(
            classify(&err),
            (INFRASTRUCTURE_FAILURE, "Error: unknown tool `nope`".to_string())
        );

        let err = anyhow!("boom").context("outer");
        assert_eq!(classify(&err).0, INFRASTRUCTURE_FAILURE);
    }

    #[test]
    fn rejected_command_input_maps_to_form_status() {
        let ctx = AppContext::open_in_memory().unwrap();
        let err = commands::qr::run(&ctx, qr_args(&["--text", "hi", "--size", "300"])).unwrap_err();
        assert_eq!(
            classify(&err),
            (
                FORM_REJECTED,
                "QR code size must be between 64 and 256 pixels.".to_string()
            )
        );
    }

    #[test]
    fn degraded_platform_actions_still_succeed() {
        let ctx = AppContext::open_in_memory().unwrap();
        let args = qr_args(&["--text", "hi", "--copy", "--share", "--copy-text"]);
        assert!(commands::qr::run(&ctx, args).is_ok());
    }
}

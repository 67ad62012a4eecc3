//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the artifact store
//! - runs the assessment pipeline
//! - prints the status card / charts, or hands off to the TUI / HTTP shells

use clap::Parser;

use crate::assets::{self, AssetStore};
use crate::cli::{AssessArgs, Command};
use crate::domain::ApplicantProfile;
use crate::error::AppError;
use crate::{io, plot, report};

pub mod pipeline;

use pipeline::AssessmentOutcome;

/// Entry point for the `cg` binary.
pub fn run() -> Result<(), AppError> {
    // We want a bare `cg` to behave like `cg tui`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while keeping the friendliest default.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Assess(args) => handle_assess(args),
        Command::Tui(args) => crate::tui::run(args),
        Command::Serve(args) => crate::serve::run(args),
    }
}

fn handle_assess(args: AssessArgs) -> Result<(), AppError> {
    // Keep stdout clean for the card; warnings still reach stderr.
    init_logging("warn");

    let dir = assets::resolve_asset_dir(args.assets.as_deref());
    let store = AssetStore::load(&dir);
    let profile = profile_from_args(&args);

    match pipeline::run_assessment(&store, &profile)? {
        AssessmentOutcome::Unavailable => {
            println!("{}", report::UNAVAILABLE_MESSAGE);
            let reason = store
                .degraded_reason()
                .unwrap_or("artifact store degraded")
                .to_string();
            Err(AppError::new(3, reason))
        }
        AssessmentOutcome::Ready(out) => {
            print!("{}", report::format_status_card(&out.summary, &out.notes));
            println!();
            print!("{}", plot::render_chart(&out.gauge, args.width));
            println!();
            print!("{}", plot::render_chart(&out.dti, args.width));

            if let Some(path) = &args.export {
                io::export::write_assessment_json(path, &out)?;
            }
            Ok(())
        }
    }
}

/// Build the applicant profile from CLI flags.
pub fn profile_from_args(args: &AssessArgs) -> ApplicantProfile {
    ApplicantProfile {
        age: args.age,
        annual_income: args.income,
        loan_amount: args.loan,
        credit_score: args.score,
        employment_years: args.employment,
        home_ownership: args.housing.label().to_string(),
        loan_intent: args.purpose.label().to_string(),
        prior_default: args.prior_default,
    }
}

/// Initialize env_logger once, with an overridable default filter.
pub fn init_logging(default_filter: &str) {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter),
    )
    .try_init();
}

/// Rewrite argv so `cg` defaults to `cg tui`.
///
/// Rules:
/// - `cg`                      -> `cg tui`
/// - `cg --assets DIR ...`     -> `cg tui --assets DIR ...`
/// - `cg --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "assess" | "tui" | "serve");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

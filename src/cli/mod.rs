//! Command-line parsing for the credit risk terminal.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the scoring/presentation code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{HomeOwnership, LoanIntent};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "cg", version, about = "Credit Risk Screening Terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Assess one applicant and print the status card plus both charts.
    Assess(AssessArgs),
    /// Launch the interactive TUI form.
    ///
    /// This uses the same underlying pipeline as `cg assess`, but renders the
    /// form and charts in a terminal UI using Ratatui.
    Tui(TuiArgs),
    /// Serve the assessment API over HTTP (one POST endpoint plus health).
    Serve(ServeArgs),
}

/// Applicant inputs plus output options for one-shot assessment.
///
/// Defaults mirror the original intake form.
#[derive(Debug, Parser, Clone)]
pub struct AssessArgs {
    /// Applicant age in years.
    #[arg(long, default_value_t = 30.0)]
    pub age: f64,

    /// Annual income ($).
    #[arg(long, default_value_t = 55_000.0)]
    pub income: f64,

    /// Requested loan amount ($).
    #[arg(long, default_value_t = 15_000.0)]
    pub loan: f64,

    /// FICO credit score.
    #[arg(long, default_value_t = 680.0)]
    pub score: f64,

    /// Employment length in years.
    #[arg(long, default_value_t = 5.0)]
    pub employment: f64,

    /// Housing situation.
    #[arg(long, value_enum, default_value_t = HomeOwnership::Rent)]
    pub housing: HomeOwnership,

    /// Loan purpose.
    #[arg(long, value_enum, default_value_t = LoanIntent::Personal)]
    pub purpose: LoanIntent,

    /// Applicant has defaulted on a prior loan.
    #[arg(long)]
    pub prior_default: bool,

    /// Directory containing the model artifact files.
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Chart width (columns).
    #[arg(long, default_value_t = 60)]
    pub width: usize,

    /// Export the full assessment response to JSON.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Options for the interactive TUI.
#[derive(Debug, Parser, Clone)]
pub struct TuiArgs {
    /// Directory containing the model artifact files.
    #[arg(long)]
    pub assets: Option<PathBuf>,
}

/// Options for the HTTP shell.
#[derive(Debug, Parser, Clone)]
pub struct ServeArgs {
    /// Directory containing the model artifact files.
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Port to bind (overrides the PORT environment variable; default 7860).
    #[arg(long)]
    pub port: Option<u16>,
}

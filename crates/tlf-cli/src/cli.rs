//! CLI argument definitions for the `tlf` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tlf_model::{CountOptions, MissingGroupPolicy};

#[derive(Parser)]
#[command(
    name = "tlf",
    version,
    about = "Subject and event counts for clinical summary tables",
    long_about = "Count subjects and events by treatment group.\n\n\
                  Reads a subject-level population CSV and an event-level observation CSV,\n\
                  prints the summary table and optionally writes the long-format ARD."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the number of subjects in each treatment group.
    Subjects(SubjectsArgs),

    /// Count events by group and category and print the summary table.
    Count(CountArgs),
}

/// Population input shared by every command.
#[derive(Args)]
pub struct PopulationArgs {
    /// Subject-level CSV, one row per subject.
    #[arg(long = "population", value_name = "FILE")]
    pub population: PathBuf,

    /// Subject identifier column.
    #[arg(long = "id", value_name = "COL", default_value = "USUBJID")]
    pub id: String,

    /// Treatment group column.
    #[arg(long = "group", value_name = "COL", default_value = "TRT01A")]
    pub group: String,

    /// Do not add a Total column.
    #[arg(long = "no-total")]
    pub no_total: bool,

    /// What to do with subjects whose group is blank: error, ignore or fill.
    #[arg(long = "missing-group", value_name = "POLICY", default_value = "error")]
    pub missing_group: MissingGroupPolicy,
}

impl PopulationArgs {
    pub fn options(&self) -> CountOptions {
        CountOptions::default()
            .with_total(!self.no_total)
            .with_missing_group(self.missing_group)
    }
}

#[derive(Parser)]
pub struct SubjectsArgs {
    #[command(flatten)]
    pub population: PopulationArgs,
}

#[derive(Parser)]
pub struct CountArgs {
    #[command(flatten)]
    pub population: PopulationArgs,

    /// Event-level CSV, one row per event.
    #[arg(long = "observation", value_name = "FILE")]
    pub observation: PathBuf,

    /// Category column, repeat for a hierarchy (e.g. AEBODSYS then AEDECOD).
    #[arg(long = "category", value_name = "COL", required = true)]
    pub category: Vec<String>,

    /// Decimal places kept in percentages.
    #[arg(long = "pct-digits", value_name = "N", default_value_t = 1)]
    pub pct_digits: u32,

    /// Fixed width for subject counts (inferred from the data by default).
    #[arg(long = "n-width", value_name = "N")]
    pub n_width: Option<usize>,

    /// Label of the population row.
    #[arg(
        long = "population-label",
        value_name = "TEXT",
        default_value = "Participants in Population"
    )]
    pub population_label: String,

    /// Add a "subjects with one or more events" row with this label.
    #[arg(long = "any-label", value_name = "TEXT")]
    pub any_label: Option<String>,

    /// Header of the row label column.
    #[arg(long = "index-header", value_name = "TEXT", default_value = "Term")]
    pub index_header: String,

    /// Write the long-format ARD to this file.
    #[arg(long = "ard-out", value_name = "FILE")]
    pub ard_out: Option<PathBuf>,

    /// Format of the ARD file.
    #[arg(long = "ard-format", value_enum, default_value = "csv")]
    pub ard_format: ArdFormatArg,
}

impl CountArgs {
    pub fn options(&self) -> CountOptions {
        self.population
            .options()
            .with_pct_digits(self.pct_digits)
            .with_max_n_width(self.n_width)
    }
}

/// ARD file formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ArdFormatArg {
    Csv,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

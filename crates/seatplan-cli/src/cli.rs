use clap::{Args, Parser, Subcommand};
use seatplan::core::models::constraint::{ConstraintKind, GenderMode, RowPreference};
use std::path::{Path, PathBuf};

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Seatplan Contributors",
    version,
    about = "seatplan - arrange a class roster into paired classroom desks.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output and progress display
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Layout settings in TOML format (see `[layout]`)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a plan from a roster CSV (name, gender per row) and arrange it.
    Import(ImportArgs),
    /// Shuffle and re-optimize the layout. Manual placements stay where they are.
    Arrange {
        #[command(flatten)]
        target: PlanTarget,
        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Add or replace a ban/prefer relation between two students.
    Constrain {
        #[command(flatten)]
        target: PlanTarget,
        /// Relation kind: ban or prefer.
        #[arg(value_name = "KIND")]
        kind: ConstraintKind,
        /// First student (id, "Last, First" or "First Last").
        #[arg(value_name = "STUDENT")]
        a: String,
        /// Second student.
        #[arg(value_name = "STUDENT")]
        b: String,
        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Remove the relation between two students, if there is one.
    Unconstrain {
        #[command(flatten)]
        target: PlanTarget,
        #[arg(value_name = "STUDENT")]
        a: String,
        #[arg(value_name = "STUDENT")]
        b: String,
        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Set how desk pairs are composed by gender: none, same or different.
    GenderMode {
        #[command(flatten)]
        target: PlanTarget,
        #[arg(value_name = "MODE")]
        mode: GenderMode,
        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Set a student's row preference: front, back or none.
    RowPref {
        #[command(flatten)]
        target: PlanTarget,
        #[arg(value_name = "STUDENT")]
        student: String,
        #[arg(value_name = "PREFERENCE")]
        preference: RowPreference,
        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Seat a student by hand and pin them there. Rows and columns count from 1
    /// (row 1 is the front).
    Move {
        #[command(flatten)]
        target: PlanTarget,
        #[arg(value_name = "STUDENT")]
        student: String,
        #[arg(value_name = "ROW")]
        row: usize,
        #[arg(value_name = "COL")]
        col: usize,
    },
    /// Release a manual placement and re-optimize.
    Unpin {
        #[command(flatten)]
        target: PlanTarget,
        #[arg(value_name = "STUDENT")]
        student: String,
        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Change the room shape. The column count must be even.
    Resize {
        #[command(flatten)]
        target: PlanTarget,
        #[arg(value_name = "ROWS")]
        rows: usize,
        #[arg(value_name = "COLS")]
        cols: usize,
        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Set the class name.
    Rename {
        #[command(flatten)]
        target: PlanTarget,
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Print the seating chart, roster and constraint summary.
    Show {
        /// Path to the plan file.
        #[arg(value_name = "PLAN")]
        plan: PathBuf,
    },
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Import(_) => "import",
            Commands::Arrange { .. } => "arrange",
            Commands::Constrain { .. } => "constrain",
            Commands::Unconstrain { .. } => "unconstrain",
            Commands::GenderMode { .. } => "gender-mode",
            Commands::RowPref { .. } => "row-pref",
            Commands::Move { .. } => "move",
            Commands::Unpin { .. } => "unpin",
            Commands::Resize { .. } => "resize",
            Commands::Rename { .. } => "rename",
            Commands::Show { .. } => "show",
        }
    }
}

/// Arguments for the `import` subcommand.
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Roster CSV file.
    #[arg(value_name = "CSV")]
    pub roster: PathBuf,

    /// Where to write the new plan.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Class name stored in the plan.
    #[arg(long, value_name = "NAME")]
    pub class_name: Option<String>,

    /// Abort instead of skipping rows that cannot be parsed.
    #[arg(long)]
    pub strict: bool,

    #[command(flatten)]
    pub layout: LayoutArgs,
}

/// The plan file an editing command reads and rewrites.
#[derive(Args, Debug, Clone)]
pub struct PlanTarget {
    /// Path to the plan file.
    #[arg(value_name = "PLAN")]
    pub plan: PathBuf,

    /// Write the updated plan here instead of overwriting PLAN.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl PlanTarget {
    pub fn output_path(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.plan)
    }
}

/// Layout overrides shared by every command that regenerates the seating.
#[derive(Args, Debug, Clone, Default)]
pub struct LayoutArgs {
    /// Seed the shuffle for a reproducible layout.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Override the maximum number of improvement passes.
    #[arg(long, value_name = "INT")]
    pub max_passes: Option<usize>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S layout.max-passes=500
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

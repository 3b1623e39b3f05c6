use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "frcforge",
    about = "MSI/BIOSYM FRC force field extraction and normalization",
    version,
    author,
    before_help = crate::display::banner(),
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert an FRC file and summarize the normalized force field
    #[command(visible_alias = "s")]
    Summary(SummaryArgs),

    /// Convert an FRC file and report problems only
    #[command(visible_alias = "c")]
    Check(CheckArgs),
}

impl Command {
    pub fn io(&self) -> &IoOptions {
        match self {
            Self::Summary(args) => &args.io,
            Self::Check(args) => &args.io,
        }
    }
}

/// I/O options shared by all commands.
#[derive(Args)]
pub struct IoOptions {
    /// Input FRC file (stdin if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Suppress progress output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,
}

/// Conversion options shared by all commands.
#[derive(Args)]
#[command(next_help_heading = "Conversion")]
pub struct ConvertOptions {
    /// Conversion settings (TOML file); flags below override it
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Keep only these atom types (comma-separated names)
    #[arg(long, value_name = "TYPE", value_delimiter = ',')]
    pub atoms: Vec<String>,

    /// Keep auto-generalized interactions, bond increments and equivalences
    #[arg(long)]
    pub auto: bool,

    /// Equivalence classes attached to atom types (defaults follow --auto)
    #[arg(long, value_name = "MODE")]
    pub equivalences: Option<EquivalenceMode>,

    /// Characters that start a comment
    #[arg(long, value_name = "CHARS")]
    pub comment_chars: Option<String>,
}

/// Functional-form selection shared by all commands.
#[derive(Args)]
#[command(next_help_heading = "Styles")]
pub struct StyleOptions {
    /// Bond functional form (all forms if omitted)
    #[arg(long, value_name = "STYLE")]
    pub bond_style: Option<BondStyle>,

    /// Angle functional form (all forms if omitted)
    #[arg(long, value_name = "STYLE")]
    pub angle_style: Option<AngleStyle>,

    /// Dihedral functional form (all forms if omitted)
    #[arg(long, value_name = "STYLE")]
    pub dihedral_style: Option<DihedralStyle>,

    /// Improper functional form (all forms if omitted)
    #[arg(long, value_name = "STYLE")]
    pub improper_style: Option<ImproperStyle>,

    /// Non-bonded pair form (all forms if omitted)
    #[arg(long, value_name = "STYLE")]
    pub pair_style: Option<PairStyle>,
}

#[derive(Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub io: IoOptions,

    /// Rows to show per interaction table (0 hides the tables)
    #[arg(long, value_name = "N", default_value = "10")]
    pub limit: usize,

    #[command(flatten)]
    pub convert: ConvertOptions,

    #[command(flatten)]
    pub styles: StyleOptions,
}

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub io: IoOptions,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,

    #[command(flatten)]
    pub convert: ConvertOptions,

    #[command(flatten)]
    pub styles: StyleOptions,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum EquivalenceMode {
    /// Explicit classes only
    Explicit,
    /// Explicit and auto classes
    #[value(name = "with-auto", alias = "auto")]
    WithAuto,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum BondStyle {
    /// #quadratic_bond
    Harmonic,
    /// #quartic_bond
    Class2,
    /// #morse_bond
    Morse,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum AngleStyle {
    /// #quadratic_angle
    Harmonic,
    /// #quartic_angle and its cross terms
    Class2,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DihedralStyle {
    /// #torsion_1
    Charmm,
    /// #torsion_3 and its cross terms
    Class2,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ImproperStyle {
    /// #out_of_plane
    Cvff,
    /// #wilson_out_of_plane and #angle-angle
    Class2,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PairStyle {
    /// #nonbond(12-6)
    #[value(name = "lj/cut", alias = "lj")]
    LjCut,
    /// #nonbond(9-6)
    Class2,
}

pub fn parse() -> Cli {
    Cli::parse()
}

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use infracheck::Category;

/// infracheck - verify architectural properties of a Terraform AWS/EKS template
#[derive(Parser, Debug)]
#[command(name = "infracheck")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Run 'infracheck' without arguments to check every property.")]
pub struct Cli {
    /// Emit NDJSON events instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Color output
    #[arg(long, value_enum, global = true)]
    pub color: Option<ColorWhen>,

    /// Disable progress animation
    #[arg(long, global = true)]
    pub no_animation: bool,

    /// Template root (discovered from the current directory by default)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate properties against the template (default)
    Check(CheckArgs),

    /// List the property catalog
    List {
        /// Only list these categories
        #[arg(long = "category", value_enum)]
        categories: Vec<Category>,
    },

    /// Describe what a property expects
    Explain {
        /// Property id (e.g. backend.native-locking)
        id: String,
    },
}

#[derive(clap::Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct CheckArgs {
    /// Run only these property ids
    #[arg(long = "only", value_name = "ID")]
    pub only: Vec<String>,

    /// Run only these categories
    #[arg(long = "category", value_enum, value_name = "CAT")]
    pub categories: Vec<Category>,

    /// Cases drawn per sampled property
    #[arg(long)]
    pub cases: Option<u32>,

    /// RNG seed for sampled properties
    #[arg(long)]
    pub seed: Option<u64>,

    /// Evaluate properties sequentially
    #[arg(long)]
    pub no_parallel: bool,
}

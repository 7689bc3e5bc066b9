use std::path::PathBuf;

use clap::{ArgAction, ColorChoice, Parser};

use super::options::{Assignment, OutputFormat};
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `facetkit` binary.
#[derive(Parser, Debug)]
#[command(
    name = "facetkit",
    version,
    long_version = long_version(),
    about = "Run a faceted-search widget layout against JSON records",
    color = ColorChoice::Auto,
    styles = cli_styles()
)]
pub(crate) struct CliArgs {
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "FACETKIT_CONFIG",
        action = ArgAction::Append,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub(crate) no_config: bool,
    #[arg(
        short = 'r',
        long,
        value_name = "FILE",
        help = "JSON array of records to search (default: from configuration)"
    )]
    pub(crate) records: Option<PathBuf>,
    #[arg(
        short = 'i',
        long,
        value_name = "NAME",
        help = "Index to search (default: products)"
    )]
    pub(crate) index: Option<String>,
    #[arg(
        short = 'q',
        long,
        value_name = "QUERY",
        help = "Full-text query (default: empty)"
    )]
    pub(crate) query: Option<String>,
    #[arg(
        long,
        value_name = "CONTAINER=VALUE",
        action = ArgAction::Append,
        help = "Toggle a menu value after the first search"
    )]
    pub(crate) toggle: Vec<Assignment>,
    #[arg(
        long,
        value_name = "CONTAINER=LO:HI",
        action = ArgAction::Append,
        help = "Move a range slider's handles; an empty side keeps it open"
    )]
    pub(crate) range: Vec<Assignment>,
    #[arg(
        long,
        value_name = "CONTAINER=FROM:TO",
        action = ArgAction::Append,
        help = "Refine a price range; an empty side keeps it open"
    )]
    pub(crate) price: Vec<Assignment>,
    #[arg(
        long,
        value_name = "CONTAINER=INDEX",
        action = ArgAction::Append,
        help = "Switch the index through a sort-by selector"
    )]
    pub(crate) select: Vec<Assignment>,
    #[arg(
        short = 'p',
        long = "print-config",
        help = "Print the resolved configuration before running (default: disabled)"
    )]
    pub(crate) print_config: bool,
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        help = "Increase log verbosity on stderr (repeatable)"
    )]
    pub(crate) verbose: u8,
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t = OutputFormat::Plain,
        help = "Choose how to print the result"
    )]
    pub(crate) output: OutputFormat,
}

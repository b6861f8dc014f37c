// CLI module
// Command-line interface and argument parsing

mod args;

pub use args::CliArgs;

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (missing paths, extra arguments, or the --help flag),
/// clap displays an error or help text and exits the process with a
/// non-zero status.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

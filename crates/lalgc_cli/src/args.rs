//! the args for running lalgc

use lalg_cli_common::LoggingArgs;
use std::path::PathBuf;

/// The args struct
#[derive(Debug, clap::Parser)]
#[clap(
    author,
    version,
    about = "Compiles lalg programs into three-address code listings"
)]
pub struct Args {
    #[command(flatten)]
    logging: LoggingArgs,

    /// The source file to compile
    #[clap(value_name = "SOURCE", value_hint = clap::ValueHint::FilePath)]
    pub source: PathBuf,
    /// Write the listing to this file instead of stdout
    #[clap(short = 'o', long = "output", value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
    /// Don't start the listing with the `operator; argument1; argument2; result` row
    #[clap(long = "no-header")]
    pub no_header: bool,
    /// Prefix every instruction with its index
    #[clap(long = "line-numbers")]
    pub line_numbers: bool,
    /// Print every token of the source instead of compiling it
    #[clap(long = "tokens")]
    pub tokens: bool,
}

impl Args {
    pub fn logging(&self) -> &LoggingArgs {
        &self.logging
    }

    /// Whether the listing is printed on stdout
    pub fn listing_on_stdout(&self) -> bool {
        self.tokens || self.output.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::Path;

    #[test]
    fn test_args_parsing() {
        let test = "lalgc input.txt";
        let args = Args::try_parse_from(test.split(" ")).expect("could not parse test string");
        assert_eq!(args.source, Path::new("input.txt"));
        assert_eq!(args.output, None);
        assert!(!args.no_header);
        assert!(!args.line_numbers);
        assert!(args.listing_on_stdout());
    }

    #[test]
    fn test_output_and_flags() {
        let test = "lalgc -vv input.txt -o output.txt --no-header --line-numbers";
        let args = Args::try_parse_from(test.split(" ")).expect("could not parse test string");
        assert_eq!(args.output.as_deref(), Some(Path::new("output.txt")));
        assert!(args.no_header);
        assert!(args.line_numbers);
        assert_eq!(args.logging().verbosity(), 2);
        assert!(!args.listing_on_stdout());
    }

    #[test]
    fn test_source_is_required() {
        assert!(Args::try_parse_from(["lalgc", "-q"]).is_err());
    }
}

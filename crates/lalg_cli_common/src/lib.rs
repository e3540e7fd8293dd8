#![doc = include_str!("../README.md")]

use clap::{value_parser, ArgAction, Args};

/// Common way to set logging levels.
///
/// `-v` and `-q` can each be given up to twice and can not be mixed.
#[derive(Debug, Default, Clone, Copy, Args)]
pub struct LoggingArgs {
    /// Log more, `-vv` logs every token and non terminal
    #[clap(short = 'v', long = "verbose", value_parser = value_parser!(u8).range(0..=2), action=ArgAction::Count, conflicts_with="quiet")]
    verbose: u8,
    /// Log less, `-qq` turns logging off
    #[clap(short = 'q', long = "quiet", value_parser = value_parser!(u8).range(0..=2), action=ArgAction::Count, conflicts_with="verbose")]
    quiet: u8,
}

impl LoggingArgs {
    /// How far from the default level the flags move logging, from `-2` to `2`
    pub fn verbosity(&self) -> i8 {
        self.verbose as i8 - self.quiet as i8
    }

    /// Gets the logging level based on whether `-v[v]` or `-q[q]` has been used,
    #[cfg(feature = "tracing")]
    pub fn log_level_filter(&self) -> tracing::level_filters::LevelFilter {
        use tracing::level_filters::LevelFilter;
        match self.verbosity() {
            i8::MIN..=-2 => LevelFilter::OFF,
            -1 => LevelFilter::ERROR,
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            2..=i8::MAX => LevelFilter::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Cli {
        #[command(flatten)]
        logging: LoggingArgs,
    }

    fn verbosity(args: &str) -> Result<i8, clap::Error> {
        Cli::try_parse_from(args.split_whitespace()).map(|cli| cli.logging.verbosity())
    }

    #[test]
    fn test_verbosity() {
        assert_eq!(verbosity("lalgc").unwrap(), 0);
        assert_eq!(verbosity("lalgc -v").unwrap(), 1);
        assert_eq!(verbosity("lalgc -vv").unwrap(), 2);
        assert_eq!(verbosity("lalgc -q").unwrap(), -1);
        assert_eq!(verbosity("lalgc --quiet --quiet").unwrap(), -2);
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(verbosity("lalgc -v -q").is_err());
        assert!(verbosity("lalgc --verbose --quiet").is_err());
    }

    #[test]
    #[cfg(feature = "tracing")]
    fn test_level_filter() {
        use tracing::level_filters::LevelFilter;
        let cli = Cli::try_parse_from(["lalgc", "-qq"]).unwrap();
        assert_eq!(cli.logging.log_level_filter(), LevelFilter::OFF);
        assert_eq!(LoggingArgs::default().log_level_filter(), LevelFilter::INFO);
    }
}

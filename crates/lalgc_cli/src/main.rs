use crate::args::Args;
use clap::Parser;
use lalgc::Lalgc;
use owo_colors::OwoColorize;
use owo_colors::Stream;
use std::fmt::Display;
use std::io;
use std::io::{stderr, stdout, Stderr, StderrLock, Stdout, StdoutLock, Write as _};
use tracing::metadata::LevelFilter;
use tracing::{debug, trace, Level, Metadata};
use tracing_error::ErrorLayer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{Layer, Registry};

mod args;

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(args.logging().log_level_filter(), args.listing_on_stdout())?;
    trace!("starting lalgc with args: {args:?}");
    debug!("lalgc version: {}", env!("CARGO_PKG_VERSION"));

    let mut builder = Lalgc::builder()
        .header(!args.no_header)
        .line_numbers(args.line_numbers);
    if let Some(output) = &args.output {
        builder = builder.output(output);
    }
    let lalgc = builder.build()?;

    if args.tokens {
        let tokens = lalgc.tokenize(&args.source)?;
        let mut stdout = stdout().lock();
        for token in tokens {
            writeln!(stdout, "{}", describe_token(token.text(), token.kind()))?;
        }
        return Ok(());
    }

    let compilation = lalgc.compile(&args.source)?;
    lalgc.write_output(&compilation)?;

    Ok(())
}

/// Describes a token, with its kind highlighted when stdout supports colors
fn describe_token(text: &str, kind: impl Display) -> String {
    format!(
        "Token '{}' is a {}.",
        text,
        kind.if_supports_color(Stream::Stdout, |kind| kind.cyan())
    )
}

/// Sends warnings and errors to stderr. Everything else goes to stdout, unless stdout is
/// reserved for the listing.
struct MyWriter {
    stdout: Stdout,
    stderr: Stderr,
    stdout_reserved: bool,
}

enum StdioLock<'a> {
    Stdout(StdoutLock<'a>),
    Stderr(StderrLock<'a>),
}

impl<'a> io::Write for StdioLock<'a> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            StdioLock::Stdout(stdout) => stdout.write(buf),
            StdioLock::Stderr(stderr) => stderr.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            StdioLock::Stdout(stdout) => stdout.flush(),
            StdioLock::Stderr(stderr) => stderr.flush(),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            StdioLock::Stdout(stdout) => stdout.write_all(buf),
            StdioLock::Stderr(stderr) => stderr.write_all(buf),
        }
    }
}

impl<'a> MakeWriter<'a> for MyWriter {
    type Writer = StdioLock<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        StdioLock::Stderr(self.stderr.lock())
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        if self.stdout_reserved || *meta.level() <= Level::WARN {
            StdioLock::Stderr(self.stderr.lock())
        } else {
            StdioLock::Stdout(self.stdout.lock())
        }
    }
}

fn init_logging(level_filter: LevelFilter, stdout_reserved: bool) -> eyre::Result<()> {
    let registry = Registry::default()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(MyWriter {
                    stdout: stdout(),
                    stderr: stderr(),
                    stdout_reserved,
                })
                .with_filter(level_filter),
        )
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(registry)?;

    Ok(())
}

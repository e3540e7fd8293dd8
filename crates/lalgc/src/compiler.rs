//! Responsible with compiling lalg files into quadruple listings

use lalg_parsing::lexer::Lexer;
use lalg_parsing::parser::{Analysis, AnalysisError};
use lalg_parsing::symbols::SymbolTable;
use lalg_quads::{IntermediateProgram, Listing};
use lalg_tokens::spanned::Spanned;
use lalg_tokens::token::Token;
use lalg_tokens::Location;
use std::fs::File;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, info_span};

pub mod error;

pub use error::{LalgcError, LalgcErrorKind, LalgcResult};

/// Responsible with compiling lalg files into quadruple listings.
///
/// Must be configured using an [LalgcBuilder].
#[derive(Debug)]
pub struct Lalgc {
    output: Option<PathBuf>,
    listing: Listing,
}

impl Lalgc {
    /// Creates the default LalgcBuilder
    #[inline]
    pub fn builder() -> LalgcBuilder {
        LalgcBuilder::new()
    }

    /// Compile a file at a given path
    pub fn compile(&self, path: impl AsRef<Path>) -> LalgcResult<Compilation> {
        let path = path.as_ref();
        let _span = info_span!("compile", path = ?path).entered();
        let source = read_source(path)?;
        self.compile_source(&source)
            .map_err(|e| e.with_path(path))
    }

    /// Compile source text directly
    pub fn compile_source(&self, source: &str) -> LalgcResult<Compilation> {
        info!("analyzing {} bytes of source", source.len());
        let analysis = lalg_parsing::analyze(source)?;
        info!(
            "emitted {} instructions for {} variables",
            analysis.program().len(),
            analysis.symbols().len()
        );
        Ok(Compilation { analysis })
    }

    /// Lexes a file at a given path, without analyzing it
    pub fn tokenize(&self, path: impl AsRef<Path>) -> LalgcResult<Vec<Token>> {
        let path = path.as_ref();
        let source = read_source(path)?;
        self.tokenize_source(&source).map_err(|e| e.with_path(path))
    }

    /// Lexes source text, without analyzing it
    pub fn tokenize_source(&self, source: &str) -> LalgcResult<Vec<Token>> {
        Lexer::new(source)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                let location = Location::resolve(source, e.span());
                AnalysisError::new(e.into(), location, vec![]).into()
            })
    }

    /// Writes the listing of a compilation to a writer
    pub fn emit<W: Write>(&self, compilation: &Compilation, writer: W) -> LalgcResult<()> {
        self.listing.write_to(compilation.program(), writer)?;
        Ok(())
    }

    /// Writes the listing of a compilation to the configured output, or to stdout if none was
    /// configured
    pub fn write_output(&self, compilation: &Compilation) -> LalgcResult<()> {
        match &self.output {
            Some(output) => {
                let file = File::create(output).map_err(|e| LalgcError::new(e, output.clone()))?;
                self.emit(compilation, file)
                    .map_err(|e| e.with_path(output))?;
                info!("wrote {} instructions to {output:?}", compilation.program().len());
            }
            None => {
                self.emit(compilation, io::stdout().lock())?;
            }
        }
        Ok(())
    }
}

fn read_source(path: &Path) -> LalgcResult<String> {
    debug!("reading {path:?}");
    std::fs::read_to_string(path).map_err(|e| LalgcError::new(e, path.to_path_buf()))
}

/// A successfully compiled program
#[derive(Debug)]
pub struct Compilation {
    analysis: Analysis,
}

impl Compilation {
    pub fn program(&self) -> &IntermediateProgram {
        self.analysis.program()
    }

    pub fn symbols(&self) -> &SymbolTable {
        self.analysis.symbols()
    }
}

/// Builder for creating a [Lalgc] instance.
#[derive(Debug)]
pub struct LalgcBuilder {
    /// The file listings are written to, stdout when not set
    pub output: Option<PathBuf>,
    /// Whether listings start with the `operator; argument1; argument2; result` row
    pub header: bool,
    /// Whether each listed instruction is prefixed by its index
    pub line_numbers: bool,
}

impl LalgcBuilder {
    /// Creates an LalgcBuilder with default settings
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the file listings are written to
    pub fn output<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    pub fn line_numbers(mut self, line_numbers: bool) -> Self {
        self.line_numbers = line_numbers;
        self
    }

    /// Builds an [Lalgc] instance from this builder
    pub fn build(self) -> Result<Lalgc, BuildLalgcError> {
        if let Some(output) = &self.output {
            if output.is_dir() {
                return Err(BuildLalgcError::OutputIsADirectory(output.clone()));
            }
            let output_directory = match output.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            let output_dir_meta = std::fs::metadata(output_directory).map_err(|e| {
                BuildLalgcError::OutputDirectoryDoesNotExist(output_directory.to_path_buf(), e)
            })?;
            if !output_dir_meta.is_dir() {
                return Err(BuildLalgcError::OutputDirectoryIsNotADirectory(
                    output_directory.to_path_buf(),
                ));
            }
        }
        Ok(Lalgc {
            output: self.output,
            listing: Listing::new()
                .with_header(self.header)
                .with_line_numbers(self.line_numbers),
        })
    }
}

impl Default for LalgcBuilder {
    fn default() -> Self {
        Self {
            output: None,
            header: true,
            line_numbers: false,
        }
    }
}

/// An error occurred while building an [Lalgc] instance
#[derive(Debug, Error)]
pub enum BuildLalgcError {
    #[error("{0:?} does not exist: {1}")]
    OutputDirectoryDoesNotExist(PathBuf, io::Error),
    #[error("{0:?} is not a directory")]
    OutputDirectoryIsNotADirectory(PathBuf),
    #[error("{0:?} is a directory, expected a file")]
    OutputIsADirectory(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_compile_source() {
        let lalgc = Lalgc::builder().build().unwrap();
        let compilation = lalgc
            .compile_source("program p real: x begin read(x) write(x) end.")
            .unwrap();
        assert_eq!(compilation.program().len(), 4);
        assert_eq!(compilation.symbols().len(), 1);

        let mut buffer = vec![];
        lalgc.emit(&compilation, &mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "operator; argument1; argument2; result\n\
             alloc; 0.0; ; x\n\
             read; ; ; x\n\
             write; x; ;\n\
             halt; ; ;\n"
        );
    }

    #[test]
    fn test_listing_options() {
        let lalgc = Lalgc::builder()
            .header(false)
            .line_numbers(true)
            .build()
            .unwrap();
        let compilation = lalgc.compile_source("program p integer: i begin read(i) end.").unwrap();
        let mut buffer = vec![];
        lalgc.emit(&compilation, &mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "0000 alloc; 0; ; i\n0001 read; ; ; i\n0002 halt; ; ;\n"
        );
    }

    #[test]
    fn test_tokenize_source() {
        let lalgc = Lalgc::builder().build().unwrap();
        let tokens = lalgc.tokenize_source("real: x").unwrap();
        let lines = tokens.iter().map(|t| t.to_string()).collect::<Vec<_>>();
        assert_eq!(
            lines,
            [
                "Token 'real' is a Keyword.",
                "Token ':' is a TypeDeclaration.",
                "Token 'x' is a Identifier.",
            ]
        );
        let err = lalgc.tokenize_source("x := 1.").unwrap_err();
        assert!(matches!(err.kind(), LalgcErrorKind::Analysis(_)));
    }

    #[test]
    fn test_missing_output_directory() {
        let result = Lalgc::builder()
            .output("this/directory/does/not/exist/output.txt")
            .build();
        assert!(matches!(
            result,
            Err(BuildLalgcError::OutputDirectoryDoesNotExist(..))
        ));
    }
}

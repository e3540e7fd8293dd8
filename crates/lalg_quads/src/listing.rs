//! Renders an [IntermediateProgram] as plain text

use crate::IntermediateProgram;
use std::io;
use std::io::{BufWriter, Write};

/// The header row of a listing
pub const HEADER: &str = "operator; argument1; argument2; result";

/// Responsible for writing programs as `operator; argument1; argument2; result` lines
#[derive(Debug, Clone, Copy)]
pub struct Listing {
    header: bool,
    line_numbers: bool,
}

impl Default for Listing {
    fn default() -> Self {
        Self {
            header: true,
            line_numbers: false,
        }
    }
}

impl Listing {
    /// Creates the default listing, with a header and without line numbers
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the header row is written
    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    /// Sets whether each instruction is prefixed by its index
    pub fn with_line_numbers(mut self, line_numbers: bool) -> Self {
        self.line_numbers = line_numbers;
        self
    }

    /// Lists a program to a specific writer
    pub fn write_to<W: Write>(&self, program: &IntermediateProgram, writer: W) -> io::Result<()> {
        let mut buffer = BufWriter::new(writer);
        if self.header {
            if self.line_numbers {
                write!(buffer, "     ")?;
            }
            writeln!(buffer, "{HEADER}")?;
        }
        for (index, quad) in program.iter().enumerate() {
            if self.line_numbers {
                write!(buffer, "{index:04} ")?;
            }
            writeln!(buffer, "{quad}")?;
        }
        buffer.flush()?;
        Ok(())
    }

    /// Lists a program into a string
    pub fn render(&self, program: &IntermediateProgram) -> String {
        let mut buffer = vec![];
        self.write_to(program, &mut buffer)
            .expect("writing to a vec can not fail");
        String::from_utf8(buffer).expect("listing is always utf-8")
    }
}

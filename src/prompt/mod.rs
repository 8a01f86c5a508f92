use crate::error::{Result, SeqmarkError};
use crate::fasta;
use crate::pipeline;

use std::io::{self, BufRead, Write};

/// Asks questions on `output` and reads trimmed answers from `input`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    /// One answer, surrounding whitespace removed.
    pub fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed").into());
        }
        Ok(line.trim().to_owned())
    }

    /// Repeats `question` until `check` accepts the answer, printing the
    /// reason for each rejection.
    pub fn ask_until<T, F>(&mut self, question: &str, mut check: F) -> Result<T>
    where
        F: FnMut(&str) -> Result<T>,
    {
        loop {
            let answer = self.ask(question)?;
            match check(&answer) {
                Ok(value) => return Ok(value),
                Err(SeqmarkError::InvalidLength(reason))
                | Err(SeqmarkError::InvalidHeader(reason))
                | Err(SeqmarkError::InvalidMarker(reason)) => writeln!(self.output, "{}", reason)?,
                Err(e) => return Err(e),
            }
        }
    }

    pub fn ask_length(&mut self) -> Result<usize> {
        self.ask_until("Enter the sequence length: ", pipeline::parse_length)
    }

    pub fn ask_id(&mut self) -> Result<String> {
        self.ask_until("Enter the sequence ID: ", |id| {
            fasta::validate_header(id, "")?;
            Ok(id.to_owned())
        })
    }

    pub fn ask_description(&mut self) -> Result<String> {
        self.ask("Provide a description of the sequence: ")
    }

    pub fn ask_marker(&mut self) -> Result<String> {
        self.ask("Enter your name: ")
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

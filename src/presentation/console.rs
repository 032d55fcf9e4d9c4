use crate::domain::{InputError, parse_integer};
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use std::fmt::Display;
use std::io::{BufRead, Write};

/// How a message should stand out when printed to a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Success,
    Warning,
    Error,
}

impl Tone {
    fn color(&self) -> Option<Color> {
        match self {
            Tone::Plain => None,
            Tone::Success => Some(Color::Green),
            Tone::Warning => Some(Color::Yellow),
            Tone::Error => Some(Color::Red),
        }
    }
}

/// Prompts on `writer` and reads answers line by line from `reader`.
///
/// Colours are only emitted when `styled` is set, so piped output and
/// tests see plain text.
pub struct Console<R: BufRead, W: Write> {
    reader: R,
    writer: W,
    styled: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(reader: R, writer: W, styled: bool) -> Self {
        Self {
            reader,
            writer,
            styled,
        }
    }

    pub fn plain(reader: R, writer: W) -> Self {
        Self::new(reader, writer, false)
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Shows `prompt` and returns the next line without its line ending.
    ///
    /// # Errors
    ///
    /// [`InputError::Closed`] once the reader is exhausted.
    pub fn read_line(&mut self, prompt: &str) -> Result<String, InputError> {
        self.writer.write_all(prompt.as_bytes())?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(InputError::Closed);
        }
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }

    pub fn read_integer(&mut self, prompt: &str) -> Result<i64, InputError> {
        let line = self.read_line(prompt)?;
        parse_integer(&line)
    }

    pub fn say(&mut self, message: impl Display) -> Result<(), InputError> {
        self.report(Tone::Plain, message)
    }

    pub fn report(&mut self, tone: Tone, message: impl Display) -> Result<(), InputError> {
        match tone.color() {
            Some(color) if self.styled => {
                queue!(
                    self.writer,
                    SetForegroundColor(color),
                    Print(message),
                    ResetColor,
                    Print("\n")
                )?;
            }
            _ => writeln!(self.writer, "{message}")?,
        }
        self.writer.flush()?;
        Ok(())
    }
}

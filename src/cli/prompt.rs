//! Line-oriented prompting
//!
//! Wraps an input reader and an output writer so the interactive commands
//! can be driven from a terminal or from a byte buffer in tests.

use std::io::{BufRead, Write};

use crate::error::{QuillError, QuillResult};

/// Reads answers from `input` and writes prompts to `output`
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Read one raw line without its line ending; `None` at end of input
    fn read_line(&mut self) -> QuillResult<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| QuillError::Io(format!("Failed to read input: {}", e)))?;

        if read == 0 {
            return Ok(None);
        }

        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }

    /// Print `prompt` and read a trimmed answer; `None` at end of input
    pub fn ask(&mut self, prompt: &str) -> QuillResult<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        Ok(self.read_line()?.map(|line| line.trim().to_string()))
    }

    /// Ask a yes/no question; only `y` or `yes` count as yes
    pub fn confirm(&mut self, prompt: &str) -> QuillResult<Option<bool>> {
        Ok(self
            .ask(prompt)?
            .map(|answer| matches!(answer.to_lowercase().as_str(), "y" | "yes")))
    }

    /// Read lines until an empty line follows some text
    ///
    /// Only a line with nothing on it ends the text; lines holding spaces are
    /// kept. An empty first line gives an empty string. The result is trimmed.
    pub fn read_multiline(&mut self) -> QuillResult<Option<String>> {
        let mut lines: Vec<String> = Vec::new();

        loop {
            let Some(line) = self.read_line()? else {
                if lines.is_empty() {
                    return Ok(None);
                }
                break;
            };

            if line.is_empty() {
                break;
            }
            lines.push(line);
        }

        Ok(Some(lines.join("\n").trim().to_string()))
    }

    /// Write text as-is
    pub fn print(&mut self, text: &str) -> QuillResult<()> {
        write!(self.output, "{}", text)?;
        Ok(())
    }

    /// Write one line
    pub fn say(&mut self, line: impl AsRef<str>) -> QuillResult<()> {
        writeln!(self.output, "{}", line.as_ref())?;
        Ok(())
    }

    /// Flush and hand back the output (used by tests)
    pub fn into_output(mut self) -> QuillResult<W> {
        self.output.flush()?;
        Ok(self.output)
    }
}

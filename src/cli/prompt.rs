//! PSC prefix input.
//!
//! Kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - a `PrefixSource` supplies the prefix when `--psc` is absent
//!
//! The binary uses an interactive prompt; tests and scripted runs pass a fixed value.

use std::io::{self, BufRead, Write};

use crate::domain::{Agency, validate_category_prefix};
use crate::error::AppError;

/// Supplies the 2-character PSC prefix for a run.
pub trait PrefixSource {
    /// `agency` is the agency the run reports on, for prompt wording.
    fn category_prefix(&mut self, agency: &Agency) -> Result<String, AppError>;
}

/// A prefix known up front. Validation happens when query parameters are built.
pub struct FixedPrefix(pub String);

impl PrefixSource for FixedPrefix {
    fn category_prefix(&mut self, _agency: &Agency) -> Result<String, AppError> {
        Ok(self.0.clone())
    }
}

/// Line-oriented prompt over any reader/writer pair.
///
/// Behavior:
/// - re-asks until the answer is a valid 2-character prefix
/// - `q` cancels
/// - end of input is an error
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn write_prompt(&mut self, agency: &Agency) -> Result<(), AppError> {
        write!(
            self.output,
            "This tool summarizes {} contracting.\n\
             Please enter a 2-character Product Service Code (PSC) prefix.\n\
             Suggestions include 'D3' for IT services and 'S2' for housekeeping services;\n\
             see https://www.acquisition.gov/PSC_Manual for others.\n> ",
            agency.long_form()
        )
        .and_then(|_| self.output.flush())
        .map_err(|e| AppError::new(2, format!("Failed to write prompt: {e}")))
    }
}

impl<R: BufRead, W: Write> PrefixSource for LinePrompt<R, W> {
    fn category_prefix(&mut self, agency: &Agency) -> Result<String, AppError> {
        self.write_prompt(agency)?;

        loop {
            let mut line = String::new();
            let bytes = self
                .input
                .read_line(&mut line)
                .map_err(|e| AppError::new(2, format!("Failed to read input: {e}")))?;

            if bytes == 0 {
                return Err(AppError::new(2, "No input received. Provide a prefix with `psc --psc D3`."));
            }

            let answer = line.trim();
            if answer.eq_ignore_ascii_case("q") {
                return Err(AppError::new(2, "Canceled."));
            }

            match validate_category_prefix(answer) {
                Ok(prefix) => return Ok(prefix),
                Err(err) => {
                    write!(self.output, "{err}\n> ")
                        .and_then(|_| self.output.flush())
                        .map_err(|e| AppError::new(2, format!("Failed to write prompt: {e}")))?;
                }
            }
        }
    }
}

/// Prompt on the process's stdin/stderr (stdout stays reserved for the report).
pub fn stdin_prompt() -> LinePrompt<io::StdinLock<'static>, io::Stderr> {
    LinePrompt::new(io::stdin().lock(), io::stderr())
}

//! Line-oriented prompting over any reader/writer pair.
//!
//! Every `ask_*` helper keeps re-prompting until it gets acceptable input, so
//! callers only ever see valid values or a closed/broken terminal.

use core::fmt::Display;
use std::io::{self, BufRead, Write};

use thiserror::Error;

use stockledger_core::{Money, ProductId};

#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Input reached end-of-file.
    #[error("input closed")]
    Closed,

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;

const INVALID_COUNT: &str = "Invalid input. Please enter a whole number of 0 or more.";
const INVALID_AMOUNT: &str = "Invalid input. Please enter an amount of 0 or more, such as 4.99.";
const INVALID_ID: &str = "Invalid input. Please enter a numeric Product ID.";

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write one line of output.
    pub fn say(&mut self, text: impl Display) -> ConsoleResult<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Show `prompt` and read one line, without its line terminator or
    /// surrounding whitespace.
    pub fn ask(&mut self, prompt: &str) -> ConsoleResult<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ConsoleError::Closed);
        }
        Ok(line.trim().to_string())
    }

    /// Ask until `parse` accepts the answer, printing `retry` after each miss.
    pub fn ask_until<T>(
        &mut self,
        prompt: &str,
        retry: &str,
        mut parse: impl FnMut(&str) -> Option<T>,
    ) -> ConsoleResult<T> {
        loop {
            let answer = self.ask(prompt)?;
            match parse(&answer) {
                Some(value) => return Ok(value),
                None => self.say(retry)?,
            }
        }
    }

    pub fn ask_count(&mut self, prompt: &str) -> ConsoleResult<i64> {
        self.ask_until(prompt, INVALID_COUNT, parse_count)
    }

    /// Like [`Console::ask_count`], but blank input yields `None`.
    pub fn ask_optional_count(&mut self, prompt: &str) -> ConsoleResult<Option<i64>> {
        self.ask_until(prompt, INVALID_COUNT, |s| blank_or(s, parse_count))
    }

    pub fn ask_money(&mut self, prompt: &str) -> ConsoleResult<Money> {
        self.ask_until(prompt, INVALID_AMOUNT, |s| s.parse().ok())
    }

    /// Like [`Console::ask_money`], but blank input yields `None`.
    pub fn ask_optional_money(&mut self, prompt: &str) -> ConsoleResult<Option<Money>> {
        self.ask_until(prompt, INVALID_AMOUNT, |s| blank_or(s, |s| s.parse().ok()))
    }

    pub fn ask_product_id(&mut self, prompt: &str) -> ConsoleResult<ProductId> {
        self.ask_until(prompt, INVALID_ID, |s| s.parse().ok())
    }
}

fn parse_count(input: &str) -> Option<i64> {
    input.parse::<i64>().ok().filter(|n| *n >= 0)
}

/// `Some(None)` for blank input, otherwise whatever `parse` makes of it.
fn blank_or<T>(input: &str, parse: impl FnOnce(&str) -> Option<T>) -> Option<Option<T>> {
    if input.is_empty() {
        Some(None)
    } else {
        parse(input).map(Some)
    }
}

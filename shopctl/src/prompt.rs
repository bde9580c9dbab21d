// Copyright AGNTCY Contributors (https://github.com/agntcy)
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Display;
use std::io::{self, BufRead, StdinLock, Stdout, Write};
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("input closed")]
    Closed,
    #[error("invalid {field}: '{value}' is not a number")]
    InvalidNumber { field: &'static str, value: String },
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

/// Line oriented question/answer over a pair of streams.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

pub type StdioPrompter = Prompter<StdinLock<'static>, Stdout>;

/// Prompter bound to the process stdin/stdout.
pub fn stdio() -> StdioPrompter {
    Prompter::new(io::stdin().lock(), io::stdout())
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `question` and read one answer.
    ///
    /// The line terminator is stripped, everything else is returned as typed.
    pub fn ask(&mut self, question: &str) -> Result<String, PromptError> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed);
        }

        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }

    /// Ask for a required numeric value.
    pub fn ask_parsed<T: Numeric>(
        &mut self,
        question: &str,
        field: &'static str,
    ) -> Result<T, PromptError> {
        let answer = self.ask(question)?;
        parse_number(field, &answer)
    }

    /// Ask for an optional numeric value; a blank answer is `None`.
    pub fn ask_optional<T: Numeric>(
        &mut self,
        question: &str,
        field: &'static str,
    ) -> Result<Option<T>, PromptError> {
        let answer = self.ask(question)?;
        if answer.trim().is_empty() {
            return Ok(None);
        }
        parse_number(field, &answer).map(Some)
    }

    /// Ask for an optional text value; a blank answer is `None`.
    pub fn ask_skippable(&mut self, question: &str) -> Result<Option<String>, PromptError> {
        let answer = self.ask(question)?;
        Ok((!answer.is_empty()).then_some(answer))
    }

    /// Write one line of output.
    pub fn say(&mut self, line: impl Display) -> Result<(), PromptError> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

/// Numbers accepted at a prompt.
pub trait Numeric: FromStr {
    fn is_finite(&self) -> bool {
        true
    }
}

impl Numeric for i32 {}
impl Numeric for i64 {}
impl Numeric for u32 {}
impl Numeric for u64 {}

impl Numeric for f32 {
    fn is_finite(&self) -> bool {
        f32::is_finite(*self)
    }
}

impl Numeric for f64 {
    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }
}

// NaN and infinities parse as floats but are never a valid amount.
fn parse_number<T: Numeric>(field: &'static str, answer: &str) -> Result<T, PromptError> {
    answer
        .trim()
        .parse::<T>()
        .ok()
        .filter(Numeric::is_finite)
        .ok_or_else(|| PromptError::InvalidNumber {
            field,
            value: answer.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn written(p: &Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.output().clone()).unwrap()
    }

    #[test]
    fn ask_writes_question_and_strips_newline() {
        let mut p = prompter("  Jane Doe \n");
        let answer = p.ask("Enter full name: ").unwrap();
        assert_eq!(answer, "  Jane Doe ");
        assert_eq!(written(&p), "Enter full name: ");
    }

    #[test]
    fn ask_strips_crlf() {
        let mut p = prompter("abc\r\n");
        assert_eq!(p.ask("? ").unwrap(), "abc");
    }

    #[test]
    fn last_line_without_newline_is_accepted() {
        let mut p = prompter("42");
        assert_eq!(p.ask("? ").unwrap(), "42");
    }

    #[test]
    fn end_of_input_is_closed() {
        let mut p = prompter("");
        assert!(matches!(p.ask("? "), Err(PromptError::Closed)));
    }

    #[test]
    fn numbers_are_coerced() {
        let mut p = prompter(" 3 \n19.99\n");
        let quantity: i32 = p.ask_parsed("Quantity: ", "quantity").unwrap();
        let price: f64 = p.ask_parsed("Price: ", "price").unwrap();
        assert_eq!(quantity, 3);
        assert_eq!(price, 19.99);
    }

    #[test]
    fn invalid_number_names_the_field() {
        let mut p = prompter("three\n");
        let err = p.ask_parsed::<i32>("Quantity: ", "quantity").unwrap_err();
        match err {
            PromptError::InvalidNumber { field, value } => {
                assert_eq!(field, "quantity");
                assert_eq!(value, "three");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn non_finite_floats_are_invalid() {
        let mut p = prompter("NaN\n-infinity\ninf\n");
        assert!(matches!(
            p.ask_parsed::<f64>("Price: ", "price"),
            Err(PromptError::InvalidNumber { field: "price", .. })
        ));
        assert!(matches!(
            p.ask_parsed::<f32>("Price: ", "price"),
            Err(PromptError::InvalidNumber { .. })
        ));
        assert!(matches!(
            p.ask_optional::<f64>("? ", "maximum price"),
            Err(PromptError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn optional_number_blank_is_none() {
        let mut p = prompter("\n  \n7\nx\n");
        assert_eq!(p.ask_optional::<i32>("? ", "page").unwrap(), None);
        assert_eq!(p.ask_optional::<i32>("? ", "page").unwrap(), None);
        assert_eq!(p.ask_optional::<i32>("? ", "page").unwrap(), Some(7));
        assert!(p.ask_optional::<i32>("? ", "page").is_err());
    }

    #[test]
    fn skippable_text() {
        let mut p = prompter("\nNew Name\n");
        assert_eq!(p.ask_skippable("? ").unwrap(), None);
        assert_eq!(p.ask_skippable("? ").unwrap().as_deref(), Some("New Name"));
    }

    #[test]
    fn say_appends_newline() {
        let mut p = prompter("");
        p.say("Exiting...").unwrap();
        assert_eq!(written(&p), "Exiting...\n");
    }
}

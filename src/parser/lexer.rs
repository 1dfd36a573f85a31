//! Command-line lexer for error-tolerant tokenization
//!
//! Splits a shell line into command elements the way an interactive shell
//! front end would before asking for completions.
//!
//! # Design Principles
//!
//! - **Never panic** - always return a valid element list
//! - **Never reject input** - an unterminated quote runs to the end of line
//! - **Byte spans** - element spans index the original line

use std::iter::Peekable;
use std::str::CharIndices;

use crate::completion::{CommandElement, ElementKind};

/// Line lexer producing command elements
pub struct LineLexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> LineLexer<'a> {
    /// Create a new lexer from input string
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(input: &str) -> Vec<CommandElement> {
        let mut lexer = LineLexer::new(input);
        let mut elements = Vec::new();
        while let Some(element) = lexer.next_element() {
            elements.push(element);
        }
        elements
    }

    fn next_element(&mut self) -> Option<CommandElement> {
        self.skip_whitespace();
        let &(start, ch) = self.chars.peek()?;

        if ch == '"' || ch == '\'' {
            self.chars.next();
            return Some(self.read_quoted(start, ch));
        }
        Some(self.read_word(start))
    }

    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
    }

    fn read_word(&mut self, start: usize) -> CommandElement {
        let mut end = self.input.len();
        while let Some(&(i, c)) = self.chars.peek() {
            if c.is_whitespace() {
                end = i;
                break;
            }
            self.chars.next();
        }

        let text = &self.input[start..end];
        let kind = if is_parameter_token(text) {
            ElementKind::Parameter
        } else {
            ElementKind::Word
        };
        CommandElement::new(kind, text, start..end)
    }

    /// Read a quoted string; `start` is the byte offset of the opening quote
    fn read_quoted(&mut self, start: usize, quote: char) -> CommandElement {
        let body = start + quote.len_utf8();
        for (i, c) in self.chars.by_ref() {
            if c == quote {
                return CommandElement::quoted(&self.input[body..i], start..i + c.len_utf8());
            }
        }
        CommandElement::quoted(&self.input[body..], start..self.input.len())
    }
}

/// True for words the shell treats as parameter names: a leading dash that
/// does not start a negative number
pub fn is_parameter_token(word: &str) -> bool {
    word.starts_with('-') && word.parse::<i64>().is_err()
}

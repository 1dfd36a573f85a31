//! Command-line elements with cursor awareness
//!
//! The host shell hands over an already tokenized line. Each element is a
//! bare word, a quoted string, or a parameter-name token, together with its
//! byte span in the original line.

use std::ops::Range;

use crate::catalog::LONG_PREFIX;

/// How the host tokenized an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Unquoted word
    Word,
    /// Quoted string literal; `text` holds the unquoted value
    Quoted,
    /// Parameter-name token such as `-o`
    Parameter,
}

/// One element of a tokenized command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandElement {
    pub kind: ElementKind,
    /// Element value (unquoted for quoted strings)
    pub text: String,
    /// Byte range of the element in the original line, quotes included
    pub span: Range<usize>,
}

impl CommandElement {
    pub fn new(kind: ElementKind, text: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    pub fn word(text: impl Into<String>, span: Range<usize>) -> Self {
        Self::new(ElementKind::Word, text, span)
    }

    pub fn quoted(text: impl Into<String>, span: Range<usize>) -> Self {
        Self::new(ElementKind::Quoted, text, span)
    }

    pub fn parameter(text: impl Into<String>, span: Range<usize>) -> Self {
        Self::new(ElementKind::Parameter, text, span)
    }

    /// True for parameter-name tokens and words starting with `--`
    pub fn is_parameter_like(&self) -> bool {
        self.kind == ElementKind::Parameter || self.text.starts_with(LONG_PREFIX)
    }
}

/// Elements plus the cursor position
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    elements: &'a [CommandElement],
    cursor: usize,
    /// Index of the element under completion
    element_index: usize,
}

impl<'a> TokenStream<'a> {
    /// Create a stream over `elements` with the cursor at byte `cursor`
    pub fn new(elements: &'a [CommandElement], cursor: usize) -> Self {
        let element_index = Self::find_element_at_cursor(elements, cursor);
        Self {
            elements,
            cursor,
            element_index,
        }
    }

    /// First element whose end is at or past the cursor, or the element
    /// count when the cursor is beyond every element
    fn find_element_at_cursor(elements: &[CommandElement], cursor: usize) -> usize {
        elements
            .iter()
            .position(|e| e.span.end >= cursor)
            .unwrap_or(elements.len())
    }

    pub fn elements(&self) -> &'a [CommandElement] {
        self.elements
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Index of the element under completion
    pub fn element_index(&self) -> usize {
        self.element_index
    }

    /// The element under completion, if the cursor touches one
    pub fn current_element(&self) -> Option<&'a CommandElement> {
        self.elements.get(self.element_index)
    }

    /// The element right before the one under completion
    pub fn preceding_element(&self) -> Option<&'a CommandElement> {
        self.element_index
            .checked_sub(1)
            .and_then(|i| self.elements.get(i))
    }

    /// Elements between the program name and the element under completion
    pub fn walkable(&self) -> impl Iterator<Item = (usize, &'a CommandElement)> {
        self.elements
            .iter()
            .enumerate()
            .take(self.element_index)
            .skip(1)
    }

    /// Text typed so far for the element under completion
    ///
    /// Empty when the cursor sits in whitespace before the next element.
    pub fn partial_word(&self) -> String {
        let Some(element) = self.current_element() else {
            return String::new();
        };
        if self.cursor <= element.span.start {
            return String::new();
        }

        let mut typed = self.cursor.min(element.span.end) - element.span.start;
        if element.kind == ElementKind::Quoted {
            typed = typed.saturating_sub(1);
        }

        let mut end = typed.min(element.text.len());
        while !element.text.is_char_boundary(end) {
            end -= 1;
        }
        element.text[..end].to_string()
    }

    /// Byte offset where a chosen candidate replaces the line
    ///
    /// The start of the element under completion when the cursor is inside
    /// it, otherwise the cursor itself.
    pub fn completion_start(&self) -> usize {
        self.current_element()
            .filter(|e| self.cursor > e.span.start)
            .map(|e| e.span.start)
            .unwrap_or(self.cursor)
    }
}

//! Host-side command-line tokenization
//!
//! The completion resolver consumes an already tokenized line. This module
//! is the front end the bundled CLI and REPL use to produce it.
//!
//! # Examples
//!
//! ```
//! use catalog_complete::completion::ElementKind;
//! use catalog_complete::parser::tokenize;
//!
//! let elements = tokenize("az vm create --name \"my vm\"");
//! assert_eq!(elements.len(), 5);
//! assert_eq!(elements[3].kind, ElementKind::Parameter);
//! assert_eq!(elements[4].text, "my vm");
//! ```

mod lexer;

pub use lexer::{LineLexer, is_parameter_token};

use crate::completion::CommandElement;

/// Split `line` into command elements with byte spans
pub fn tokenize(line: &str) -> Vec<CommandElement> {
    LineLexer::tokenize(line)
}

/// Prepend the program name unless the line already starts with it
///
/// Lets users type `vm create` at a prompt that implies the program.
pub fn with_program(program: &str, line: &str) -> (String, usize) {
    let trimmed = line.trim_start();
    let first = trimmed.split_whitespace().next().unwrap_or_default();
    if first.eq_ignore_ascii_case(program) {
        (line.to_string(), 0)
    } else {
        let prefix = format!("{program} ");
        let shift = prefix.len();
        (format!("{prefix}{line}"), shift)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_program() {
        assert_eq!(with_program("az", "vm create"), ("az vm create".to_string(), 3));
        assert_eq!(with_program("az", "az vm"), ("az vm".to_string(), 0));
        assert_eq!(with_program("az", "AZ vm"), ("AZ vm".to_string(), 0));
        assert_eq!(with_program("az", ""), ("az ".to_string(), 3));
    }
}

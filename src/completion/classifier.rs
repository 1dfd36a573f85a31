//! Token classifier
//!
//! Walks the command path from the root to find the node the cursor
//! belongs to, then decides which completion context applies.

use std::sync::Arc;

use tracing::trace;

use super::context::CompletionContext;
use super::matcher::SpellingSet;
use super::token_stream::TokenStream;
use crate::catalog::{CatalogStore, CommandNode, SHORT_PREFIX};
use crate::error::Result;

/// Whether the word under the cursor is a value or a parameter name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionMode {
    /// Sub-command name or option argument value
    Value,
    /// Option spelling
    ParameterName,
}

impl CompletionMode {
    /// Decide the mode from the partial word
    ///
    /// A leading dash means a parameter name, except for negative numbers
    /// which are values.
    pub fn detect(word: &str) -> Self {
        if !word.starts_with(SHORT_PREFIX) || word.parse::<i64>().is_ok() {
            Self::Value
        } else {
            Self::ParameterName
        }
    }
}

/// Result of walking a command line
#[derive(Debug, Clone)]
pub struct Classification {
    /// Deepest node reached along the command path
    pub current: Arc<CommandNode>,
    /// Index of the element under completion
    pub element_index: usize,
    /// Index of the last element consumed as a command path segment
    /// (0 when only the program name was consumed)
    pub last_command_index: usize,
    pub mode: CompletionMode,
}

impl Classification {
    /// Convert the classification into a completion context
    ///
    /// # Arguments
    /// * `stream` - The stream the classification was computed from
    /// * `partial` - Text typed so far for the element under completion
    pub fn to_context(&self, stream: &TokenStream<'_>, partial: &str) -> CompletionContext {
        let prefix = partial.to_string();

        // The cursor is on the program name itself
        if self.element_index == 0 {
            return CompletionContext::None;
        }

        match self.mode {
            CompletionMode::Value if self.element_index == self.last_command_index + 1 => {
                match self.current.as_ref() {
                    CommandNode::Group(_) => CompletionContext::SubCommand {
                        group: Arc::clone(&self.current),
                        prefix,
                    },
                    CommandNode::Command(_) => CompletionContext::None,
                }
            }
            CompletionMode::Value => {
                let option = stream
                    .preceding_element()
                    .filter(|e| e.is_parameter_like());
                match (option, self.current.as_ref()) {
                    (Some(option), CommandNode::Command(_)) => CompletionContext::ParameterValue {
                        command: Arc::clone(&self.current),
                        option: option.text.clone(),
                        prefix,
                    },
                    _ => CompletionContext::None,
                }
            }
            CompletionMode::ParameterName => match self.current.as_ref() {
                CommandNode::Group(_) => CompletionContext::HelpFlags { prefix },
                CommandNode::Command(_) => CompletionContext::ParameterName {
                    command: Arc::clone(&self.current),
                    prefix,
                    used: self.used_parameters(stream),
                },
            },
        }
    }

    /// Parameter spellings present anywhere after the command path,
    /// other than the element under completion
    fn used_parameters(&self, stream: &TokenStream<'_>) -> SpellingSet {
        stream
            .elements()
            .iter()
            .enumerate()
            .filter(|(k, e)| {
                *k > self.last_command_index && *k != self.element_index && e.is_parameter_like()
            })
            .map(|(_, e)| e.text.as_str())
            .collect()
    }
}

/// Walks a token stream through the catalog
pub struct TokenClassifier<'s> {
    store: &'s CatalogStore,
}

impl<'s> TokenClassifier<'s> {
    pub fn new(store: &'s CatalogStore) -> Self {
        Self { store }
    }

    /// Classify the line held by `stream`
    ///
    /// The walk stops at the first parameter-like element, at an unknown
    /// child name, or once a command is reached.
    ///
    /// # Errors
    /// `CatalogError::Corrupt` when a node on the path fails to materialize.
    pub fn classify(&self, stream: &TokenStream<'_>, partial: &str) -> Result<Classification> {
        let mut current = self.store.root()?;
        let mut last_command_index = 0;

        for (index, element) in stream.walkable() {
            if element.is_parameter_like() {
                break;
            }
            let Some(group) = current.as_group() else {
                break;
            };
            let Some(child) = self.store.resolve_child(group, &element.text)? else {
                trace!(name = %element.text, "unknown child, walk stops");
                break;
            };

            current = child;
            last_command_index = index;
            if current.as_command().is_some() {
                break;
            }
        }

        Ok(Classification {
            current,
            element_index: stream.element_index(),
            last_command_index,
            mode: CompletionMode::detect(partial),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testing::sample_store;
    use crate::completion::token_stream::CommandElement;

    fn words(line: &str) -> Vec<CommandElement> {
        let mut elements = Vec::new();
        let mut offset = 0;
        for word in line.split(' ') {
            if !word.is_empty() {
                let span = offset..offset + word.len();
                if word.starts_with('-') && word.parse::<i64>().is_err() {
                    elements.push(CommandElement::parameter(word, span));
                } else {
                    elements.push(CommandElement::word(word, span));
                }
            }
            offset += word.len() + 1;
        }
        elements
    }

    fn classify(line: &str) -> (Classification, CompletionContext) {
        let store = sample_store();
        let elements = words(line);
        let stream = TokenStream::new(&elements, line.len());
        let partial = stream.partial_word();
        let classification = TokenClassifier::new(&store)
            .classify(&stream, &partial)
            .unwrap();
        let context = classification.to_context(&stream, &partial);
        (classification, context)
    }

    #[test]
    fn test_mode_detect() {
        assert_eq!(CompletionMode::detect(""), CompletionMode::Value);
        assert_eq!(CompletionMode::detect("json"), CompletionMode::Value);
        assert_eq!(CompletionMode::detect("-5"), CompletionMode::Value);
        assert_eq!(CompletionMode::detect("-"), CompletionMode::ParameterName);
        assert_eq!(CompletionMode::detect("-o"), CompletionMode::ParameterName);
        assert_eq!(CompletionMode::detect("--out"), CompletionMode::ParameterName);
    }

    #[test]
    fn test_after_program_name() {
        let (c, ctx) = classify("tool ");
        assert_eq!(c.current.name(), "tool");
        assert_eq!(c.element_index, 1);
        assert_eq!(c.last_command_index, 0);
        assert!(matches!(ctx, CompletionContext::SubCommand { .. }));
    }

    #[test]
    fn test_walk_into_group() {
        let (c, ctx) = classify("tool group1 d");
        assert_eq!(c.current.name(), "group1");
        assert_eq!(c.last_command_index, 1);
        assert_eq!(ctx.prefix(), "d");
        assert!(matches!(ctx, CompletionContext::SubCommand { .. }));
    }

    #[test]
    fn test_walk_stops_at_command() {
        let (c, ctx) = classify("tool group1 do-thing extra ");
        assert_eq!(c.current.name(), "do-thing");
        assert_eq!(c.last_command_index, 2);
        assert_eq!(c.element_index, 4);
        assert!(ctx.is_none());
    }

    #[test]
    fn test_command_has_no_sub_commands() {
        let (c, ctx) = classify("tool login ");
        assert_eq!(c.current.name(), "login");
        assert!(ctx.is_none());
    }

    #[test]
    fn test_unknown_child_keeps_last_good_node() {
        let (c, ctx) = classify("tool group1 nope ");
        assert_eq!(c.current.name(), "group1");
        assert_eq!(c.last_command_index, 1);
        assert_eq!(c.element_index, 3);
        assert!(ctx.is_none());
    }

    #[test]
    fn test_walk_stops_at_parameter() {
        let (c, _) = classify("tool group1 --flag sub ");
        assert_eq!(c.current.name(), "group1");
        assert_eq!(c.last_command_index, 1);
    }

    #[test]
    fn test_parameter_value_context() {
        let (_, ctx) = classify("tool group1 do-thing --output ");
        match ctx {
            CompletionContext::ParameterValue { option, prefix, .. } => {
                assert_eq!(option, "--output");
                assert_eq!(prefix, "");
            }
            other => panic!("expected ParameterValue, got {other:?}"),
        }
    }

    #[test]
    fn test_parameter_name_context_collects_used() {
        let (_, ctx) = classify("tool group1 do-thing -o json --name x --");
        match ctx {
            CompletionContext::ParameterName { used, prefix, .. } => {
                assert_eq!(prefix, "--");
                assert!(used.contains("-o"));
                assert!(used.contains("--name"));
                assert!(!used.contains("--"));
                assert_eq!(used.len(), 2);
            }
            other => panic!("expected ParameterName, got {other:?}"),
        }
    }

    #[test]
    fn test_used_includes_elements_after_cursor() {
        let store = sample_store();
        let line = "tool group1 do-thing -- --verbose";
        let elements = words(line);
        // cursor right after "--"
        let stream = TokenStream::new(&elements, 23);
        let partial = stream.partial_word();
        assert_eq!(partial, "--");
        let c = TokenClassifier::new(&store).classify(&stream, &partial).unwrap();
        match c.to_context(&stream, &partial) {
            CompletionContext::ParameterName { used, .. } => {
                assert!(used.contains("--verbose"));
                assert_eq!(used.len(), 1);
            }
            other => panic!("expected ParameterName, got {other:?}"),
        }
    }

    #[test]
    fn test_group_parameter_mode_is_help() {
        let (_, ctx) = classify("tool group1 --h");
        assert!(matches!(ctx, CompletionContext::HelpFlags { .. }));
    }

    #[test]
    fn test_negative_number_is_value() {
        let (c, ctx) = classify("tool group1 do-thing --output -1");
        assert_eq!(c.mode, CompletionMode::Value);
        assert!(matches!(ctx, CompletionContext::ParameterValue { .. }));
    }

    #[test]
    fn test_corrupt_node_is_error() {
        let store = sample_store();
        let elements = words("tool group2 broken ");
        let stream = TokenStream::new(&elements, 19);
        let err = TokenClassifier::new(&store)
            .classify(&stream, "")
            .unwrap_err();
        assert!(err.is_catalog_corrupt());
    }
}

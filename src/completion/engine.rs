//! Completion engine - orchestrates the completion flow
//!
//! Ties together the token stream, the classifier and the matcher, and
//! turns a completion context into ordered candidates.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use super::classifier::TokenClassifier;
use super::context::CompletionContext;
use super::matcher::{Matcher, SpellingSet};
use super::token_stream::{CommandElement, TokenStream};
use crate::catalog::{CatalogStore, CommandNode, CommandSpec, GroupNode};
use crate::error::Result;

/// Built-in help spellings offered on groups, in order
pub const HELP_FLAGS: [&str; 2] = ["-h", "--help"];

const HELP_TOOL_TIP: &str = "Show the help message.";

/// Kind of a completion candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum CandidateKind {
    SubCommand,
    ParameterName,
    ParameterValue,
}

/// A single completion suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    /// Text inserted into the line
    pub insert_text: String,
    /// Text shown in the completion list
    pub display_text: String,
    pub kind: CandidateKind,
    pub tool_tip: String,
}

impl Candidate {
    fn new(text: &str, kind: CandidateKind, tool_tip: impl Into<String>) -> Self {
        Self {
            insert_text: text.to_string(),
            display_text: text.to_string(),
            kind,
            tool_tip: tool_tip.into(),
        }
    }
}

/// Main completion engine
pub struct CompletionEngine {
    store: Arc<CatalogStore>,
}

impl CompletionEngine {
    /// Create a new completion engine
    ///
    /// # Arguments
    /// * `store` - Catalog shared by every request of the process
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }

    /// Compute the candidates for the element under the cursor
    ///
    /// # Arguments
    /// * `partial` - Text typed so far for the element under completion
    /// * `elements` - Tokenized command line, program name first
    /// * `cursor` - Cursor byte offset in the original line
    ///
    /// # Returns
    /// * `Result<Vec<Candidate>>` - Candidates in catalog declaration order;
    ///   empty when nothing matches
    ///
    /// # Errors
    /// `CatalogError::Corrupt` when a node needed for the request cannot be
    /// materialized.
    pub fn get_completions(
        &self,
        partial: &str,
        elements: &[CommandElement],
        cursor: usize,
    ) -> Result<Vec<Candidate>> {
        let stream = TokenStream::new(elements, cursor);
        let classification = TokenClassifier::new(&self.store).classify(&stream, partial)?;
        let context = classification.to_context(&stream, partial);

        debug!(
            context = context.label(),
            node = %classification.current.name(),
            element_index = classification.element_index,
            last_command_index = classification.last_command_index,
            "classified command line"
        );

        let candidates = Self::fetch_candidates(&context);
        debug!(count = candidates.len(), "completion candidates");
        Ok(candidates)
    }

    /// Like [`get_completions`](Self::get_completions), but any failure is
    /// logged and degrades to no candidates
    pub fn complete(
        &self,
        partial: &str,
        elements: &[CommandElement],
        cursor: usize,
    ) -> Vec<Candidate> {
        match self.get_completions(partial, elements, cursor) {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(error = %e, "completion request failed");
                Vec::new()
            }
        }
    }

    /// Complete a raw line at `cursor`, tokenizing it first
    ///
    /// # Returns
    /// * `(usize, Vec<Candidate>)` - Byte offset where the replaced text
    ///   starts, and the candidates
    pub fn complete_line(&self, line: &str, cursor: usize) -> (usize, Vec<Candidate>) {
        let elements = crate::parser::tokenize(line);
        let stream = TokenStream::new(&elements, cursor);
        let partial = stream.partial_word();
        let start = stream.completion_start();
        (start, self.complete(&partial, &elements, cursor))
    }

    /// Deepest node named by the command path of `elements`
    pub fn resolve_node(&self, elements: &[CommandElement]) -> Result<Arc<CommandNode>> {
        let stream = TokenStream::new(elements, usize::MAX);
        let classification = TokenClassifier::new(&self.store).classify(&stream, "")?;
        Ok(classification.current)
    }

    /// Fetch candidates based on completion context
    fn fetch_candidates(context: &CompletionContext) -> Vec<Candidate> {
        let matcher = Matcher::new(context.prefix());
        match context {
            CompletionContext::SubCommand { group, .. } => match group.as_group() {
                Some(group) => Self::sub_commands(group, &matcher),
                None => Vec::new(),
            },
            CompletionContext::ParameterValue { command, option, .. } => match command.as_command()
            {
                Some(command) => Self::parameter_values(command, option, &matcher),
                None => Vec::new(),
            },
            CompletionContext::ParameterName { command, used, .. } => match command.as_command() {
                Some(command) => Self::parameter_names(command, used, &matcher),
                None => Vec::new(),
            },
            CompletionContext::HelpFlags { .. } => matcher
                .filter(HELP_FLAGS.iter().copied())
                .into_iter()
                .map(|flag| Candidate::new(flag, CandidateKind::ParameterName, HELP_TOOL_TIP))
                .collect(),
            CompletionContext::None => Vec::new(),
        }
    }

    fn sub_commands(group: &GroupNode, matcher: &Matcher) -> Vec<Candidate> {
        group
            .entries()
            .iter()
            .filter(|entry| matcher.matches(entry.name()))
            .map(|entry| Candidate::new(entry.name(), CandidateKind::SubCommand, entry.tool_tip()))
            .collect()
    }

    fn parameter_values(command: &CommandSpec, spelling: &str, matcher: &Matcher) -> Vec<Candidate> {
        let Some(option) = command.find_option(spelling) else {
            debug!(option = spelling, command = command.name(), "unknown option");
            return Vec::new();
        };
        let Some(arguments) = option.arguments() else {
            return Vec::new();
        };

        arguments
            .iter()
            .filter(|value| matcher.matches(value))
            .map(|value| Candidate::new(value, CandidateKind::ParameterValue, value.as_str()))
            .collect()
    }

    fn parameter_names(
        command: &CommandSpec,
        used: &SpellingSet,
        matcher: &Matcher,
    ) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        for option in command.options() {
            if used.contains_any(option.spellings()) {
                continue;
            }
            let tool_tip = option.tool_tip();
            candidates.extend(
                option
                    .spellings()
                    .filter(|spelling| matcher.matches(spelling))
                    .map(|spelling| {
                        Candidate::new(spelling, CandidateKind::ParameterName, tool_tip.clone())
                    }),
            );
        }
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testing::sample_store;

    fn create_test_engine() -> CompletionEngine {
        CompletionEngine::new(Arc::new(sample_store()))
    }

    fn inserts(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.insert_text.as_str()).collect()
    }

    fn complete(engine: &CompletionEngine, line: &str) -> Vec<Candidate> {
        engine.complete_line(line, line.len()).1
    }

    #[test]
    fn test_root_children_in_order() {
        let engine = create_test_engine();
        let candidates = complete(&engine, "tool ");
        assert_eq!(inserts(&candidates), vec!["group1", "group2", "login"]);
        assert!(candidates.iter().all(|c| c.kind == CandidateKind::SubCommand));
        assert_eq!(candidates[0].tool_tip, "First group.");
        assert_eq!(candidates[1].tool_tip, "Preview Second group.");
    }

    #[test]
    fn test_sub_command_prefix() {
        let engine = create_test_engine();
        assert_eq!(inserts(&complete(&engine, "tool GR")), vec!["group1", "group2"]);
        assert_eq!(inserts(&complete(&engine, "tool group1 ")), vec!["do-thing", "sub"]);
        assert_eq!(inserts(&complete(&engine, "tool group1 s")), vec!["sub"]);
    }

    #[test]
    fn test_parameter_names() {
        let engine = create_test_engine();
        let candidates = complete(&engine, "tool group1 do-thing -");
        assert_eq!(
            inserts(&candidates),
            vec!["--output", "-o", "--name", "--resource-name", "-n", "--verbose"]
        );
        assert!(candidates.iter().all(|c| c.kind == CandidateKind::ParameterName));
        assert_eq!(candidates[5].tool_tip, "Preview Chatty logs.");
    }

    #[test]
    fn test_parameter_names_prefix() {
        let engine = create_test_engine();
        assert_eq!(
            inserts(&complete(&engine, "tool group1 do-thing --out")),
            vec!["--output"]
        );
        assert_eq!(
            inserts(&complete(&engine, "tool group1 do-thing --RE")),
            vec!["--resource-name"]
        );
    }

    #[test]
    fn test_used_option_excluded_under_every_spelling() {
        let engine = create_test_engine();
        let candidates = complete(&engine, "tool group1 do-thing -n foo -");
        assert_eq!(inserts(&candidates), vec!["--output", "-o", "--verbose"]);

        let candidates = complete(&engine, "tool group1 do-thing --output json --out");
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_parameter_values() {
        let engine = create_test_engine();
        let candidates = complete(&engine, "tool group1 do-thing --output ");
        assert_eq!(inserts(&candidates), vec!["json", "table"]);
        assert!(candidates.iter().all(|c| c.kind == CandidateKind::ParameterValue));
        assert_eq!(candidates[0].tool_tip, "json");

        assert_eq!(
            inserts(&complete(&engine, "tool group1 do-thing -O t")),
            vec!["table"]
        );
    }

    #[test]
    fn test_parameter_values_without_enumeration() {
        let engine = create_test_engine();
        assert!(complete(&engine, "tool group1 do-thing --name ").is_empty());
        assert!(complete(&engine, "tool group1 do-thing --unknown ").is_empty());
    }

    #[test]
    fn test_help_flags_on_group() {
        let engine = create_test_engine();
        let candidates = complete(&engine, "tool group1 -");
        assert_eq!(inserts(&candidates), vec!["-h", "--help"]);
        assert_eq!(candidates[0].tool_tip, "Show the help message.");
        assert_eq!(inserts(&complete(&engine, "tool --he")), vec!["--help"]);
    }

    #[test]
    fn test_corrupt_degrades_to_empty() {
        let engine = create_test_engine();
        assert!(complete(&engine, "tool group2 broken -").is_empty());

        let elements = crate::parser::tokenize("tool group2 broken -");
        let err = engine.get_completions("-", &elements, 20).unwrap_err();
        assert!(err.is_catalog_corrupt());
    }

    #[test]
    fn test_idempotent() {
        let engine = create_test_engine();
        let first = complete(&engine, "tool group1 do-thing -");
        let second = complete(&engine, "tool group1 do-thing -");
        assert_eq!(first, second);
    }

    #[test]
    fn test_completion_start() {
        let engine = create_test_engine();
        let (start, _) = engine.complete_line("tool gro", 8);
        assert_eq!(start, 5);
        let (start, _) = engine.complete_line("tool ", 5);
        assert_eq!(start, 5);
    }

    #[test]
    fn test_resolve_node() {
        let engine = create_test_engine();
        let elements = crate::parser::tokenize("tool group1 sub deep --flag");
        assert_eq!(engine.resolve_node(&elements).unwrap().name(), "deep");

        let elements = crate::parser::tokenize("tool");
        assert_eq!(engine.resolve_node(&elements).unwrap().name(), "tool");
    }
}

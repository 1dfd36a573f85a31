//! JSON rendering for programmatic hosts

use serde_json::{Value, json};

use crate::catalog::{CatalogEntry, CatalogOption, CommandNode};
use crate::completion::Candidate;
use crate::error::Result;

/// JSON formatter with pretty printing support
pub struct JsonFormatter {
    /// Enable pretty printing
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Candidates as a JSON array of objects
    pub fn format_candidates(&self, candidates: &[Candidate]) -> Result<String> {
        self.render(&serde_json::to_value(candidates)?)
    }

    /// Node description as a JSON object
    pub fn format_node(&self, node: &CommandNode) -> Result<String> {
        let mut value = json!({
            "name": node.name(),
            "kind": node.kind().to_string(),
            "description": node.description(),
        });

        match node {
            CommandNode::Group(group) => {
                value["children"] = group.entries().iter().map(entry_value).collect();
            }
            CommandNode::Command(command) => {
                value["options"] = command.options().iter().map(option_value).collect();
                if let Some(examples) = command.examples() {
                    value["examples"] = Value::from(examples);
                }
            }
        }
        self.render(&value)
    }

    fn render(&self, value: &Value) -> Result<String> {
        let text = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(text)
    }
}

fn entry_value(entry: &CatalogEntry) -> Value {
    json!({
        "name": entry.name(),
        "kind": entry.kind().to_string(),
        "description": entry.description(),
        "attribute": entry.attribute(),
    })
}

fn option_value(option: &CatalogOption) -> Value {
    json!({
        "name": option.name(),
        "aliases": option.aliases(),
        "short": option.short_forms(),
        "description": option.description(),
        "attribute": option.attribute(),
        "arguments": option.arguments(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testing::sample_store;
    use crate::completion::CandidateKind;

    #[test]
    fn test_candidates_json() {
        let candidates = vec![Candidate {
            insert_text: "json".to_string(),
            display_text: "json".to_string(),
            kind: CandidateKind::ParameterValue,
            tool_tip: "json".to_string(),
        }];
        let text = JsonFormatter::new(false).format_candidates(&candidates).unwrap();
        assert_eq!(
            text,
            r#"[{"insert_text":"json","display_text":"json","kind":"ParameterValue","tool_tip":"json"}]"#
        );
        assert_eq!(JsonFormatter::new(false).format_candidates(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_node_json() {
        let store = sample_store();
        let node = store.resolve_path(["group1", "do-thing"]).unwrap().unwrap();
        let text = JsonFormatter::new(true).format_node(&node).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["name"], "do-thing");
        assert_eq!(value["kind"], "Command");
        assert_eq!(value["options"][0]["short"][0], "-o");
        assert_eq!(value["options"][0]["arguments"][1], "table");
        assert!(value["options"][1]["arguments"].is_null());

        let root = store.root().unwrap();
        let value: Value =
            serde_json::from_str(&JsonFormatter::new(false).format_node(&root).unwrap()).unwrap();
        assert_eq!(value["children"][1]["attribute"], "Preview");
    }
}

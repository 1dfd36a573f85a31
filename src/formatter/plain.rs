//! Plain text rendering of candidates and node descriptions

use super::colorizer::Colorizer;
use crate::catalog::{
    CatalogEntry, CatalogOption, CommandKind, CommandNode, CommandSpec, GroupNode,
};
use crate::completion::Candidate;

/// Plain text formatter
pub struct PlainFormatter {
    /// Append tool-tips to candidates
    descriptions: bool,

    colorizer: Colorizer,
}

impl PlainFormatter {
    pub fn new(descriptions: bool, use_colors: bool) -> Self {
        Self {
            descriptions,
            colorizer: Colorizer::new(use_colors),
        }
    }

    /// One candidate per line, tab-separated from its tool-tip when enabled
    pub fn format_candidates(&self, candidates: &[Candidate]) -> String {
        candidates
            .iter()
            .map(|c| {
                if self.descriptions && !c.tool_tip.is_empty() {
                    format!("{}\t{}", c.insert_text, c.tool_tip)
                } else {
                    c.insert_text.clone()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Help-style description of a node
    pub fn format_node(&self, node: &CommandNode) -> String {
        match node {
            CommandNode::Group(group) => self.format_group(group),
            CommandNode::Command(command) => self.format_command(command),
        }
    }

    fn format_group(&self, group: &GroupNode) -> String {
        let mut out = String::new();
        out.push_str(&self.colorizer.heading("Group"));
        out.push('\n');
        out.push_str(&format!(
            "    {} : {}\n",
            self.colorizer.name(group.name()),
            group.description()
        ));

        for (title, kind) in [("Subgroups:", CommandKind::Group), ("Commands:", CommandKind::Command)] {
            let entries: Vec<&CatalogEntry> =
                group.entries().iter().filter(|e| e.kind() == kind).collect();
            if entries.is_empty() {
                continue;
            }
            let width = entries.iter().map(|e| e.name().len()).max().unwrap_or(0);
            out.push('\n');
            out.push_str(&self.colorizer.heading(title));
            out.push('\n');
            for entry in entries {
                out.push_str(&format!(
                    "    {}{} : {}\n",
                    self.colorizer.name(entry.name()),
                    " ".repeat(width - entry.name().len()),
                    self.tagged(entry.attribute(), entry.description())
                ));
            }
        }
        out.trim_end().to_string()
    }

    fn format_command(&self, command: &CommandSpec) -> String {
        let mut out = String::new();
        out.push_str(&self.colorizer.heading("Command"));
        out.push('\n');
        out.push_str(&format!(
            "    {} : {}\n",
            self.colorizer.name(command.name()),
            command.description()
        ));

        out.push('\n');
        out.push_str(&self.colorizer.heading("Arguments"));
        out.push('\n');
        let spelled: Vec<String> = command.options().iter().map(spelling_line).collect();
        let width = spelled.iter().map(String::len).max().unwrap_or(0);
        for (option, spelling) in command.options().iter().zip(&spelled) {
            out.push_str(&format!(
                "    {}{} : {}\n",
                self.colorizer.name(spelling),
                " ".repeat(width - spelling.len()),
                self.tagged(option.attribute(), option.description())
            ));
            if let Some(values) = option.arguments() {
                let allowed = format!("Allowed values: {}.", values.join(", "));
                out.push_str(&format!(
                    "    {}   {}\n",
                    " ".repeat(width),
                    self.colorizer.dim(&allowed)
                ));
            }
        }

        if let Some(examples) = command.examples() {
            out.push('\n');
            out.push_str(&self.colorizer.heading("Examples"));
            out.push('\n');
            for line in examples.lines() {
                out.push_str("    ");
                out.push_str(line);
                out.push('\n');
            }
        }
        out.trim_end().to_string()
    }

    fn tagged(&self, attribute: Option<&str>, description: &str) -> String {
        match attribute {
            Some(attribute) => format!("[{}] {description}", self.colorizer.attribute(attribute)),
            None => description.to_string(),
        }
    }
}

/// All spellings of an option on one line, e.g. `--output -o`
fn spelling_line(option: &CatalogOption) -> String {
    option.spellings().collect::<Vec<_>>().join(" ")
}

//! Node matching rules

use crate::error::{FindError, SearchResult};
use serde::Serialize;
use serde_json::{Map, Value};

/// Target searched for when none is configured
pub const DEFAULT_TARGET: &str = "Manual Setup";

/// Node type whose `characters` are searched
pub const TEXT_NODE_TYPE: &str = "TEXT";

/// Which rule made a node match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// `name` equals the target
    Name,
    /// TEXT node whose `characters` contain the target
    Characters,
}

/// Decides whether a node matches a target string.
///
/// Comparisons are case-sensitive and untrimmed. A missing or non-string
/// `name`/`characters` field compares as the empty string.
#[derive(Debug, Clone)]
pub struct Matcher {
    target: String,
    text_node_type: String,
}

impl Matcher {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            text_node_type: TEXT_NODE_TYPE.to_string(),
        }
    }

    /// Override the node type whose text content is searched
    pub fn with_text_node_type(mut self, node_type: impl Into<String>) -> Self {
        self.text_node_type = node_type.into();
        self
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Return the rule that matched, preferring [`MatchRule::Name`] when both do.
    pub fn matches(&self, node: &Map<String, Value>) -> Option<MatchRule> {
        if str_field(node, "name") == self.target {
            return Some(MatchRule::Name);
        }

        let is_text = node.get("type").and_then(Value::as_str) == Some(self.text_node_type.as_str());
        if is_text && str_field(node, "characters").contains(self.target.as_str()) {
            return Some(MatchRule::Characters);
        }

        None
    }

    pub fn is_match(&self, node: &Map<String, Value>) -> bool {
        self.matches(node).is_some()
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET)
    }
}

fn str_field<'a>(node: &'a Map<String, Value>, field: &str) -> &'a str {
    node.get(field).and_then(Value::as_str).unwrap_or("")
}

/// Report text for a field: strings verbatim, other values as JSON, missing as empty
fn display_field(node: &Map<String, Value>, field: &str) -> String {
    match node.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// Reported fields of a matching node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
}

impl MatchRecord {
    /// Extract the reported fields. `index` is the node's pre-order position,
    /// used only for error messages.
    pub fn from_node(node: &Map<String, Value>, index: usize) -> SearchResult<Self> {
        let required = |field: &'static str| {
            node.get(field)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or(FindError::MissingField { field, index })
        };

        Ok(Self {
            id: required("id")?,
            name: display_field(node, "name"),
            node_type: required("type")?,
        })
    }
}

impl std::fmt::Display for MatchRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ID={}, Name={}, Type={}", self.id, self.name, self.node_type)
    }
}

//! Core search engine: walk the node tree and collect matches

use crate::error::{FindError, SearchResult};
use crate::matcher::MatchRecord;
use crate::parser::{document_root, DocumentSource};
use crate::search::config::{OutputFormat, SearchConfig};
use crate::search::stats::SearchStatistics;
use crate::walker::{walk, CHILDREN_FIELD};
use serde_json::Value;
use std::io::{self, Write};
use std::time::Instant;

/// Result of a completed traversal
#[derive(Debug, Clone)]
pub struct SearchReport {
    /// Matching nodes in pre-order
    pub matches: Vec<MatchRecord>,
    pub stats: SearchStatistics,
}

impl SearchReport {
    /// Whether any node matched
    pub fn found(&self) -> bool {
        !self.matches.is_empty()
    }
}

/// Read and parse the configured input, returning the whole export.
///
/// The export is checked for a `document` field here so that a missing root
/// is reported as a load failure.
pub fn load_export(config: &SearchConfig) -> SearchResult<Value> {
    let source = DocumentSource::File(config.input.clone());
    let export = source.parse(config.max_file_size)?;
    document_root(&export)?;
    tracing::debug!(source = %source.description(), "parsed export");
    Ok(export)
}

/// Walk the tree under `root` and collect every matching node.
///
/// Nodes must be JSON objects and `children`, when present, must be an
/// array; anything else fails the whole search.
pub fn search_document(root: &Value, config: &SearchConfig) -> SearchResult<SearchReport> {
    let start_time = Instant::now();
    let matcher = config.matcher();
    let mut stats = SearchStatistics::new();
    let mut matches = Vec::new();

    let mut walker = walk(root);
    let mut index = 0;
    while let Some(node) = walker.next() {
        let object = node
            .as_object()
            .ok_or_else(|| FindError::malformed(index, format!("expected an object, found {}", kind_of(node))))?;

        if let Some(children) = object.get(CHILDREN_FIELD) {
            if !children.is_array() {
                return Err(FindError::malformed(
                    index,
                    format!("'children' must be an array, found {}", kind_of(children)),
                ));
            }
        }

        let is_text = object.get("type").and_then(Value::as_str) == Some(config.text_node_type.as_str());
        stats.record_node(walker.depth(), is_text);

        if let Some(rule) = matcher.matches(object) {
            let record = MatchRecord::from_node(object, index)?;
            tracing::debug!(id = %record.id, ?rule, "node matched");
            stats.record_match(rule);
            matches.push(record);
        }

        index += 1;
    }

    stats.set_elapsed(start_time.elapsed());
    tracing::debug!(
        nodes = stats.nodes_visited,
        matches = matches.len(),
        "traversal complete"
    );

    Ok(SearchReport { matches, stats })
}

/// Load, search and write the report for one run.
///
/// Search failures are written to `out` as a single `Error:` line and
/// returned as the inner `Err`; only write failures surface as the outer
/// `io::Error`.
pub fn execute<W: Write>(config: &SearchConfig, out: &mut W) -> io::Result<SearchResult<SearchReport>> {
    let export = match load_export(config) {
        Ok(export) => export,
        Err(e) => {
            write_error(&e, out)?;
            return Ok(Err(e));
        }
    };

    if !config.quiet && config.format == OutputFormat::Text {
        writeln!(out, "Loaded JSON")?;
    }

    let result = document_root(&export).and_then(|root| search_document(root, config));
    match &result {
        Ok(report) => render(report, config.format, out)?,
        Err(e) => write_error(e, out)?,
    }

    Ok(result)
}

/// Write a report in the requested format
pub fn render<W: Write>(report: &SearchReport, format: OutputFormat, out: &mut W) -> io::Result<()> {
    match format {
        OutputFormat::Text => render_text(report, out),
        OutputFormat::JsonLines => render_json_lines(report, out),
    }
}

/// `FOUND:` line per match, or `Not found`
pub fn render_text<W: Write>(report: &SearchReport, out: &mut W) -> io::Result<()> {
    for record in &report.matches {
        writeln!(out, "FOUND: {}", record)?;
    }
    if !report.found() {
        writeln!(out, "Not found")?;
    }
    Ok(())
}

/// One JSON object per match; nothing when there are no matches
pub fn render_json_lines<W: Write>(report: &SearchReport, out: &mut W) -> io::Result<()> {
    for record in &report.matches {
        serde_json::to_writer(&mut *out, record)?;
        writeln!(out)?;
    }
    Ok(())
}

fn write_error<W: Write>(error: &FindError, out: &mut W) -> io::Result<()> {
    tracing::warn!(%error, "search failed");
    writeln!(out, "Error: {}", error.user_message())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    fn run_text(root: &Value) -> String {
        let report = search_document(root, &SearchConfig::default()).unwrap();
        let mut out = Vec::new();
        render_text(&report, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn execute_on(content: Option<&str>, config: SearchConfig) -> (String, SearchResult<SearchReport>) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("figma_full.json");
        if let Some(content) = content {
            fs::write(&path, content).unwrap();
        }
        let mut out = Vec::new();
        let result = execute(&config.with_input(path), &mut out).unwrap();
        (String::from_utf8(out).unwrap(), result)
    }

    #[test]
    fn test_text_match_in_child() {
        let root = json!({
            "id": "0", "type": "DOCUMENT", "name": "Root",
            "children": [{"id": "1", "type": "TEXT", "name": "x", "characters": "see Manual Setup guide"}]
        });
        assert_eq!(run_text(&root), "FOUND: ID=1, Name=x, Type=TEXT\n");
    }

    #[test]
    fn test_name_match_without_characters() {
        let root = json!({"id": "2", "type": "FRAME", "name": "Manual Setup"});
        assert_eq!(run_text(&root), "FOUND: ID=2, Name=Manual Setup, Type=FRAME\n");
    }

    #[test]
    fn test_no_match_reports_not_found() {
        let root = json!({
            "id": "0", "type": "DOCUMENT", "name": "Root",
            "children": [
                {"id": "1", "type": "FRAME", "name": "Automatic Setup"},
                {"id": "2", "type": "TEXT", "name": "Manual Setup label", "characters": "manual setup"}
            ]
        });
        assert_eq!(run_text(&root), "Not found\n");
    }

    #[test]
    fn test_matches_follow_pre_order() {
        let root = json!({
            "id": "0", "type": "DOCUMENT",
            "children": [
                {"id": "1", "type": "FRAME", "name": "Manual Setup", "children": [
                    {"id": "1.1", "type": "TEXT", "name": "t", "characters": "Manual Setup steps"}
                ]},
                {"id": "2", "type": "TEXT", "name": "Manual Setup", "characters": "x"}
            ]
        });
        let report = search_document(&root, &SearchConfig::default()).unwrap();
        let ids: Vec<_> = report.matches.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "1.1", "2"]);
        assert_eq!(report.stats.nodes_visited, 4);
        assert_eq!(report.stats.name_matches, 2);
        assert_eq!(report.stats.text_matches, 1);
        assert_eq!(report.stats.max_depth, 2);
    }

    #[test]
    fn test_search_is_idempotent() {
        let root = json!({
            "id": "0", "type": "DOCUMENT",
            "children": [{"id": "1", "type": "TEXT", "characters": "Manual Setup"}]
        });
        assert_eq!(run_text(&root), run_text(&root));
    }

    #[test]
    fn test_non_object_node_is_malformed() {
        let root = json!({"id": "0", "type": "DOCUMENT", "children": [{"id": "1", "type": "FRAME"}, "oops"]});
        match search_document(&root, &SearchConfig::default()) {
            Err(FindError::MalformedNode { index, message }) => {
                assert_eq!(index, 2);
                assert!(message.contains("a string"));
            }
            other => panic!("expected malformed node, got {:?}", other),
        }
    }

    #[test]
    fn test_non_array_children_is_malformed() {
        let root = json!({"id": "0", "type": "DOCUMENT", "children": {"id": "1"}});
        assert!(matches!(
            search_document(&root, &SearchConfig::default()),
            Err(FindError::MalformedNode { index: 0, .. })
        ));
    }

    #[test]
    fn test_matched_node_without_id_fails() {
        let root = json!({"id": "0", "type": "DOCUMENT", "children": [{"type": "FRAME", "name": "Manual Setup"}]});
        assert!(matches!(
            search_document(&root, &SearchConfig::default()),
            Err(FindError::MissingField { field: "id", index: 1 })
        ));
    }

    #[test]
    fn test_unmatched_nodes_need_no_id() {
        let root = json!({"type": "DOCUMENT", "children": [{"name": "Other"}]});
        assert_eq!(run_text(&root), "Not found\n");
    }

    #[test]
    fn test_json_lines_format() {
        let root = json!({"id": "2", "type": "FRAME", "name": "Manual Setup"});
        let report = search_document(&root, &SearchConfig::default()).unwrap();
        let mut out = Vec::new();
        render(&report, OutputFormat::JsonLines, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"id\":\"2\",\"name\":\"Manual Setup\",\"type\":\"FRAME\"}\n"
        );
    }

    #[test]
    fn test_execute_success_output() {
        let content = r#"{"document": {"id":"0","type":"DOCUMENT","name":"Root","children":[{"id":"1","type":"TEXT","name":"x","characters":"see Manual Setup guide"}]}}"#;
        let (output, result) = execute_on(Some(content), SearchConfig::default());
        assert_eq!(output, "Loaded JSON\nFOUND: ID=1, Name=x, Type=TEXT\n");
        assert!(result.unwrap().found());
    }

    #[test]
    fn test_execute_quiet_skips_progress_line() {
        let content = r#"{"document": {"id":"0","type":"DOCUMENT"}}"#;
        let (output, _) = execute_on(Some(content), SearchConfig::default().with_quiet(true));
        assert_eq!(output, "Not found\n");
    }

    #[test]
    fn test_execute_missing_file() {
        let (output, result) = execute_on(None, SearchConfig::default());
        assert_eq!(output.lines().count(), 1);
        assert!(output.starts_with("Error: "));
        assert!(matches!(result, Err(FindError::Io { .. })));
    }

    #[test]
    fn test_execute_malformed_json() {
        let (output, result) = execute_on(Some("{\"document\": "), SearchConfig::default());
        assert_eq!(output.lines().count(), 1);
        assert!(output.starts_with("Error: "));
        assert!(matches!(result, Err(FindError::JsonParse { .. })));
    }

    #[test]
    fn test_execute_missing_document() {
        let (output, result) = execute_on(Some(r#"{"name": "file"}"#), SearchConfig::default());
        assert_eq!(output, "Error: Document root is missing the 'document' field\n");
        assert!(matches!(result, Err(FindError::MissingDocument)));
    }

    #[test]
    fn test_execute_deeply_nested_export() {
        let depth = 200;
        let mut content = String::from(r#"{"document": "#);
        for i in 0..depth {
            content.push_str(&format!(r#"{{"id": "f{}", "type": "FRAME", "name": "Frame", "children": ["#, i));
        }
        content.push_str(r#"{"id": "leaf", "type": "FRAME", "name": "Manual Setup"}"#);
        content.push_str(&"]}".repeat(depth));
        content.push('}');

        let (output, result) = execute_on(Some(&content), SearchConfig::default());
        assert_eq!(output, "Loaded JSON\nFOUND: ID=leaf, Name=Manual Setup, Type=FRAME\n");

        let report = result.unwrap();
        assert_eq!(report.stats.nodes_visited, depth + 1);
        assert_eq!(report.stats.max_depth, depth);
    }

    #[test]
    fn test_execute_traversal_failure_has_no_partial_matches() {
        let content = r#"{"document": {"id":"0","type":"DOCUMENT","children":[
            {"id":"1","type":"FRAME","name":"Manual Setup"},
            {"type":"FRAME","name":"Manual Setup"}
        ]}}"#;
        let (output, result) = execute_on(Some(content), SearchConfig::default());
        assert!(result.is_err());
        assert!(!output.contains("FOUND"));
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Loaded JSON");
        assert!(lines[1].starts_with("Error: "));
    }
}

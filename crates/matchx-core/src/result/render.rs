//! Annotated diff rendering.
//!
//! Walks the judged value and prints every failure on the line(s) before
//! the part of the value it applies to. Subtrees that matched are shown in
//! abridged form.

use super::MatchResult;
use crate::model::value::{jsonify, ValueExt};
use indexmap::IndexSet;
use serde_json::Value;
use std::collections::BTreeSet;

pub(super) fn render_mismatch(result: &MatchResult<'_>) -> String {
    if !result.has_failed() {
        return "<match>".to_string();
    }

    let mut renderer = Renderer::default();
    renderer.emit_failures(result, "", None);
    renderer.recurse(result);
    move_markers_to_front(renderer.out.trim_end())
}

#[derive(Default)]
struct Renderer {
    out: String,
    depth: usize,
}

impl Renderer {
    /// Append text; every newline picks up the current indentation
    fn emit(&mut self, text: &str) {
        let indent = "  ".repeat(self.depth);
        for (i, piece) in text.split('\n').enumerate() {
            if i > 0 {
                self.out.push('\n');
                self.out.push_str(&indent);
            }
            self.out.push_str(piece);
        }
    }

    fn emit_failures(
        &mut self,
        result: &MatchResult<'_>,
        key: &str,
        remaining: Option<&mut IndexSet<String>>,
    ) {
        for failure in result.failures_at(key) {
            self.emit(&format!("!! {}\n", failure.message));
        }
        if let Some(remaining) = remaining {
            remaining.shift_remove(key);
        }
    }

    fn emit_remaining(&mut self, result: &MatchResult<'_>, remaining: &IndexSet<String>) {
        if !remaining.is_empty() {
            self.emit("\n");
        }
        for key in remaining {
            self.emit_failures(result, key, None);
        }
    }

    fn recurse(&mut self, result: &MatchResult<'_>) {
        // Keyed failures not yet printed next to their value
        let mut remaining: IndexSet<String> = result
            .failures_here
            .keys()
            .filter(|k| !k.is_empty())
            .cloned()
            .collect();

        match result.target() {
            Some(Value::Array(items)) => {
                self.depth += 1;
                self.emit("[\n");
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.emit(",\n");
                    }
                    let key = i.to_string();
                    self.emit_failures(result, &key, Some(&mut remaining));
                    match result.inner(&key) {
                        Some(inner) => {
                            self.emit_failures(inner, "", None);
                            self.recurse_comparing_values(inner, Some(item));
                        }
                        None => self.emit(&render_abridged(Some(item))),
                    }
                }
                self.emit_remaining(result, &remaining);
                self.depth -= 1;
                self.emit("\n]");
            }
            Some(Value::Object(entries)) => {
                self.depth += 1;
                self.emit("{\n");
                let keys: BTreeSet<String> = entries
                    .keys()
                    .cloned()
                    .chain(remaining.iter().cloned())
                    .collect();
                for (i, key) in keys.iter().enumerate() {
                    if i > 0 {
                        self.emit(",\n");
                    }
                    self.emit_failures(result, key, Some(&mut remaining));
                    let label = format!("{}: ", Value::String(key.clone()));
                    match result.inner(key) {
                        Some(inner) => {
                            self.emit_failures(inner, "", None);
                            self.emit(&label);
                            self.recurse_comparing_values(inner, entries.get(key));
                        }
                        None => {
                            self.emit(&label);
                            self.emit(&render_abridged(entries.get(key)));
                        }
                    }
                }
                self.emit_remaining(result, &remaining);
                self.depth -= 1;
                self.emit("\n}");
            }
            scalar => {
                self.emit_remaining(result, &remaining);
                self.emit(&jsonify(scalar));
            }
        }
    }

    /// Recurse into `inner`, first printing the value being rendered when
    /// `inner` judged something else (a decoded JSON string, say).
    fn recurse_comparing_values(&mut self, inner: &MatchResult<'_>, actual: Option<&Value>) {
        if !inner.is_target(actual) {
            self.emit(&render_abridged(actual));
            self.emit(" <*> ");
        }
        self.recurse(inner);
    }
}

/// Compact one-line form of a value
fn render_abridged(value: Option<&Value>) -> String {
    match value {
        Some(Value::Array(items)) => match items.as_slice() {
            [] => "[]".to_string(),
            [only] => format!("[ {} ]", render_abridged(Some(only))),
            [a, b] if a.is_primitive() && b.is_primitive() => format!(
                "[ {}, {} ]",
                render_abridged(Some(a)),
                render_abridged(Some(b))
            ),
            _ => "[ ... ]".to_string(),
        },
        Some(Value::Object(entries)) => {
            let mut iter = entries.iter();
            match (iter.next(), iter.next()) {
                (None, _) => "{}".to_string(),
                (Some((key, only)), None) => format!(
                    "{{ {}: {} }}",
                    Value::String(key.clone()),
                    render_abridged(Some(only))
                ),
                _ => "{ ... }".to_string(),
            }
        }
        other => jsonify(other),
    }
}

/// Pull each `!!` marker to the left margin, keeping all but two of the
/// indentation characters after it. Other lines are left as they are,
/// including indent-only lines.
fn move_markers_to_front(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            let rest = line.trim_start();
            let leading = &line[..line.len() - rest.len()];
            match rest.strip_prefix("!!") {
                Some(after) if !leading.is_empty() => {
                    let keep = leading.chars().count().saturating_sub(2);
                    let spaces: String = leading.chars().take(keep).collect();
                    format!("!!{spaces}{after}")
                }
                _ => line.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_abridged_forms() {
        assert_eq!(render_abridged(Some(&json!([]))), "[]");
        assert_eq!(render_abridged(Some(&json!([[1, 2, 3]]))), "[ [ ... ] ]");
        assert_eq!(render_abridged(Some(&json!([1, "a"]))), "[ 1, \"a\" ]");
        assert_eq!(render_abridged(Some(&json!([1, null]))), "[ ... ]");
        assert_eq!(render_abridged(Some(&json!([1, 2, 3]))), "[ ... ]");
        assert_eq!(render_abridged(Some(&json!({}))), "{}");
        assert_eq!(render_abridged(Some(&json!({"k": [4]}))), "{ \"k\": [ 4 ] }");
        assert_eq!(render_abridged(Some(&json!({"a": 1, "b": 2}))), "{ ... }");
        assert_eq!(render_abridged(None), "undefined");
    }

    #[test]
    fn test_markers_move_to_margin() {
        let text = "{\n    !! bad\n    \"a\": 1\n}";
        assert_eq!(move_markers_to_front(text), "{\n!!   bad\n    \"a\": 1\n}");
    }

    #[test]
    fn test_indent_only_lines_are_kept() {
        let text = "[\n  1\n  !! short\n  \n]";
        assert_eq!(move_markers_to_front(text), "[\n  1\n!! short\n  \n]");
    }

    #[test]
    fn test_marker_at_margin_is_left_alone() {
        assert_eq!(move_markers_to_front("!! top\n1"), "!! top\n1");
        assert_eq!(move_markers_to_front(" !! x"), "!! x");
    }
}

//! Unified-diff generation and parsing for page content snapshots.
//!
//! `create_patch` produces the patch text stored on every diff record;
//! `parse_patch` turns stored patch text back into hunks for rendering.

use std::sync::LazyLock;

use regex::Regex;

/// Label used for both sides of a content patch. Cosmetic only; no
/// downstream consumer assigns meaning to it.
pub const PATCH_LABEL: &str = "Content";

/// Regex matching a unified-diff hunk header, e.g. `@@ -1,3 +1,4 @@`.
static HUNK_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@").expect("valid regex")
});

/// Errors raised while interpreting stored patch text.
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    #[error("Malformed hunk header: {0}")]
    MalformedHunkHeader(String),

    #[error("Line outside of any hunk: {0}")]
    LineOutsideHunk(String),
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Create a unified diff between two content snapshots.
///
/// Both sides are labeled [`PATCH_LABEL`]. Output is deterministic: the same
/// inputs always yield byte-identical patch text. Identical inputs (including
/// two empty strings) yield an empty patch with no hunks.
pub fn create_patch(before: &str, after: &str) -> String {
    similar::TextDiff::from_lines(before, after)
        .unified_diff()
        .context_radius(3)
        .header(PATCH_LABEL, PATCH_LABEL)
        .to_string()
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// A single line inside a hunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchLine {
    Context(String),
    Removed(String),
    Added(String),
}

/// One `@@` hunk of a unified diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchHunk {
    pub old_start: usize,
    pub old_count: usize,
    pub new_start: usize,
    pub new_count: usize,
    pub lines: Vec<PatchLine>,
}

/// A parsed unified diff.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedPatch {
    /// Label from the `---` header line, if present.
    pub old_label: Option<String>,
    /// Label from the `+++` header line, if present.
    pub new_label: Option<String>,
    pub hunks: Vec<PatchHunk>,
}

impl ParsedPatch {
    /// `true` if the patch contains no hunks (identical snapshots).
    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }
}

/// Parse unified-diff text into hunks.
///
/// Empty input parses to an empty patch. `\ No newline at end of file`
/// markers are accepted and dropped.
pub fn parse_patch(patch: &str) -> Result<ParsedPatch, PatchError> {
    let mut parsed = ParsedPatch::default();
    let mut current: Option<PatchHunk> = None;

    for line in patch.lines() {
        if let Some(label) = line.strip_prefix("--- ") {
            parsed.old_label = Some(label.to_string());
            continue;
        }
        if let Some(label) = line.strip_prefix("+++ ") {
            parsed.new_label = Some(label.to_string());
            continue;
        }
        if line.starts_with("@@") {
            let caps = HUNK_HEADER_RE
                .captures(line)
                .ok_or_else(|| PatchError::MalformedHunkHeader(line.to_string()))?;
            let num = |i: usize, default: usize| {
                caps.get(i)
                    .map(|m| m.as_str().parse().unwrap_or(default))
                    .unwrap_or(default)
            };
            if let Some(hunk) = current.take() {
                parsed.hunks.push(hunk);
            }
            current = Some(PatchHunk {
                old_start: num(1, 0),
                old_count: num(2, 1),
                new_start: num(3, 0),
                new_count: num(4, 1),
                lines: Vec::new(),
            });
            continue;
        }
        if line.starts_with('\\') {
            // "\ No newline at end of file"
            continue;
        }

        let hunk = match current.as_mut() {
            Some(h) => h,
            // Tolerate preamble text before the first hunk, as `git diff`
            // and other producers emit it; a bare +/-/space line with no
            // hunk open is malformed though.
            None if line.is_empty() => continue,
            None => {
                if line.starts_with('+') || line.starts_with('-') || line.starts_with(' ') {
                    return Err(PatchError::LineOutsideHunk(line.to_string()));
                }
                continue;
            }
        };

        if let Some(rest) = line.strip_prefix('+') {
            hunk.lines.push(PatchLine::Added(rest.to_string()));
        } else if let Some(rest) = line.strip_prefix('-') {
            hunk.lines.push(PatchLine::Removed(rest.to_string()));
        } else if let Some(rest) = line.strip_prefix(' ') {
            hunk.lines.push(PatchLine::Context(rest.to_string()));
        } else {
            // An entirely empty context line may be emitted without the
            // leading space by some producers.
            hunk.lines.push(PatchLine::Context(line.to_string()));
        }
    }

    if let Some(hunk) = current.take() {
        parsed.hunks.push(hunk);
    }

    Ok(parsed)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- create_patch --------------------------------------------------------

    #[test]
    fn patch_is_deterministic() {
        let a = "alpha\nbeta\ngamma\n";
        let b = "alpha\nBETA\ngamma\n";
        assert_eq!(create_patch(a, b), create_patch(a, b));
    }

    #[test]
    fn patch_labels_both_sides_content() {
        let patch = create_patch("old\n", "new\n");
        assert!(patch.starts_with("--- Content\n+++ Content\n"));
    }

    #[test]
    fn patch_marks_added_words() {
        let patch = create_patch("Hello", "Hello world");
        assert!(patch.contains("+Hello world"));
        assert!(patch.contains("-Hello"));
    }

    #[test]
    fn identical_inputs_yield_empty_patch() {
        assert!(create_patch("same\n", "same\n").is_empty());
        assert!(create_patch("", "").is_empty());
    }

    #[test]
    fn empty_before_is_a_valid_input() {
        let patch = create_patch("", "first line\n");
        assert!(patch.contains("+first line"));
        assert!(parse_patch(&patch).is_ok());
    }

    // -- parse_patch ---------------------------------------------------------

    #[test]
    fn parse_roundtrip_counts() {
        let patch = create_patch("one\ntwo\nthree\n", "one\n2\nthree\nfour\n");
        let parsed = parse_patch(&patch).unwrap();
        assert_eq!(parsed.old_label.as_deref(), Some("Content"));
        assert_eq!(parsed.new_label.as_deref(), Some("Content"));
        assert_eq!(parsed.hunks.len(), 1);

        let hunk = &parsed.hunks[0];
        let removed = hunk
            .lines
            .iter()
            .filter(|l| matches!(l, PatchLine::Removed(_)))
            .count();
        let added = hunk
            .lines
            .iter()
            .filter(|l| matches!(l, PatchLine::Added(_)))
            .count();
        assert_eq!(removed, 1);
        assert_eq!(added, 2);
    }

    #[test]
    fn parse_empty_patch() {
        let parsed = parse_patch("").unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn parse_rejects_malformed_hunk_header() {
        let err = parse_patch("--- Content\n+++ Content\n@@ bogus @@\n old\n").unwrap_err();
        assert!(matches!(err, PatchError::MalformedHunkHeader(_)));
    }

    #[test]
    fn parse_rejects_change_line_outside_hunk() {
        let err = parse_patch("+stray\n").unwrap_err();
        assert!(matches!(err, PatchError::LineOutsideHunk(_)));
    }

    #[test]
    fn parse_drops_no_newline_marker() {
        let patch = create_patch("no newline", "still no newline");
        let parsed = parse_patch(&patch).unwrap();
        for hunk in &parsed.hunks {
            for line in &hunk.lines {
                let text = match line {
                    PatchLine::Context(s) | PatchLine::Removed(s) | PatchLine::Added(s) => s,
                };
                assert!(!text.contains("No newline"));
            }
        }
    }
}

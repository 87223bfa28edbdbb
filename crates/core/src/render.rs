//! HTML rendering of stored unified-diff text.
//!
//! Produces a self-contained HTML fragment for the dashboard history panel:
//! a side-by-side table by default, with removed/added line runs paired up
//! and word-level changes wrapped in highlight spans. Styling is left to the
//! consumer via the `diff-*` classes.

use similar::{ChangeTag, TextDiff};

use crate::patch::{parse_patch, ParsedPatch, PatchError, PatchHunk, PatchLine};

/// Rendering options. The defaults match the dashboard's history panel:
/// word-level highlighting, line-based matching, side-by-side layout, no
/// label header.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Highlight intra-line word changes on paired lines.
    pub word_highlight: bool,
    /// Pair removed/added runs index-wise instead of stacking them.
    pub match_lines: bool,
    /// Two-column layout; `false` renders a single unified column.
    pub side_by_side: bool,
    /// Emit a header line with the patch labels.
    pub label_header: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            word_highlight: true,
            match_lines: true,
            side_by_side: true,
            label_header: false,
        }
    }
}

/// Render unified-diff text to HTML with default options.
///
/// An empty patch renders an empty diff view, not an error.
pub fn render_diff_html(patch: &str) -> Result<String, PatchError> {
    render_diff_html_with(patch, &RenderOptions::default())
}

/// Render unified-diff text to HTML.
pub fn render_diff_html_with(patch: &str, options: &RenderOptions) -> Result<String, PatchError> {
    let parsed = parse_patch(patch)?;
    if parsed.is_empty() {
        return Ok(r#"<div class="diff diff-empty"></div>"#.to_string());
    }

    let mut html = String::new();
    if options.label_header {
        push_label_header(&mut html, &parsed);
    }
    html.push_str(r#"<table class="diff"><tbody>"#);
    for hunk in &parsed.hunks {
        render_hunk(&mut html, hunk, options);
    }
    html.push_str("</tbody></table>");
    Ok(html)
}

fn push_label_header(html: &mut String, parsed: &ParsedPatch) {
    let old = parsed.old_label.as_deref().unwrap_or("");
    let new = parsed.new_label.as_deref().unwrap_or("");
    html.push_str(r#"<div class="diff-file">"#);
    html.push_str(&escape_html(old));
    if new != old {
        html.push_str(" / ");
        html.push_str(&escape_html(new));
    }
    html.push_str("</div>");
}

fn render_hunk(html: &mut String, hunk: &PatchHunk, options: &RenderOptions) {
    let colspan = if options.side_by_side { 4 } else { 3 };
    html.push_str(&format!(
        r#"<tr class="diff-hunk"><td class="diff-hunk-header" colspan="{}">@@ -{},{} +{},{} @@</td></tr>"#,
        colspan, hunk.old_start, hunk.old_count, hunk.new_start, hunk.new_count,
    ));

    let mut old_num = hunk.old_start;
    let mut new_num = hunk.new_start;
    let mut removed: Vec<&str> = Vec::new();
    let mut added: Vec<&str> = Vec::new();

    for line in &hunk.lines {
        match line {
            PatchLine::Removed(text) => removed.push(text),
            PatchLine::Added(text) => added.push(text),
            PatchLine::Context(text) => {
                flush_runs(html, &mut removed, &mut added, &mut old_num, &mut new_num, options);
                render_context_row(html, text, old_num, new_num, options);
                old_num += 1;
                new_num += 1;
            }
        }
    }
    flush_runs(html, &mut removed, &mut added, &mut old_num, &mut new_num, options);
}

/// Emit the pending removed/added runs and advance the line counters.
fn flush_runs(
    html: &mut String,
    removed: &mut Vec<&str>,
    added: &mut Vec<&str>,
    old_num: &mut usize,
    new_num: &mut usize,
    options: &RenderOptions,
) {
    if removed.is_empty() && added.is_empty() {
        return;
    }

    if options.side_by_side && options.match_lines {
        let rows = removed.len().max(added.len());
        for i in 0..rows {
            let old = removed.get(i).copied();
            let new = added.get(i).copied();
            let (old_html, new_html) = match (old, new) {
                (Some(o), Some(n)) if options.word_highlight => word_diff(o, n),
                (o, n) => (
                    o.map(escape_html).unwrap_or_default(),
                    n.map(escape_html).unwrap_or_default(),
                ),
            };
            html.push_str("<tr>");
            push_half_row(html, old.map(|_| *old_num + i), &old_html, old.is_some(), "diff-del");
            push_half_row(html, new.map(|_| *new_num + i), &new_html, new.is_some(), "diff-ins");
            html.push_str("</tr>");
        }
    } else if options.side_by_side {
        for (i, text) in removed.iter().enumerate() {
            html.push_str("<tr>");
            push_half_row(html, Some(*old_num + i), &escape_html(text), true, "diff-del");
            push_half_row(html, None, "", false, "diff-ins");
            html.push_str("</tr>");
        }
        for (i, text) in added.iter().enumerate() {
            html.push_str("<tr>");
            push_half_row(html, None, "", false, "diff-del");
            push_half_row(html, Some(*new_num + i), &escape_html(text), true, "diff-ins");
            html.push_str("</tr>");
        }
    } else {
        for (i, text) in removed.iter().enumerate() {
            render_unified_row(html, Some(*old_num + i), None, "-", &escape_html(text), "diff-del");
        }
        for (i, text) in added.iter().enumerate() {
            render_unified_row(html, None, Some(*new_num + i), "+", &escape_html(text), "diff-ins");
        }
    }

    *old_num += removed.len();
    *new_num += added.len();
    removed.clear();
    added.clear();
}

fn render_context_row(html: &mut String, text: &str, old_num: usize, new_num: usize, options: &RenderOptions) {
    let escaped = escape_html(text);
    if options.side_by_side {
        html.push_str("<tr>");
        push_half_row(html, Some(old_num), &escaped, true, "diff-ctx");
        push_half_row(html, Some(new_num), &escaped, true, "diff-ctx");
        html.push_str("</tr>");
    } else {
        render_unified_row(html, Some(old_num), Some(new_num), " ", &escaped, "diff-ctx");
    }
}

/// One side of a side-by-side row: a line-number cell and a content cell.
fn push_half_row(html: &mut String, num: Option<usize>, content: &str, present: bool, class: &str) {
    match num {
        Some(n) => html.push_str(&format!(r#"<td class="diff-lnum">{n}</td>"#)),
        None => html.push_str(r#"<td class="diff-lnum"></td>"#),
    }
    if present {
        html.push_str(&format!(r#"<td class="diff-line {class}">{content}</td>"#));
    } else {
        html.push_str(r#"<td class="diff-line diff-absent"></td>"#);
    }
}

fn render_unified_row(
    html: &mut String,
    old_num: Option<usize>,
    new_num: Option<usize>,
    marker: &str,
    content: &str,
    class: &str,
) {
    let old = old_num.map(|n| n.to_string()).unwrap_or_default();
    let new = new_num.map(|n| n.to_string()).unwrap_or_default();
    html.push_str(&format!(
        r#"<tr class="{class}"><td class="diff-lnum">{old}</td><td class="diff-lnum">{new}</td><td class="diff-line"><span class="diff-marker">{marker}</span>{content}</td></tr>"#,
    ));
}

/// Word-level diff of a paired removed/added line. Returns escaped HTML for
/// the old and new sides with changed words wrapped in highlight spans.
fn word_diff(old: &str, new: &str) -> (String, String) {
    let diff = TextDiff::from_words(old, new);
    let mut old_html = String::new();
    let mut new_html = String::new();
    for change in diff.iter_all_changes() {
        let escaped = escape_html(change.value());
        match change.tag() {
            ChangeTag::Equal => {
                old_html.push_str(&escaped);
                new_html.push_str(&escaped);
            }
            ChangeTag::Delete => {
                old_html.push_str(&format!(r#"<span class="diff-word-del">{escaped}</span>"#));
            }
            ChangeTag::Insert => {
                new_html.push_str(&format!(r#"<span class="diff-word-ins">{escaped}</span>"#));
            }
        }
    }
    (old_html, new_html)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

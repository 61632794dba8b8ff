use crate::diff::Diff;
use crate::model::{NodeRef, Role};
use std::fmt;

/// Render a diff tree as depth-indented text
///
/// Each diff becomes one block:
///
/// ```text
/// kind = VALUE MISMATCH
/// hits = 2
/// misses = 1
/// expected = list/1 (4)
/// actual = list/0 (1)
/// ```
///
/// followed by a blank line. Nested diffs are indented two spaces per
/// level. `max_depth` of `Some(0)` renders only the root block.
pub fn render_diff(diff: &Diff<'_>, max_depth: Option<usize>) -> String {
    let mut out = String::new();
    render_level(&mut out, diff, 0, max_depth);
    out
}

fn render_level(out: &mut String, diff: &Diff<'_>, level: usize, max_depth: Option<usize>) {
    let tab = "  ".repeat(level);
    out.push_str(&format!("{tab}kind = {}\n", diff.kind()));
    out.push_str(&format!("{tab}hits = {}\n", diff.hits()));
    out.push_str(&format!("{tab}misses = {}\n", diff.misses()));
    out.push_str(&format!("{tab}expected = {}\n", describe(diff.expected())));
    out.push_str(&format!("{tab}actual = {}\n", describe(diff.actual())));
    out.push('\n');

    if max_depth.is_some_and(|limit| level >= limit) {
        if !diff.children().is_empty() {
            out.push_str(&format!(
                "{tab}  ... {} nested diff(s) not shown\n\n",
                diff.children().len()
            ));
        }
        return;
    }
    for child in diff.children() {
        render_level(out, child, level + 1, max_depth);
    }
}

fn describe<R: Role>(node: NodeRef<'_, R>) -> String {
    match node.value() {
        Some(value) => format!("{} ({})", node.path(), value),
        None => node.path(),
    }
}

impl Diff<'_> {
    /// Text form of this diff, see [`render_diff`]
    pub fn render(&self, max_depth: Option<usize>) -> String {
        render_diff(self, max_depth)
    }
}

impl fmt::Display for Diff<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_diff(self, None))
    }
}

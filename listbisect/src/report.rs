//! Plain-text rendering of query results for the CLI.

use std::fmt::Write as _;

use crate::sequence::Status;
use crate::session::SummaryLine;

/// Completion banner followed by the full summary.
pub fn render_complete(boundary: &str, summary: &[SummaryLine]) -> String {
    let mut out = format!("Bisect complete, first bad version is: {boundary}\n");
    out.push_str(&render_summary(summary));
    out
}

/// `Bisect Summary:` header and one `<label> <status>` line per item.
///
/// Unmarked items print their label alone.
pub fn render_summary(summary: &[SummaryLine]) -> String {
    let mut out = String::from("Bisect Summary:\n");
    for line in summary {
        match line.status {
            Status::Unmarked => out.push_str(&line.label),
            status => {
                let _ = write!(out, "{} {}", line.label, status);
            }
        }
        out.push('\n');
    }
    out
}

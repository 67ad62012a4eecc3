//! Deterministic terminal formatting for the status card.
//!
//! Output changes stay localized here (important for the golden tests).

use crate::domain::StatusSummary;

/// Format the status card printed by `cg assess` and shown in the TUI.
pub fn format_status_card(summary: &StatusSummary, notes: &[String]) -> String {
    let mut out = String::new();

    out.push_str("=== Credit Risk Assessment ===\n\n");
    out.push_str(&summary.headline);
    out.push('\n');
    out.push_str(&format!(
        "{}: {:.1}%\n",
        summary.probability_label, summary.probability_pct
    ));
    out.push('\n');
    out.push_str(&summary.recommendation);
    out.push('\n');

    for note in notes {
        out.push_str(&format!("note: {note}\n"));
    }

    out
}

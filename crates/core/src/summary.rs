//! Renders the section summarising the failed jobs of one workflow.

use comment_failure_developer_platforms::models::CheckRun;
use indoc::formatdoc;

use crate::body::Section;
use crate::config::NO_FAILURES_MESSAGE;

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;

/// Escapes text so that it stays inside a single Markdown table cell.
fn table_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}

/// Renders the section owned by `workflow` for the given failed runs.
///
/// The section starts with the ownership tag and a heading naming the
/// workflow. With no failures it contains a single all-clear line, otherwise
/// a `job | url` table with one row per run, in the order given.
pub fn render(workflow: &str, failed_runs: &[CheckRun]) -> Section {
    let details = if failed_runs.is_empty() {
        NO_FAILURES_MESSAGE.to_string()
    } else {
        let rows: Vec<String> = failed_runs
            .iter()
            .map(|run| format!("| {} | {} |", table_cell(&run.title), table_cell(&run.url)))
            .collect();

        formatdoc!(
            "| job | url |
            | --- | --- |
            {rows}",
            rows = rows.join("\n")
        )
    };

    let content = formatdoc!(
        "### {workflow}
        {details}",
        workflow = workflow,
        details = details
    );

    Section::owned_by(workflow, &content)
}

//! JSON-lines trial report

use std::path::Path;

use qpole_core::Result;

use crate::trainer::TrainingReport;

/// Render one JSON object per trial followed by a summary line
pub fn to_json_lines(report: &TrainingReport) -> Result<String> {
    let mut out = String::new();
    for trial in &report.trials {
        out.push_str(&serde_json::to_string(trial)?);
        out.push('\n');
    }
    let summary = serde_json::json!({
        "outcome": report.outcome,
        "metrics": report.metrics,
    });
    out.push_str(&serde_json::to_string(&summary)?);
    out.push('\n');
    Ok(out)
}

/// Write the report to `path`, replacing any existing file
pub async fn write_report(path: &Path, report: &TrainingReport) -> Result<()> {
    let content = to_json_lines(report)?;
    tokio::fs::write(path, content).await?;
    Ok(())
}

//! Output Rendering
//!
//! Text and JSON renderings of command results. Progress lines come from the
//! event sinks; these are the final summaries.

use crate::application::{HeaderCheck, PipelineReport};
use crate::domain::entities::DeclarationSet;
use crate::domain::services::{HeaderStatus, Stage};

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for scripting
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// One line per declaration: `Class.method(desc) -> symbol`
pub fn render_declarations(declarations: &DeclarationSet, detailed: bool) -> String {
    let mut out = String::new();
    for decl in declarations.iter() {
        out.push_str(&format!(
            "{}.{}{} -> {}\n",
            decl.owning_class(),
            decl.method_name(),
            decl.descriptor(),
            decl.native_symbol()
        ));
        if detailed {
            out.push_str(&format!(
                "    {}  ({}:{})\n",
                decl.display_signature(),
                decl.source().display(),
                decl.line()
            ));
        }
    }
    out.push_str(&format!(
        "{} native declaration(s)\n",
        declarations.len()
    ));
    out
}

pub fn declarations_json(declarations: &DeclarationSet) -> serde_json::Value {
    let items: Vec<serde_json::Value> = declarations
        .iter()
        .map(|decl| {
            serde_json::json!({
                "class": decl.owning_class(),
                "method": decl.method_name(),
                "descriptor": decl.descriptor(),
                "symbol": decl.native_symbol(),
                "static": decl.is_static(),
                "source": decl.source().display().to_string(),
                "line": decl.line(),
            })
        })
        .collect();
    serde_json::json!({
        "event": "declarations",
        "count": declarations.len(),
        "declarations": items,
    })
}

/// Staleness report; unified diffs only when `detailed`
pub fn render_check(check: &HeaderCheck, detailed: bool) -> String {
    let mut out = String::new();
    for drift in check.out_of_date() {
        let line = match &drift.status {
            HeaderStatus::UpToDate => continue,
            HeaderStatus::Missing => format!("  missing  {}\n", drift.file_name),
            HeaderStatus::Orphan => format!("  orphan   {}\n", drift.file_name),
            HeaderStatus::Stale {
                additions,
                deletions,
                ..
            } => format!(
                "  stale    {} (+{} -{})\n",
                drift.file_name, additions, deletions
            ),
        };
        out.push_str(&line);
        if let (true, HeaderStatus::Stale { diff, .. }) = (detailed, &drift.status) {
            out.push_str(diff);
        }
    }

    let stale = check.out_of_date().count();
    if stale == 0 {
        out.push_str(&format!(
            "headers up to date ({} file(s), {} declaration(s))\n",
            check.drift.len(),
            check.declarations
        ));
    } else {
        out.push_str(&format!(
            "{} header(s) out of date; run `bridgewright headers`\n",
            stale
        ));
    }
    out
}

pub fn check_json(check: &HeaderCheck) -> serde_json::Value {
    serde_json::json!({
        "event": "check",
        "clean": check.is_clean(),
        "declarations": check.declarations,
        "headers": check.drift,
    })
}

/// `scan -> generate-headers -> ...`
pub fn render_plan(plan: &[Stage]) -> String {
    let mut out = String::new();
    for (i, stage) in plan.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, stage));
    }
    out
}

pub fn plan_json(goal: &str, plan: &[Stage]) -> serde_json::Value {
    serde_json::json!({
        "event": "plan",
        "goal": goal,
        "stages": plan,
    })
}

/// Closing summary printed after a successful run
pub fn render_report(report: &PipelineReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}: {} declaration(s), {} header(s)",
        report.goal,
        report.declarations,
        report.headers.len()
    ));
    if !report.deleted_headers.is_empty() {
        out.push_str(&format!(", {} removed", report.deleted_headers.len()));
    }
    if !report.packaged.is_empty() {
        out.push_str(&format!(", {} packaged", report.packaged.len()));
    }
    out.push_str(&format!(" in {} ms\n", report.elapsed_ms()));
    out
}

pub fn report_json(report: &PipelineReport) -> serde_json::Value {
    let headers: Vec<serde_json::Value> = report
        .headers
        .iter()
        .map(|h| {
            serde_json::json!({
                "path": h.target_path().display().to_string(),
                "class": h.owning_class(),
                "hash": h.content_hash(),
            })
        })
        .collect();
    serde_json::json!({
        "event": "report",
        "goal": report.goal.as_str(),
        "stages": report.stages,
        "declarations": report.declarations,
        "headers": headers,
        "deleted_headers": report
            .deleted_headers
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>(),
        "artifact": report.artifact,
        "packaged": report.packaged,
        "dropped": report.dropped,
        "started_at": report.started_at,
        "finished_at": report.finished_at,
    })
}

//! Row export, the round-trip companion to the parser.
//!
//! Feeding the exported rows back through [`crate::parse`] reproduces every
//! node's title, belief, and confidence. Project and lens rows are
//! best-effort: fields without an export column do not survive.

use crate::model::{BeliefNode, BeliefTree, InsightKind, LensEntry, Project};
use crate::record::RawRecord;

/// Serialize a tree into labeled rows
pub fn export_rows(tree: &BeliefTree) -> Vec<RawRecord> {
    let mut rows = Vec::new();

    rows.push(scalar_row("title", &tree.title));
    rows.push(scalar_row("mode", tree.mode.as_str()));
    for p in 1..=3u8 {
        rows.push(scalar_row(
            format!("pillar_name:{p}"),
            tree.pillar_name(p).unwrap_or(""),
        ));
    }

    rows.push(node_row("core", &tree.core));
    for p in 1..=3u8 {
        if let Some(node) = tree.pillar(p) {
            rows.push(node_row(format!("pillar:{p}"), node));
        }
    }
    for p in 1..=3u8 {
        for s in 1..=3u8 {
            if let Some(node) = tree.sub(p, s) {
                rows.push(node_row(format!("sub:{p}:{s}"), node));
            }
        }
    }
    for p in 1..=3u8 {
        for s in 1..=3u8 {
            for m in 1..=3u8 {
                if let Some(node) = tree.micro(p, s, m) {
                    rows.push(node_row(format!("micro:{p}:{s}:{m}"), node));
                }
            }
        }
    }

    // Insight rows are written only when set, so a sparse map exports sparse
    for kind in InsightKind::ALL {
        push_insight(&mut rows, format!("insight_{}", kind.key()), tree, None, kind);
    }
    for p in 1..=3u8 {
        for kind in InsightKind::ALL {
            push_insight(
                &mut rows,
                format!("insight_pillar_{p}_{}", kind.key()),
                tree,
                Some(p),
                kind,
            );
        }
    }

    for lens in &tree.lenses {
        rows.push(lens_row(lens));
    }
    for project in &tree.projects {
        rows.push(project_row(project));
    }

    rows
}

fn opt(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Trim a trailing ".0" so whole numbers export as integers
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn scalar_row(label: impl Into<String>, belief: &str) -> RawRecord {
    RawRecord {
        belief: opt(belief),
        ..RawRecord::with_label(label)
    }
}

fn node_fields(node: &BeliefNode, row: &mut RawRecord) {
    row.title = opt(&node.title);
    row.belief = opt(&node.belief);
    // Confidence is always written; absent values re-parse as the default
    row.confidence = Some(format_number(f64::from(node.confidence)));
    row.updated = opt(&node.updated);
    row.pole_ac = node.adapting.to_combined();
    row.pole_ce = node.celebrating.to_combined();
    row.pole_cx = node.connecting.to_combined();
    row.today_state = opt(&node.today_state);
    row.details = opt(&node.details);
    row.priority_user = opt(&node.priority_human);
    row.priority_ai = opt(&node.priority_ai);
}

fn node_row(label: impl Into<String>, node: &BeliefNode) -> RawRecord {
    let mut row = RawRecord::with_label(label);
    node_fields(node, &mut row);
    row
}

fn push_insight(
    rows: &mut Vec<RawRecord>,
    label: String,
    tree: &BeliefTree,
    pillar: Option<u8>,
    kind: InsightKind,
) {
    if let Some(slot) = tree.insights.slot(pillar) {
        let text = slot.get(kind);
        if !text.is_empty() {
            rows.push(scalar_row(label, text));
        }
    }
}

fn lens_row(lens: &LensEntry) -> RawRecord {
    let mut row = RawRecord::with_label(format!("lens:{}", lens.lens_index));
    node_fields(&lens.node, &mut row);
    let pillars = lens
        .pillars
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(";");
    row.pillars = opt(&pillars);
    row
}

fn project_row(project: &Project) -> RawRecord {
    let mut row = RawRecord::with_label("project");
    row.title = opt(&project.name);
    row.project_action = opt(&project.action);
    row.project_measure = opt(&project.measure);
    row.project_start = project.start.map(format_number);
    row.project_target = project.target.map(format_number);
    row.project_days_per_week = project.days.map(|d| d.to_string());
    row.project_benefit = opt(&project.benefit);
    row.project_outcome = opt(&project.outcome);
    row.project_acceptance = opt(&project.acceptance);
    row.project_reference = opt(&project.reference);
    row.project_rationale = opt(&project.rationale);
    row.today_state = opt(&project.today_state);
    row.details = opt(&project.details);
    row.priority_user = opt(&project.priority_user);
    row.priority_ai = opt(&project.priority_ai.to_string());
    row.pillar = project.pillar.map(|p| p.to_string());
    row.project_type = project.kind.map(|k| k.as_str().to_string());
    row.duration = opt(&project.duration);
    row
}

// =============================================================================
// TESTS
// =============================================================================

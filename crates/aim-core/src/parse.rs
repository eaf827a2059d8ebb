//! Row-sequence parser.
//!
//! Total over its input: malformed fields fall back to their defaults, rows
//! with unrecognized labels are dropped, and the fixed tree shape guarantees
//! every node exists whether or not a row mentioned it. The parser never
//! fails.

use tracing::debug;

use crate::label::RowKind;
use crate::model::{
    BeliefNode, BeliefTree, LensEntry, MapMode, NodePath, PoleAttribute, PriorityValue, Project,
    ProjectKind, DEFAULT_CONFIDENCE, PILLAR_COUNT,
};
use crate::record::RawRecord;

// =============================================================================
// PARSE REPORT
// =============================================================================

/// Counters describing what a parse consumed and what it dropped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub rows: usize,
    pub nodes_populated: usize,
    pub projects: usize,
    pub lenses: usize,
    pub skipped_blank_label: usize,
    pub skipped_unknown_label: usize,
}

/// Parse result plus its statistics
#[derive(Debug, Clone, PartialEq)]
pub struct ParseReport {
    pub tree: BeliefTree,
    pub stats: ParseStats,
}

/// Build a belief tree from an ordered row sequence
pub fn parse(rows: &[RawRecord]) -> BeliefTree {
    parse_report(rows).tree
}

/// Like [`parse`], also reporting row-level statistics
pub fn parse_report(rows: &[RawRecord]) -> ParseReport {
    let mut tree = BeliefTree::new();
    let mut stats = ParseStats {
        rows: rows.len(),
        ..Default::default()
    };

    for row in rows {
        let Some(raw_label) = row.label.as_deref().map(str::trim).filter(|s| !s.is_empty())
        else {
            stats.skipped_blank_label += 1;
            continue;
        };

        let fields = RowFields::extract(row);
        let signals = fields.project_signals();

        match RowKind::classify(raw_label) {
            RowKind::Title => tree.title = fields.belief.clone(),
            RowKind::Mode => {
                tree.mode = if fields.belief.eq_ignore_ascii_case("personal") {
                    MapMode::Personal
                } else {
                    MapMode::Business
                };
            }
            RowKind::Insight { pillar, kind } => {
                if let Some(slot) = tree.insights.slot_mut(pillar) {
                    slot.set(kind, fields.belief.clone());
                }
            }
            RowKind::PillarName(i) => {
                tree.pillar_names[i as usize - 1] = fields.belief.clone();
            }
            RowKind::Core => {
                populate_node(&mut tree, NodePath::Core, &fields, &mut stats);
                if signals.any() {
                    push_project(&mut tree, &fields, &signals, None, &mut stats);
                }
            }
            RowKind::Pillar(p) => {
                populate_node(&mut tree, NodePath::Pillar(p), &fields, &mut stats);
                if signals.any() {
                    push_project(&mut tree, &fields, &signals, Some(p), &mut stats);
                }
            }
            RowKind::Sub(p, s) => {
                populate_node(&mut tree, NodePath::Sub(p, s), &fields, &mut stats);
                if signals.any() {
                    push_project(&mut tree, &fields, &signals, Some(p), &mut stats);
                }
            }
            RowKind::Micro(p, s, m) => {
                populate_node(&mut tree, NodePath::Micro(p, s, m), &fields, &mut stats);
                if signals.any() {
                    push_project(&mut tree, &fields, &signals, Some(p), &mut stats);
                }
            }
            RowKind::Project => {
                // Standalone rows also count when they only carry type or
                // duration; the pillar tag comes from the explicit column.
                if signals.any() || !fields.project_type.is_empty() || !fields.duration.is_empty()
                {
                    let pillar = text(&row.pillar)
                        .parse::<u8>()
                        .ok()
                        .filter(|p| (1..=PILLAR_COUNT as u8).contains(p));
                    push_project(&mut tree, &fields, &signals, pillar, &mut stats);
                }
            }
            RowKind::Lens => {
                if !fields.belief.is_empty() {
                    let mut node = BeliefNode::default();
                    fields.apply_to(&mut node);
                    tree.lenses.push(LensEntry {
                        node,
                        pillars: parse_pillar_list(&row.pillars),
                        lens_index: tree.lenses.len(),
                    });
                    stats.lenses += 1;
                }
            }
            RowKind::Unknown => {
                stats.skipped_unknown_label += 1;
                debug!(label = raw_label, "skipping row with unrecognized label");
            }
        }
    }

    // Structural defaults: nodes always exist; blank pillar names take the
    // mode-appropriate fallback.
    let defaults = tree.mode.default_pillar_names();
    for (name, fallback) in tree.pillar_names.iter_mut().zip(defaults) {
        if name.is_empty() {
            *name = fallback.to_string();
        }
    }

    ParseReport { tree, stats }
}

fn populate_node(tree: &mut BeliefTree, path: NodePath, fields: &RowFields, stats: &mut ParseStats) {
    if let Some(node) = tree.node_mut(path) {
        fields.apply_to(node);
        stats.nodes_populated += 1;
    }
}

fn push_project(
    tree: &mut BeliefTree,
    fields: &RowFields,
    signals: &ProjectSignals,
    pillar: Option<u8>,
    stats: &mut ParseStats,
) {
    tree.projects.push(fields.build_project(signals, pillar));
    stats.projects += 1;
}

// =============================================================================
// FIELD EXTRACTION
// =============================================================================

/// Trimmed field content; absent columns read as empty
fn text(field: &Option<String>) -> String {
    field.as_deref().map(str::trim).unwrap_or("").to_string()
}

/// Leading decimal number of a string, lenient about trailing junk
/// ("85%" parses as 85). None when the string does not start with one.
fn leading_f64(s: &str) -> Option<f64> {
    let s = s.trim();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let mut seen_digit = false;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if !seen_digit {
        return None;
    }
    s[..end].parse().ok()
}

/// Leading integer of a string ("3 days" parses as 3)
fn leading_i64(s: &str) -> Option<i64> {
    let s = s.trim();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    s[..end].parse().ok()
}

fn parse_confidence(field: &Option<String>) -> f32 {
    let raw = text(field);
    if raw.is_empty() {
        return DEFAULT_CONFIDENCE;
    }
    match leading_f64(&raw) {
        Some(v) => (v as f32).clamp(0.0, 100.0),
        None => DEFAULT_CONFIDENCE,
    }
}

/// Combined pole format: leading signed integer plus trailing letter
/// ("2G", "-1F"; either part may stand alone)
fn parse_pole_combined(field: &Option<String>) -> PoleAttribute {
    let raw = text(field);
    if raw.is_empty() {
        return PoleAttribute::default();
    }
    let value = leading_i64(&raw).map(|v| v as i32);
    let letter = raw
        .chars()
        .last()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase());
    PoleAttribute {
        value,
        letter,
        label: String::new(),
    }
}

/// Split score/label columns; the label only counts when it is exactly one
/// character after trimming
fn parse_pole_split(score: &Option<String>, label: &Option<String>) -> (Option<i32>, Option<char>) {
    let value = {
        let raw = text(score);
        if raw.is_empty() {
            None
        } else {
            leading_i64(&raw).map(|v| v as i32)
        }
    };
    let letter = {
        let raw = text(label);
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c.to_ascii_uppercase()),
            _ => None,
        }
    };
    (value, letter)
}

/// Merge the combined reading with the split columns; set split parts win
fn extract_pole(
    combined: &Option<String>,
    score: &Option<String>,
    label: &Option<String>,
    raw_label: &Option<String>,
) -> PoleAttribute {
    let mut pole = parse_pole_combined(combined);
    let (split_value, split_letter) = parse_pole_split(score, label);
    if split_value.is_some() {
        pole.value = split_value;
    }
    if split_letter.is_some() {
        pole.letter = split_letter;
    }
    pole.label = text(raw_label);
    pole
}

/// `;`/`,` separated pillar indices, restricted to 1..=3
fn parse_pillar_list(field: &Option<String>) -> Vec<u8> {
    text(field)
        .split([';', ','])
        .filter_map(|part| part.trim().parse::<u8>().ok())
        .filter(|p| (1..=PILLAR_COUNT as u8).contains(p))
        .collect()
}

/// Everything a row can say, extracted once and shared by the node,
/// project, and lens population rules
#[derive(Debug, Clone, Default)]
struct RowFields {
    title: String,
    belief: String,
    confidence: f32,
    updated: String,
    adapting: PoleAttribute,
    celebrating: PoleAttribute,
    connecting: PoleAttribute,
    today_state: String,
    details: String,
    priority_user: String,
    priority_ai: String,
    project_type: String,
    duration: String,
    project_action: String,
    project_measure: String,
    project_start: Option<f64>,
    project_target: Option<f64>,
    project_days: Option<i32>,
    project_benefit: String,
    project_outcome: String,
    project_acceptance: String,
    project_reference: String,
    project_rationale: String,
}

/// Which families of project columns a row carries
#[derive(Debug, Clone, Copy, Default)]
struct ProjectSignals {
    legacy: bool,
    new: bool,
}

impl ProjectSignals {
    fn any(&self) -> bool {
        self.legacy || self.new
    }
}

impl RowFields {
    fn extract(row: &RawRecord) -> Self {
        let opt_number = |field: &Option<String>| {
            let raw = text(field);
            if raw.is_empty() {
                None
            } else {
                leading_f64(&raw)
            }
        };

        Self {
            title: text(&row.title),
            belief: text(&row.belief),
            confidence: parse_confidence(&row.confidence),
            updated: text(&row.updated),
            adapting: extract_pole(&row.pole_ac, &row.ac_score, &row.ac_label, &row.ac_label),
            celebrating: extract_pole(&row.pole_ce, &row.cp_score, &row.cp_label, &row.cp_label),
            connecting: extract_pole(&row.pole_cx, &row.ce_score, &row.ce_label, &row.ce_label),
            today_state: text(&row.today_state),
            details: text(&row.details),
            priority_user: {
                let primary = text(&row.priority_user);
                if primary.is_empty() {
                    text(&row.priority_human)
                } else {
                    primary
                }
            },
            priority_ai: text(&row.priority_ai),
            project_type: text(&row.project_type).to_lowercase(),
            duration: text(&row.duration),
            project_action: text(&row.project_action),
            project_measure: text(&row.project_measure),
            project_start: opt_number(&row.project_start),
            project_target: opt_number(&row.project_target),
            project_days: {
                let raw = text(&row.project_days_per_week);
                if raw.is_empty() {
                    None
                } else {
                    leading_i64(&raw).map(|v| v as i32)
                }
            },
            project_benefit: text(&row.project_benefit),
            project_outcome: text(&row.project_outcome),
            project_acceptance: text(&row.project_acceptance),
            project_reference: text(&row.project_reference),
            project_rationale: text(&row.project_rationale),
        }
    }

    fn project_signals(&self) -> ProjectSignals {
        ProjectSignals {
            legacy: !self.project_action.is_empty()
                || !self.project_measure.is_empty()
                || self.project_start.is_some()
                || self.project_target.is_some()
                || self.project_days.is_some()
                || !self.project_benefit.is_empty(),
            new: !self.project_outcome.is_empty()
                || !self.project_acceptance.is_empty()
                || !self.project_reference.is_empty(),
        }
    }

    /// Write the node-facing fields onto a tree node. Every field is
    /// replaced, so a later row for the same label wins wholesale.
    fn apply_to(&self, node: &mut BeliefNode) {
        node.title = self.title.clone();
        node.belief = self.belief.clone();
        node.confidence = self.confidence;
        node.updated = self.updated.clone();
        node.adapting = self.adapting.clone();
        node.celebrating = self.celebrating.clone();
        node.connecting = self.connecting.clone();
        node.today_state = self.today_state.clone();
        node.details = self.details.clone();
        node.priority_human = self.priority_user.clone();
        node.priority_ai = self.priority_ai.clone();
    }

    fn build_project(&self, signals: &ProjectSignals, pillar: Option<u8>) -> Project {
        let first_non_empty = |candidates: [&str; 3]| {
            candidates
                .iter()
                .find(|s| !s.is_empty())
                .map(|s| s.to_string())
                .unwrap_or_default()
        };

        let kind = match self.project_type.as_str() {
            "practice" => Some(ProjectKind::Practice),
            "sprint" => Some(ProjectKind::Sprint),
            _ if signals.legacy => Some(ProjectKind::Practice),
            _ => None,
        };

        let priority_ai = if self.priority_ai.is_empty() {
            PriorityValue::default()
        } else {
            match leading_i64(&self.priority_ai) {
                Some(n) => PriorityValue::Number(n),
                None => PriorityValue::Text(self.priority_ai.clone()),
            }
        };

        Project {
            name: first_non_empty([&self.title, &self.project_action, &self.belief]),
            action: first_non_empty([&self.project_action, &self.title, &self.belief]),
            measure: self.project_measure.clone(),
            start: self.project_start,
            target: self.project_target,
            days: self.project_days,
            benefit: self.project_benefit.clone(),
            priority_user: self.priority_user.clone(),
            priority_ai,
            outcome: self.project_outcome.clone(),
            acceptance: self.project_acceptance.clone(),
            reference: self.project_reference.clone(),
            rationale: self.project_rationale.clone(),
            today_state: self.today_state.clone(),
            details: self.details.clone(),
            pillar,
            kind,
            duration: self.duration.clone(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

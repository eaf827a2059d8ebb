//! Hover content assembly.
//!
//! Pure data building; the widget decides how to draw it. A tooltip shows
//! the node's own belief, its parent's belief for orientation, the
//! alignment bucket, readable pole phrases, and the update date.

use aim_core::model::{BeliefTree, NodePath, PoleAxis};
use chrono::NaiveDate;

use crate::config::{alignment_category, pole_axis_config, POLE_MAGNITUDE_LABELS};

/// Alignment bucket label for a confidence value
pub fn alignment_label(value: f32) -> &'static str {
    alignment_category(value).label
}

/// Human phrase for one pole reading, e.g. "mostly Guided". The letter
/// picks the pole name; when it matches neither configured letter the sign
/// decides. None when the value is absent or nothing is expressible.
pub fn pole_phrase(value: Option<i32>, letter: Option<char>, axis: PoleAxis) -> Option<String> {
    let value = value?;
    let cfg = pole_axis_config(axis);

    if value == 0 {
        return Some(POLE_MAGNITUDE_LABELS[0].to_string());
    }

    let magnitude = value.unsigned_abs() as usize;
    let magnitude_label = POLE_MAGNITUDE_LABELS.get(magnitude).copied().unwrap_or("");

    let mut pole_name = match letter {
        Some(l) if l == cfg.left_letter => cfg.left_name,
        Some(l) if l == cfg.right_letter => cfg.right_name,
        _ => "",
    };
    if pole_name.is_empty() {
        pole_name = if value < 0 { cfg.left_name } else { cfg.right_name };
    }

    let phrase = match (magnitude_label.is_empty(), pole_name.is_empty()) {
        (false, false) => format!("{magnitude_label} {pole_name}"),
        (true, false) => pole_name.to_string(),
        (false, true) => magnitude_label.to_string(),
        (true, true) => return None,
    };
    Some(phrase)
}

/// Date display for tooltips; unparseable values pass through verbatim
pub fn format_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let parsed = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y/%m/%d"))
        .or_else(|_| {
            chrono::DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive())
        });
    match parsed {
        Ok(date) => date.format("%b %-d, %Y").to_string(),
        Err(_) => trimmed.to_string(),
    }
}

/// Assembled hover content for one node
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    /// "Core" | "Pillar" | "Sub" | "Micro"
    pub level_name: &'static str,
    pub belief: String,
    pub parent_level: Option<&'static str>,
    pub parent_belief: Option<String>,
    pub alignment_label: &'static str,
    pub confidence: f32,
    /// Set pole phrases, keyed by the axis' short display name
    pub pole_phrases: Vec<(&'static str, String)>,
    pub updated: Option<String>,
}

/// Tooltip content for a node path; None when the tree has no such node
pub fn tooltip_for_path(tree: &BeliefTree, path: NodePath) -> Option<TooltipContent> {
    let node = tree.node(path)?;

    let parent_path = path.parent();
    let parent_belief = parent_path
        .and_then(|p| tree.node(p))
        .map(|n| n.belief.clone())
        .filter(|belief| !belief.is_empty());

    let pole_phrases = PoleAxis::ALL
        .iter()
        .filter_map(|&axis| {
            let pole = node.pole(axis);
            pole_phrase(pole.value, pole.letter, axis)
                .map(|phrase| (pole_axis_config(axis).short_name, phrase))
        })
        .collect();

    Some(TooltipContent {
        level_name: path.level_name(),
        belief: node.belief.clone(),
        parent_level: parent_belief
            .as_ref()
            .and_then(|_| parent_path.map(|p| p.level_name())),
        parent_belief,
        alignment_label: alignment_label(node.confidence),
        confidence: node.confidence,
        pole_phrases,
        updated: {
            let formatted = format_date(&node.updated);
            (!formatted.is_empty()).then_some(formatted)
        },
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use aim_core::parse::parse;
    use aim_core::record::RawRecord;

    #[test]
    fn alignment_labels_at_the_bucket_edges() {
        assert_eq!(alignment_label(79.0), "Good");
        assert_eq!(alignment_label(80.0), "Strong");
        assert_eq!(alignment_label(19.0), "Very Low");
        assert_eq!(alignment_label(20.0), "Low");
    }

    #[test]
    fn pole_phrase_uses_letter_then_sign() {
        assert_eq!(
            pole_phrase(Some(2), Some('G'), PoleAxis::Adapting).as_deref(),
            Some("mostly Guided")
        );
        assert_eq!(
            pole_phrase(Some(-1), Some('F'), PoleAxis::Adapting).as_deref(),
            Some("leans Fixed")
        );
        // Letter matches neither side, sign decides
        assert_eq!(
            pole_phrase(Some(3), Some('Z'), PoleAxis::Connecting).as_deref(),
            Some("clearly Synchronized")
        );
        assert_eq!(
            pole_phrase(Some(-2), None, PoleAxis::Celebrating).as_deref(),
            Some("mostly Results")
        );
    }

    #[test]
    fn pole_phrase_zero_and_absent() {
        assert_eq!(
            pole_phrase(Some(0), Some('G'), PoleAxis::Adapting).as_deref(),
            Some("balanced")
        );
        assert_eq!(pole_phrase(None, Some('G'), PoleAxis::Adapting), None);
    }

    #[test]
    fn out_of_range_magnitude_still_names_the_pole() {
        // |5| has no magnitude word; the pole name stands alone
        assert_eq!(
            pole_phrase(Some(5), Some('G'), PoleAxis::Adapting).as_deref(),
            Some("Guided")
        );
    }

    #[test]
    fn date_formatting() {
        assert_eq!(format_date("2026-03-01"), "Mar 1, 2026");
        assert_eq!(format_date("not a date"), "not a date");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn tooltip_includes_parent_belief() {
        let rows = [
            RawRecord {
                belief: Some("Everything compounds".into()),
                ..RawRecord::with_label("core")
            },
            RawRecord {
                belief: Some("I value feedback".into()),
                confidence: Some("85".into()),
                pole_ac: Some("2G".into()),
                updated: Some("2026-01-15".into()),
                ..RawRecord::with_label("pillar:2")
            },
        ];
        let tree = parse(&rows);
        let tip = tooltip_for_path(&tree, NodePath::Pillar(2)).unwrap();

        assert_eq!(tip.level_name, "Pillar");
        assert_eq!(tip.belief, "I value feedback");
        assert_eq!(tip.parent_level, Some("Core"));
        assert_eq!(tip.parent_belief.as_deref(), Some("Everything compounds"));
        assert_eq!(tip.alignment_label, "Strong");
        assert_eq!(tip.confidence, 85.0);
        assert_eq!(tip.pole_phrases, vec![("Adaptive", "mostly Guided".into())]);
        assert_eq!(tip.updated.as_deref(), Some("Jan 15, 2026"));
    }

    #[test]
    fn core_has_no_parent_row() {
        let tree = parse(&[RawRecord {
            belief: Some("x".into()),
            ..RawRecord::with_label("core")
        }]);
        let tip = tooltip_for_path(&tree, NodePath::Core).unwrap();
        assert_eq!(tip.parent_level, None);
        assert_eq!(tip.parent_belief, None);
    }

    #[test]
    fn empty_parent_belief_is_suppressed() {
        let tree = parse(&[RawRecord {
            belief: Some("leaf".into()),
            ..RawRecord::with_label("micro:1:1:1")
        }]);
        let tip = tooltip_for_path(&tree, NodePath::Micro(1, 1, 1)).unwrap();
        // The parent sub exists but has no belief text
        assert_eq!(tip.parent_belief, None);
        assert_eq!(tip.parent_level, None);
    }
}

//! Flat row record matching the tabular input schema.
//!
//! Every column is optional; the parser owns all defaulting rules. The
//! record derives serde traits so a CSV reader (or any other tokenizer)
//! can produce and consume it directly at the application boundary; the
//! core itself never touches raw CSV text.

use serde::{Deserialize, Serialize};

/// One labeled input row. Field names are the wire column names; `ref`
/// clashes with the keyword and is renamed on the Rust side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub label: Option<String>,
    pub title: Option<String>,
    pub belief: Option<String>,
    pub confidence: Option<String>,
    pub updated: Option<String>,

    // Poles, combined format ("2G", "-1F")
    pub pole_ac: Option<String>,
    pub pole_ce: Option<String>,
    pub pole_cx: Option<String>,

    // Poles, split score/label columns. The cp_*/ce_* naming is a fixed
    // external contract: cp_* feeds the celebrating axis, ce_* feeds the
    // connecting axis.
    pub ac_score: Option<String>,
    pub ac_label: Option<String>,
    pub cp_score: Option<String>,
    pub cp_label: Option<String>,
    pub ce_score: Option<String>,
    pub ce_label: Option<String>,

    pub today_state: Option<String>,
    pub details: Option<String>,
    pub priority_user: Option<String>,
    pub priority_human: Option<String>,
    pub priority_ai: Option<String>,

    /// Pillar association for standalone project rows
    pub pillar: Option<String>,
    /// Pillar set for lens rows (";"/"," separated)
    pub pillars: Option<String>,

    pub project_type: Option<String>,
    pub duration: Option<String>,
    pub project_action: Option<String>,
    pub project_measure: Option<String>,
    pub project_start: Option<String>,
    pub project_target: Option<String>,
    pub project_days_per_week: Option<String>,
    pub project_benefit: Option<String>,
    pub project_outcome: Option<String>,
    pub project_acceptance: Option<String>,
    #[serde(rename = "project_ref")]
    pub project_reference: Option<String>,
    pub project_rationale: Option<String>,
}

impl RawRecord {
    /// Fresh record carrying only a label, the starting point for export
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_is_all_absent() {
        let record = RawRecord::default();
        assert!(record.label.is_none());
        assert!(record.belief.is_none());
        assert!(record.project_reference.is_none());
    }

    #[test]
    fn with_label_sets_only_the_label() {
        let record = RawRecord::with_label("pillar:2");
        assert_eq!(record.label.as_deref(), Some("pillar:2"));
        assert_eq!(
            RawRecord {
                label: None,
                ..record
            },
            RawRecord::default()
        );
    }
}

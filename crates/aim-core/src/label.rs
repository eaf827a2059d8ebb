//! Row label classification.
//!
//! Every row is classified into a [`RowKind`] before any field extraction,
//! keeping the dispatch exhaustive and testable in isolation. The grammar is
//! case-insensitive and colon-delimited:
//!
//! ```text
//! title | mode | insight_(overview|observations|projects)
//!       | insight_pillar_<1-3>_(overview|observations|projects)
//!       | pillar_name:<1-3> | core | pillar:<1-3> | sub:<1-3>:<1-3>
//!       | micro:<1-3>:<1-3>:<1-3> | project | lens*
//! ```

use crate::model::InsightKind;

/// Classified row label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Title,
    Mode,
    Insight {
        /// None for the global slots
        pillar: Option<u8>,
        kind: InsightKind,
    },
    PillarName(u8),
    Core,
    Pillar(u8),
    Sub(u8, u8),
    Micro(u8, u8, u8),
    Project,
    Lens,
    /// Anything else; the parser drops these rows
    Unknown,
}

/// Parse a 1..=3 index segment
fn idx3(segment: &str) -> Option<u8> {
    segment
        .parse::<u8>()
        .ok()
        .filter(|i| (1..=3).contains(i))
}

fn insight_kind(key: &str) -> Option<InsightKind> {
    match key {
        "overview" => Some(InsightKind::Overview),
        "observations" => Some(InsightKind::Observations),
        "projects" => Some(InsightKind::Projects),
        _ => None,
    }
}

/// `insight_` suffix: either a bare kind or `pillar_<i>_<kind>`
fn classify_insight(rest: &str) -> RowKind {
    if let Some(kind) = insight_kind(rest) {
        return RowKind::Insight { pillar: None, kind };
    }
    if let Some(per_pillar) = rest.strip_prefix("pillar_") {
        if let Some((idx, key)) = per_pillar.split_once('_') {
            if let (Some(pillar), Some(kind)) = (idx3(idx), insight_kind(key)) {
                return RowKind::Insight {
                    pillar: Some(pillar),
                    kind,
                };
            }
        }
    }
    RowKind::Unknown
}

impl RowKind {
    /// Classify a raw label. Leading/trailing whitespace and case are
    /// ignored; malformed or out-of-range labels come back as `Unknown`.
    pub fn classify(raw: &str) -> RowKind {
        let label = raw.trim().to_lowercase();

        match label.as_str() {
            "title" => return RowKind::Title,
            "mode" => return RowKind::Mode,
            "core" => return RowKind::Core,
            "project" => return RowKind::Project,
            _ => {}
        }

        if let Some(rest) = label.strip_prefix("insight_") {
            return classify_insight(rest);
        }
        if let Some(rest) = label.strip_prefix("pillar_name:") {
            return match idx3(rest) {
                Some(i) => RowKind::PillarName(i),
                None => RowKind::Unknown,
            };
        }
        if let Some(rest) = label.strip_prefix("pillar:") {
            return match idx3(rest) {
                Some(p) => RowKind::Pillar(p),
                None => RowKind::Unknown,
            };
        }
        if let Some(rest) = label.strip_prefix("sub:") {
            let mut parts = rest.splitn(2, ':');
            if let (Some(p), Some(s)) = (
                parts.next().and_then(idx3),
                parts.next().and_then(idx3),
            ) {
                return RowKind::Sub(p, s);
            }
            return RowKind::Unknown;
        }
        if let Some(rest) = label.strip_prefix("micro:") {
            let mut parts = rest.splitn(3, ':');
            if let (Some(p), Some(s), Some(m)) = (
                parts.next().and_then(idx3),
                parts.next().and_then(idx3),
                parts.next().and_then(idx3),
            ) {
                return RowKind::Micro(p, s, m);
            }
            return RowKind::Unknown;
        }
        if label.starts_with("lens") {
            return RowKind::Lens;
        }

        RowKind::Unknown
    }
}

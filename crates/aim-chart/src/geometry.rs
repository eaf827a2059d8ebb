//! Radial geometry: ring radii, arc descriptors, separators, and center
//! text layout.
//!
//! Angles are radians with 0 at 12 o'clock increasing clockwise, the arc
//! convention of the charts this widget renders. Everything here is pure;
//! the widget feeds the outputs to a painter.

use std::f32::consts::{FRAC_PI_2, TAU};

use aim_core::model::{BeliefTree, NodePath, PoleAttribute};
use aim_core::text::{truncate, wrap_lines};
use serde::Serialize;

use crate::config::{
    ARC_LABEL_MAX_FONT, CENTER_BELIEF_MAX_CHARS, CENTER_LINE_GAP, CENTER_MAX_FONT, CHART_MARGIN,
    FULL_RING_RATIOS, MAX_CHARS_BY_DEPTH, PILLAR_RING_RATIOS, RING_GAP, SUB_RING_RATIOS,
};
use crate::nav::{NavSnapshot, ZoomLevel};

// =============================================================================
// RADII
// =============================================================================

/// Ring boundaries in the full view
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FullViewRadii {
    pub core_end: f32,
    pub pillar_start: f32,
    pub pillar_end: f32,
    pub sub_start: f32,
    pub sub_end: f32,
    pub micro_start: f32,
    pub micro_end: f32,
}

/// Ring boundaries in pillar focus
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PillarViewRadii {
    pub center: f32,
    pub sub_start: f32,
    pub sub_end: f32,
    pub micro_start: f32,
    pub micro_end: f32,
}

/// Ring boundaries in sub focus
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubViewRadii {
    pub center: f32,
    pub micro_start: f32,
    pub micro_end: f32,
}

/// Radii for every zoom state at once
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RingRadii {
    pub full: FullViewRadii,
    pub pillar: PillarViewRadii,
    pub sub: SubViewRadii,
}

impl RingRadii {
    /// Radius of the open center disc for a zoom level
    pub fn center_radius(&self, level: ZoomLevel) -> f32 {
        match level {
            ZoomLevel::Full => self.full.core_end,
            ZoomLevel::PillarFocus => self.pillar.center,
            ZoomLevel::SubFocus => self.sub.center,
        }
    }
}

/// Ring radii for a square drawing area of `size` px
pub fn compute_radii(size: f32) -> RingRadii {
    let radius = (size / 2.0 - CHART_MARGIN).max(0.0);
    let gap = RING_GAP;

    let r1 = radius * FULL_RING_RATIOS[0];
    let r2 = r1 + radius * FULL_RING_RATIOS[1];
    let r3 = r2 + radius * FULL_RING_RATIOS[2];
    let full = FullViewRadii {
        core_end: r1 - gap,
        pillar_start: r1,
        pillar_end: r2 - gap,
        sub_start: r2,
        sub_end: r3 - gap,
        micro_start: r3,
        micro_end: radius,
    };

    let b1 = radius * PILLAR_RING_RATIOS[0];
    let b2 = b1 + radius * PILLAR_RING_RATIOS[1];
    let pillar = PillarViewRadii {
        center: b1 - gap,
        sub_start: b1,
        sub_end: b2 - gap,
        micro_start: b2,
        micro_end: radius,
    };

    let c1 = radius * SUB_RING_RATIOS[0];
    let sub = SubViewRadii {
        center: c1 - gap,
        micro_start: c1,
        micro_end: radius,
    };

    RingRadii { full, pillar, sub }
}

// =============================================================================
// ARC DESCRIPTORS
// =============================================================================

/// Ring depth of a wedge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RingDepth {
    Pillar,
    Sub,
    Micro,
}

impl RingDepth {
    /// Numeric depth: pillar 1, sub 2, micro 3
    pub fn level(&self) -> u8 {
        match self {
            RingDepth::Pillar => 1,
            RingDepth::Sub => 2,
            RingDepth::Micro => 3,
        }
    }

    fn index(&self) -> usize {
        self.level() as usize - 1
    }

    /// Label character budget at this depth
    pub fn char_budget(&self) -> usize {
        MAX_CHARS_BY_DEPTH[self.index()]
    }
}

/// Everything the painter and the interaction layer need to know about
/// one wedge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArcDescriptor {
    pub depth: RingDepth,
    pub pillar: u8,
    pub sub: Option<u8>,
    pub micro: Option<u8>,
    pub start_angle: f32,
    pub end_angle: f32,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub belief: String,
    /// Pre-truncated display text
    pub label: String,
    pub confidence: f32,
    pub show_label: bool,
    /// True when the node's belief is blank: fainter fill, click diverted
    pub incomplete: bool,
    pub adapting: PoleAttribute,
    pub celebrating: PoleAttribute,
    pub connecting: PoleAttribute,
}

impl ArcDescriptor {
    /// Tree address of the node behind this wedge
    pub fn path(&self) -> NodePath {
        match (self.depth, self.sub, self.micro) {
            (RingDepth::Micro, Some(s), Some(m)) => NodePath::Micro(self.pillar, s, m),
            (RingDepth::Sub, Some(s), _) => NodePath::Sub(self.pillar, s),
            _ => NodePath::Pillar(self.pillar),
        }
    }

    pub fn angle_span(&self) -> f32 {
        self.end_angle - self.start_angle
    }

    pub fn thickness(&self) -> f32 {
        self.outer_radius - self.inner_radius
    }

    /// Arc length along the wedge midline
    pub fn mid_arc_length(&self) -> f32 {
        self.angle_span() * (self.inner_radius + self.outer_radius) / 2.0
    }
}

fn descriptor(
    tree: &BeliefTree,
    path: NodePath,
    angles: (f32, f32),
    radii: (f32, f32),
    label: String,
    show_label: bool,
) -> Option<ArcDescriptor> {
    let node = tree.node(path)?;
    let (depth, sub, micro) = match path {
        NodePath::Pillar(_) => (RingDepth::Pillar, None, None),
        NodePath::Sub(_, s) => (RingDepth::Sub, Some(s), None),
        NodePath::Micro(_, s, m) => (RingDepth::Micro, Some(s), Some(m)),
        NodePath::Core => return None,
    };
    Some(ArcDescriptor {
        depth,
        pillar: path.pillar()?,
        sub,
        micro,
        start_angle: angles.0,
        end_angle: angles.1,
        inner_radius: radii.0,
        outer_radius: radii.1,
        belief: node.belief.clone(),
        label,
        confidence: node.confidence,
        show_label,
        incomplete: !node.is_complete(),
        adapting: node.adapting.clone(),
        celebrating: node.celebrating.clone(),
        connecting: node.connecting.clone(),
    })
}

/// Title shown for a node: its title, else its belief
fn node_display_text(tree: &BeliefTree, path: NodePath) -> String {
    tree.node(path)
        .map(|n| {
            if n.title.is_empty() {
                n.belief.clone()
            } else {
                n.title.clone()
            }
        })
        .unwrap_or_default()
}

/// Wedges for the current zoom state. Full view yields 3+9+27 wedges,
/// pillar focus 3+9, sub focus 3. An unloaded selection yields nothing.
pub fn compute_arcs(tree: &BeliefTree, nav: NavSnapshot, radii: &RingRadii) -> Vec<ArcDescriptor> {
    let mut arcs = Vec::new();

    match nav.level {
        ZoomLevel::Full => {
            let pillar_step = TAU / 3.0;
            let sub_step = pillar_step / 3.0;
            let micro_step = sub_step / 3.0;

            for p in 1..=3u8 {
                let start = (p - 1) as f32 * pillar_step;
                let path = NodePath::Pillar(p);
                let incomplete = !tree.node(path).map(|n| n.is_complete()).unwrap_or(false);
                // Incomplete pillars show the pillar name, complete ones the
                // belief title
                let pillar_name = tree.pillar_display_name(p);
                let display = if incomplete {
                    pillar_name.clone()
                } else {
                    let text = node_display_text(tree, path);
                    if text.is_empty() {
                        pillar_name.clone()
                    } else {
                        text
                    }
                };
                arcs.extend(descriptor(
                    tree,
                    path,
                    (start, start + pillar_step),
                    (radii.full.pillar_start, radii.full.pillar_end),
                    truncate(&display, RingDepth::Pillar.char_budget()),
                    true,
                ));

                for s in 1..=3u8 {
                    let s_start = start + (s - 1) as f32 * sub_step;
                    let sub_path = NodePath::Sub(p, s);
                    arcs.extend(descriptor(
                        tree,
                        sub_path,
                        (s_start, s_start + sub_step),
                        (radii.full.sub_start, radii.full.sub_end),
                        truncate(&node_display_text(tree, sub_path), RingDepth::Sub.char_budget()),
                        false,
                    ));

                    for m in 1..=3u8 {
                        let m_start = s_start + (m - 1) as f32 * micro_step;
                        let micro_path = NodePath::Micro(p, s, m);
                        arcs.extend(descriptor(
                            tree,
                            micro_path,
                            (m_start, m_start + micro_step),
                            (radii.full.micro_start, radii.full.micro_end),
                            truncate(
                                &node_display_text(tree, micro_path),
                                RingDepth::Micro.char_budget(),
                            ),
                            false,
                        ));
                    }
                }
            }
        }
        ZoomLevel::PillarFocus => {
            let Some(p) = nav.selected_pillar else {
                return arcs;
            };
            let sub_step = TAU / 3.0;
            let micro_step = TAU / 9.0;

            for s in 1..=3u8 {
                let s_start = (s - 1) as f32 * sub_step;
                let sub_path = NodePath::Sub(p, s);
                let sub_complete = tree.node(sub_path).map(|n| n.is_complete()).unwrap_or(false);
                arcs.extend(descriptor(
                    tree,
                    sub_path,
                    (s_start, s_start + sub_step),
                    (radii.pillar.sub_start, radii.pillar.sub_end),
                    truncate(&node_display_text(tree, sub_path), RingDepth::Sub.char_budget()),
                    // Incomplete subs stay unlabeled in this view
                    sub_complete,
                ));

                for m in 1..=3u8 {
                    let micro_index = (s - 1) * 3 + (m - 1);
                    let m_start = micro_index as f32 * micro_step;
                    let micro_path = NodePath::Micro(p, s, m);
                    arcs.extend(descriptor(
                        tree,
                        micro_path,
                        (m_start, m_start + micro_step),
                        (radii.pillar.micro_start, radii.pillar.micro_end),
                        truncate(
                            &node_display_text(tree, micro_path),
                            RingDepth::Micro.char_budget(),
                        ),
                        false,
                    ));
                }
            }
        }
        ZoomLevel::SubFocus => {
            let (Some(p), Some(s)) = (nav.selected_pillar, nav.selected_sub) else {
                return arcs;
            };
            let micro_step = TAU / 3.0;
            for m in 1..=3u8 {
                let m_start = (m - 1) as f32 * micro_step;
                let micro_path = NodePath::Micro(p, s, m);
                arcs.extend(descriptor(
                    tree,
                    micro_path,
                    (m_start, m_start + micro_step),
                    (radii.sub.micro_start, radii.sub.micro_end),
                    truncate(
                        &node_display_text(tree, micro_path),
                        RingDepth::Micro.char_budget(),
                    ),
                    true,
                ));
            }
        }
    }

    arcs
}

// =============================================================================
// SEPARATORS
// =============================================================================

/// Stroke class of a separator line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SeparatorWeight {
    Major,
    Minor,
    Hairline,
}

impl SeparatorWeight {
    pub fn stroke_width(&self) -> f32 {
        match self {
            SeparatorWeight::Major => 1.6,
            SeparatorWeight::Minor => 1.2,
            SeparatorWeight::Hairline => 1.0,
        }
    }

    /// Black alpha of the stroke
    pub fn alpha(&self) -> f32 {
        match self {
            SeparatorWeight::Major => 0.30,
            SeparatorWeight::Minor => 0.22,
            SeparatorWeight::Hairline => 0.18,
        }
    }
}

/// Radial separator between wedges
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeparatorLine {
    pub angle: f32,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub weight: SeparatorWeight,
}

/// Separator lines for a zoom state
pub fn compute_separators(level: ZoomLevel, radii: &RingRadii) -> Vec<SeparatorLine> {
    let mut lines = Vec::new();
    match level {
        ZoomLevel::Full => {
            for i in 0..3 {
                lines.push(SeparatorLine {
                    angle: i as f32 * TAU / 3.0,
                    inner_radius: radii.full.pillar_start,
                    outer_radius: radii.full.micro_end,
                    weight: SeparatorWeight::Major,
                });
            }
            for i in 0..9 {
                if i % 3 == 0 {
                    continue; // already covered by a pillar separator
                }
                lines.push(SeparatorLine {
                    angle: i as f32 * TAU / 9.0,
                    inner_radius: radii.full.sub_start,
                    outer_radius: radii.full.micro_end,
                    weight: SeparatorWeight::Minor,
                });
            }
            for i in 0..27 {
                if i % 3 == 0 {
                    continue;
                }
                lines.push(SeparatorLine {
                    angle: i as f32 * TAU / 27.0,
                    inner_radius: radii.full.micro_start,
                    outer_radius: radii.full.micro_end,
                    weight: SeparatorWeight::Hairline,
                });
            }
        }
        ZoomLevel::PillarFocus => {
            for i in 0..3 {
                lines.push(SeparatorLine {
                    angle: i as f32 * TAU / 3.0,
                    inner_radius: radii.pillar.sub_start,
                    outer_radius: radii.pillar.micro_end,
                    weight: SeparatorWeight::Minor,
                });
            }
            for i in 0..9 {
                lines.push(SeparatorLine {
                    angle: i as f32 * TAU / 9.0,
                    inner_radius: radii.pillar.micro_start,
                    outer_radius: radii.pillar.micro_end,
                    weight: SeparatorWeight::Hairline,
                });
            }
        }
        ZoomLevel::SubFocus => {
            for i in 0..3 {
                lines.push(SeparatorLine {
                    angle: i as f32 * TAU / 3.0,
                    inner_radius: radii.sub.micro_start,
                    outer_radius: radii.sub.micro_end,
                    weight: SeparatorWeight::Hairline,
                });
            }
        }
    }
    lines
}

// =============================================================================
// CENTER TEXT
// =============================================================================

/// Laid-out text for the open center disc
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CenterText {
    /// Bold first line ("Core", the pillar name, or the sub title)
    pub heading: Option<String>,
    pub body_lines: Vec<String>,
    pub font_size: f32,
    pub line_gap: f32,
}

impl CenterText {
    pub fn line_count(&self) -> usize {
        self.heading.iter().count() + self.body_lines.len()
    }
}

/// Center text for the current state; None when there is nothing to show
pub fn compute_center_text(
    tree: &BeliefTree,
    nav: NavSnapshot,
    radii: &RingRadii,
) -> Option<CenterText> {
    let (radius, heading, belief) = match nav.level {
        ZoomLevel::Full => (
            radii.full.core_end,
            Some("Core".to_string()),
            tree.core.belief.clone(),
        ),
        ZoomLevel::PillarFocus => {
            let p = nav.selected_pillar?;
            (
                radii.pillar.center,
                Some(tree.pillar_display_name(p)),
                tree.pillar(p)?.belief.clone(),
            )
        }
        ZoomLevel::SubFocus => {
            let (p, s) = (nav.selected_pillar?, nav.selected_sub?);
            let node = tree.sub(p, s)?;
            let heading = (!node.title.is_empty()).then(|| node.title.clone());
            (radii.sub.center, heading, node.belief.clone())
        }
    };

    let wrap_len = ((radius / 8.0).floor() as usize).max(8);
    let body_lines = wrap_lines(&truncate(&belief, CENTER_BELIEF_MAX_CHARS), wrap_len);

    let line_count = heading.iter().count() + body_lines.len();
    if line_count == 0 {
        return None;
    }

    Some(CenterText {
        heading,
        body_lines,
        font_size: (radius / (line_count as f32 + 1.0)).min(CENTER_MAX_FONT),
        line_gap: CENTER_LINE_GAP,
    })
}

// =============================================================================
// WEDGE LABELS
// =============================================================================

/// Laid-out in-wedge label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArcLabelLayout {
    pub lines: Vec<String>,
    pub font_size: f32,
    pub line_height: f32,
    /// Centroid offset from the chart center
    pub position: (f32, f32),
}

/// Layout for a wedge's label, None when the wedge shows none
pub fn compute_arc_label(arc: &ArcDescriptor) -> Option<ArcLabelLayout> {
    if !arc.show_label {
        return None;
    }
    let base = if arc.label.trim().is_empty() {
        arc.belief.as_str()
    } else {
        arc.label.as_str()
    };
    let char_limit = ((arc.mid_arc_length() / 8.0).floor() as usize).clamp(8, 16);
    let lines = wrap_lines(base, char_limit);
    if lines.is_empty() {
        return None;
    }
    let font_size = (arc.thickness() / 3.0).min(ARC_LABEL_MAX_FONT);
    Some(ArcLabelLayout {
        lines,
        line_height: font_size + 2.0,
        font_size,
        position: arc_centroid(arc),
    })
}

// =============================================================================
// POLAR HELPERS
// =============================================================================

/// Polar to cartesian offset from the chart center
pub fn polar_offset(angle: f32, radius: f32) -> (f32, f32) {
    ((angle - FRAC_PI_2).cos() * radius, (angle - FRAC_PI_2).sin() * radius)
}

/// Midpoint of a wedge, as an offset from the chart center
pub fn arc_centroid(arc: &ArcDescriptor) -> (f32, f32) {
    polar_offset(
        (arc.start_angle + arc.end_angle) / 2.0,
        (arc.inner_radius + arc.outer_radius) / 2.0,
    )
}

/// The wedge containing an offset-from-center point, if any
pub fn hit_test<'a>(arcs: &'a [ArcDescriptor], offset: (f32, f32)) -> Option<&'a ArcDescriptor> {
    let (x, y) = offset;
    let radius = (x * x + y * y).sqrt();
    let angle = (y.atan2(x) + FRAC_PI_2).rem_euclid(TAU);
    arcs.iter().find(|arc| {
        radius >= arc.inner_radius
            && radius <= arc.outer_radius
            && angle >= arc.start_angle
            && angle < arc.end_angle
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::HeatmapMode;
    use aim_core::parse::parse;
    use aim_core::record::RawRecord;

    fn nav(level: ZoomLevel, pillar: Option<u8>, sub: Option<u8>) -> NavSnapshot {
        NavSnapshot {
            level,
            selected_pillar: pillar,
            selected_sub: sub,
            preselected_sub: None,
            heatmap: HeatmapMode::Off,
        }
    }

    fn sample_tree() -> BeliefTree {
        let rows = [
            RawRecord {
                belief: Some("Everything compounds".into()),
                ..RawRecord::with_label("core")
            },
            RawRecord {
                belief: Some("I value honest feedback".into()),
                title: Some("Feedback".into()),
                confidence: Some("85".into()),
                ..RawRecord::with_label("pillar:2")
            },
            RawRecord {
                belief: Some("Ship weekly".into()),
                title: Some("Cadence".into()),
                ..RawRecord::with_label("sub:2:1")
            },
        ];
        parse(&rows)
    }

    #[test]
    fn radii_partition_with_gaps() {
        let radii = compute_radii(800.0);
        let radius = 800.0 / 2.0 - CHART_MARGIN;

        let close = |a: f32, b: f32| (a - b).abs() < 1e-3;

        assert_eq!(radii.full.pillar_start, radius * 0.50);
        assert_eq!(radii.full.core_end, radius * 0.50 - RING_GAP);
        assert!(close(radii.full.pillar_end, radius * 0.85 - RING_GAP));
        assert_eq!(radii.full.micro_end, radius);

        assert!(close(radii.pillar.center, radius * 0.55 - RING_GAP));
        assert!(close(radii.pillar.micro_start, radius * 0.90));
        assert_eq!(radii.sub.micro_start, radius * 0.60);
    }

    #[test]
    fn full_view_yields_39_wedges() {
        let tree = sample_tree();
        let radii = compute_radii(800.0);
        let arcs = compute_arcs(&tree, nav(ZoomLevel::Full, None, None), &radii);
        assert_eq!(arcs.len(), 39);
        assert_eq!(arcs.iter().filter(|a| a.depth == RingDepth::Pillar).count(), 3);
        assert_eq!(arcs.iter().filter(|a| a.depth == RingDepth::Sub).count(), 9);
        assert_eq!(arcs.iter().filter(|a| a.depth == RingDepth::Micro).count(), 27);
    }

    #[test]
    fn focused_views_yield_their_ring_counts() {
        let tree = sample_tree();
        let radii = compute_radii(600.0);
        assert_eq!(
            compute_arcs(&tree, nav(ZoomLevel::PillarFocus, Some(2), None), &radii).len(),
            12
        );
        assert_eq!(
            compute_arcs(&tree, nav(ZoomLevel::SubFocus, Some(2), Some(1)), &radii).len(),
            3
        );
        // Selections missing in a focused state: nothing to draw
        assert!(compute_arcs(&tree, nav(ZoomLevel::PillarFocus, None, None), &radii).is_empty());
    }

    #[test]
    fn full_view_angles_are_equal_partitions() {
        let tree = sample_tree();
        let radii = compute_radii(800.0);
        let arcs = compute_arcs(&tree, nav(ZoomLevel::Full, None, None), &radii);

        let micro_span = TAU / 27.0;
        for arc in arcs.iter().filter(|a| a.depth == RingDepth::Micro) {
            assert!((arc.angle_span() - micro_span).abs() < 1e-5);
        }
        let total: f32 = arcs
            .iter()
            .filter(|a| a.depth == RingDepth::Pillar)
            .map(|a| a.angle_span())
            .sum();
        assert!((total - TAU).abs() < 1e-4);
    }

    #[test]
    fn incomplete_flag_follows_the_belief() {
        let tree = sample_tree();
        let radii = compute_radii(800.0);
        let arcs = compute_arcs(&tree, nav(ZoomLevel::Full, None, None), &radii);

        let pillar2 = arcs
            .iter()
            .find(|a| a.depth == RingDepth::Pillar && a.pillar == 2)
            .unwrap();
        assert!(!pillar2.incomplete);
        assert_eq!(pillar2.label, "Feedback");

        let pillar1 = arcs
            .iter()
            .find(|a| a.depth == RingDepth::Pillar && a.pillar == 1)
            .unwrap();
        assert!(pillar1.incomplete);
        // Unfilled pillars fall back to the pillar name
        assert_eq!(pillar1.label, "Team");
    }

    #[test]
    fn sub_labels_only_when_complete_in_pillar_focus() {
        let tree = sample_tree();
        let radii = compute_radii(800.0);
        let arcs = compute_arcs(&tree, nav(ZoomLevel::PillarFocus, Some(2), None), &radii);

        let filled = arcs
            .iter()
            .find(|a| a.depth == RingDepth::Sub && a.sub == Some(1))
            .unwrap();
        assert!(filled.show_label);

        let empty = arcs
            .iter()
            .find(|a| a.depth == RingDepth::Sub && a.sub == Some(2))
            .unwrap();
        assert!(!empty.show_label);
        assert!(empty.incomplete);
    }

    #[test]
    fn label_budgets_truncate() {
        let long = "x".repeat(100);
        let rows = [RawRecord {
            belief: Some(long),
            ..RawRecord::with_label("pillar:1")
        }];
        let tree = parse(&rows);
        let radii = compute_radii(800.0);
        let arcs = compute_arcs(&tree, nav(ZoomLevel::Full, None, None), &radii);
        let pillar1 = arcs
            .iter()
            .find(|a| a.depth == RingDepth::Pillar && a.pillar == 1)
            .unwrap();
        assert_eq!(pillar1.label.chars().count(), 45);
        assert!(pillar1.label.ends_with('…'));
    }

    #[test]
    fn separator_counts_per_state() {
        let radii = compute_radii(800.0);
        assert_eq!(compute_separators(ZoomLevel::Full, &radii).len(), 3 + 6 + 18);
        assert_eq!(compute_separators(ZoomLevel::PillarFocus, &radii).len(), 3 + 9);
        assert_eq!(compute_separators(ZoomLevel::SubFocus, &radii).len(), 3);
    }

    #[test]
    fn hit_test_finds_the_wedge_under_a_point() {
        let tree = sample_tree();
        let radii = compute_radii(800.0);
        let arcs = compute_arcs(&tree, nav(ZoomLevel::Full, None, None), &radii);

        // Straight up, in the pillar ring: first pillar's wedge
        let r = (radii.full.pillar_start + radii.full.pillar_end) / 2.0;
        let hit = hit_test(&arcs, (1.0, -r)).unwrap();
        assert_eq!(hit.depth, RingDepth::Pillar);
        assert_eq!(hit.pillar, 1);

        // Just right of up is still pillar 1; just left wraps to pillar 3
        let hit = hit_test(&arcs, (-1.0, -r)).unwrap();
        assert_eq!(hit.pillar, 3);

        // Inside the core disc nothing matches
        assert!(hit_test(&arcs, (0.0, 0.0)).is_none());
    }

    #[test]
    fn hit_test_respects_ring_bounds() {
        let tree = sample_tree();
        let radii = compute_radii(800.0);
        let arcs = compute_arcs(&tree, nav(ZoomLevel::SubFocus, Some(2), Some(1)), &radii);

        let inside = (radii.sub.micro_start + radii.sub.micro_end) / 2.0;
        assert!(hit_test(&arcs, (0.0, -inside)).is_some());
        let outside = radii.sub.micro_end + 5.0;
        assert!(hit_test(&arcs, (0.0, -outside)).is_none());
    }

    #[test]
    fn center_text_wraps_and_sizes() {
        let tree = sample_tree();
        let radii = compute_radii(800.0);
        let text =
            compute_center_text(&tree, nav(ZoomLevel::Full, None, None), &radii).unwrap();
        assert_eq!(text.heading.as_deref(), Some("Core"));
        assert!(!text.body_lines.is_empty());
        assert!(text.font_size <= CENTER_MAX_FONT);

        let text =
            compute_center_text(&tree, nav(ZoomLevel::PillarFocus, Some(2), None), &radii)
                .unwrap();
        assert_eq!(text.heading.as_deref(), Some("Finance")); // pillar 2 keeps default name
    }

    #[test]
    fn center_text_empty_sub_is_none() {
        let tree = BeliefTree::new();
        let radii = compute_radii(800.0);
        assert!(
            compute_center_text(&tree, nav(ZoomLevel::SubFocus, Some(1), Some(1)), &radii)
                .is_none()
        );
    }

    #[test]
    fn arc_labels_only_for_marked_wedges() {
        let tree = sample_tree();
        let radii = compute_radii(800.0);
        let arcs = compute_arcs(&tree, nav(ZoomLevel::Full, None, None), &radii);
        let labeled = arcs
            .iter()
            .filter_map(compute_arc_label)
            .count();
        // Only the three pillar wedges carry labels in the full view
        assert_eq!(labeled, 3);
    }
}

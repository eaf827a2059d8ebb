//! Sunburst chart widget.
//!
//! Immediate-mode: wedges are recomputed from the navigation snapshot
//! every frame (no diffing), painted as triangulated ring sectors, and
//! hit-tested in polar coordinates for hover and click routing.

use aim_core::model::{BeliefTree, NodePath};
use egui::{Align2, Color32, FontId, Pos2, Sense, Stroke, Vec2};

use crate::colors::fill_color;
use crate::geometry::{
    compute_arc_label, compute_arcs, compute_center_text, compute_radii, compute_separators,
    hit_test, polar_offset, ArcDescriptor, RingDepth, RingRadii,
};
use crate::nav::{NavSnapshot, NavigationController, ZoomLevel};
use crate::tooltip::{tooltip_for_path, TooltipContent};

/// Angular resolution of a painted arc (radians per segment)
const ARC_SEGMENT_STEP: f32 = 0.05;

/// Payload handed to the incomplete-wedge callback
#[derive(Debug, Clone, PartialEq)]
pub struct IncompleteClick {
    pub pillar: u8,
    pub pillar_name: String,
    pub sub: Option<u8>,
    pub micro: Option<u8>,
    pub depth: u8,
}

type IncompleteHandler = Box<dyn FnMut(IncompleteClick)>;

/// The sunburst widget. Owns no map state; it reads and drives the
/// [`NavigationController`] passed to [`Self::ui`].
#[derive(Default)]
pub struct SunburstWidget {
    on_incomplete_click: Option<IncompleteHandler>,
}

impl SunburstWidget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Divert clicks on incomplete wedges to this handler instead of
    /// navigating, so the host can show a call to action. Without a handler
    /// incomplete wedges navigate like any other.
    pub fn set_incomplete_handler(&mut self, handler: impl FnMut(IncompleteClick) + 'static) {
        self.on_incomplete_click = Some(Box::new(handler));
    }

    /// Draw the chart and route interactions
    pub fn ui(&mut self, ui: &mut egui::Ui, nav: &mut NavigationController) {
        let Some(tree) = nav.tree().cloned() else {
            self.render_empty_state(ui);
            return;
        };
        let snapshot = nav.snapshot();

        let available = ui.available_size();
        let size = available.x.min(available.y).max(64.0);
        let (response, painter) = ui.allocate_painter(Vec2::splat(size), Sense::click());
        let center = response.rect.center();

        let radii = compute_radii(size);
        let arcs = compute_arcs(&tree, snapshot, &radii);

        for arc in &arcs {
            paint_ring_sector(&painter, center, arc, fill_color(arc, snapshot.heatmap));
        }
        self.paint_preselection(&painter, center, &arcs, snapshot);
        paint_separators(&painter, center, snapshot.level, &radii);
        paint_center_text(&painter, center, &tree, snapshot, &radii);
        for arc in &arcs {
            paint_arc_label(&painter, center, arc);
        }

        // Interaction: hover tooltip and click routing share one hit test
        let pointer = response.hover_pos();
        let hovered = pointer.and_then(|pos| {
            let offset = (pos.x - center.x, pos.y - center.y);
            hit_test(&arcs, offset)
                .map(HoverTarget::Arc)
                .or_else(|| {
                    let radius = (offset.0 * offset.0 + offset.1 * offset.1).sqrt();
                    if radius <= radii.center_radius(snapshot.level) {
                        center_path(snapshot).map(HoverTarget::Center)
                    } else {
                        None
                    }
                })
        });

        if let Some(target) = &hovered {
            if target.is_clickable(snapshot) {
                ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
            }
            let content = match target {
                HoverTarget::Arc(arc) => tooltip_for_path(&tree, arc.path()),
                HoverTarget::Center(path) => tooltip_for_path(&tree, *path),
            };
            if let Some(content) = content {
                let _ = response
                    .clone()
                    .on_hover_ui_at_pointer(|ui| tooltip_ui(ui, &content));
            }
        }

        if response.clicked() {
            if let Some(HoverTarget::Arc(arc)) = hovered {
                let arc = arc.clone();
                self.route_click(nav, &tree, &arc);
            }
        }
    }

    /// Click routing: incomplete wedges divert to the host callback; pillar
    /// and sub wedges drill down; micro wedges and out-of-state clicks are
    /// inert.
    fn route_click(&mut self, nav: &mut NavigationController, tree: &BeliefTree, arc: &ArcDescriptor) {
        if arc.incomplete {
            if let Some(handler) = &mut self.on_incomplete_click {
                handler(IncompleteClick {
                    pillar: arc.pillar,
                    pillar_name: tree.pillar_display_name(arc.pillar),
                    sub: arc.sub,
                    micro: arc.micro,
                    depth: arc.depth.level(),
                });
                return;
            }
        }

        match nav.level() {
            ZoomLevel::Full => match arc.depth {
                RingDepth::Pillar => nav.navigate_to_pillar(arc.pillar),
                RingDepth::Sub => {
                    nav.navigate_to_pillar(arc.pillar);
                    nav.set_preselected_sub(arc.sub);
                }
                RingDepth::Micro => {}
            },
            ZoomLevel::PillarFocus => {
                if arc.depth == RingDepth::Sub && Some(arc.pillar) == nav.selected_pillar() {
                    if let Some(sub) = arc.sub {
                        nav.navigate_to_sub(arc.pillar, sub);
                    }
                }
            }
            ZoomLevel::SubFocus => {}
        }
    }

    fn paint_preselection(
        &self,
        painter: &egui::Painter,
        center: Pos2,
        arcs: &[ArcDescriptor],
        snapshot: NavSnapshot,
    ) {
        let Some(pre) = snapshot.preselected_sub else {
            return;
        };
        if snapshot.level != ZoomLevel::PillarFocus {
            return;
        }
        if let Some(arc) = arcs
            .iter()
            .find(|a| a.depth == RingDepth::Sub && a.sub == Some(pre))
        {
            paint_sector_outline(
                painter,
                center,
                arc,
                Stroke::new(2.0, Color32::from_black_alpha(110)),
            );
        }
    }

    fn render_empty_state(&self, ui: &mut egui::Ui) {
        ui.centered_and_justified(|ui| {
            ui.label("No belief map loaded");
        });
    }
}

// =============================================================================
// HOVER TARGET
// =============================================================================

enum HoverTarget<'a> {
    Arc(&'a ArcDescriptor),
    Center(NodePath),
}

impl HoverTarget<'_> {
    fn is_clickable(&self, snapshot: NavSnapshot) -> bool {
        match self {
            HoverTarget::Center(_) => false,
            HoverTarget::Arc(arc) => match snapshot.level {
                ZoomLevel::Full => matches!(arc.depth, RingDepth::Pillar | RingDepth::Sub),
                ZoomLevel::PillarFocus => {
                    arc.depth == RingDepth::Sub && Some(arc.pillar) == snapshot.selected_pillar
                }
                ZoomLevel::SubFocus => false,
            },
        }
    }
}

/// Node shown in the open center disc for a zoom state
fn center_path(snapshot: NavSnapshot) -> Option<NodePath> {
    match snapshot.level {
        ZoomLevel::Full => Some(NodePath::Core),
        ZoomLevel::PillarFocus => snapshot.selected_pillar.map(NodePath::Pillar),
        ZoomLevel::SubFocus => snapshot
            .selected_pillar
            .zip(snapshot.selected_sub)
            .map(|(p, s)| NodePath::Sub(p, s)),
    }
}

// =============================================================================
// PAINTING
// =============================================================================

fn sector_point(center: Pos2, angle: f32, radius: f32) -> Pos2 {
    let (dx, dy) = polar_offset(angle, radius);
    Pos2::new(center.x + dx, center.y + dy)
}

fn sector_segments(arc: &ArcDescriptor) -> usize {
    ((arc.angle_span() / ARC_SEGMENT_STEP).ceil() as usize).max(2)
}

/// Ring sectors are concave, so they are filled as explicit triangle
/// strips rather than polygons.
fn paint_ring_sector(painter: &egui::Painter, center: Pos2, arc: &ArcDescriptor, fill: Color32) {
    let segments = sector_segments(arc);
    let mut mesh = egui::Mesh::default();

    for i in 0..=segments {
        let t = i as f32 / segments as f32;
        let angle = arc.start_angle + arc.angle_span() * t;
        mesh.colored_vertex(sector_point(center, angle, arc.inner_radius), fill);
        mesh.colored_vertex(sector_point(center, angle, arc.outer_radius), fill);
    }
    for i in 0..segments as u32 {
        let base = i * 2;
        mesh.add_triangle(base, base + 1, base + 2);
        mesh.add_triangle(base + 1, base + 3, base + 2);
    }

    painter.add(egui::Shape::mesh(mesh));
}

/// Outline of a ring sector (preselection highlight)
fn paint_sector_outline(painter: &egui::Painter, center: Pos2, arc: &ArcDescriptor, stroke: Stroke) {
    let segments = sector_segments(arc);
    let mut points = Vec::with_capacity(2 * segments + 2);
    for i in 0..=segments {
        let t = i as f32 / segments as f32;
        let angle = arc.start_angle + arc.angle_span() * t;
        points.push(sector_point(center, angle, arc.outer_radius));
    }
    for i in (0..=segments).rev() {
        let t = i as f32 / segments as f32;
        let angle = arc.start_angle + arc.angle_span() * t;
        points.push(sector_point(center, angle, arc.inner_radius));
    }
    painter.add(egui::Shape::closed_line(points, stroke));
}

fn paint_separators(
    painter: &egui::Painter,
    center: Pos2,
    level: ZoomLevel,
    radii: &RingRadii,
) {
    for line in compute_separators(level, radii) {
        let stroke = Stroke::new(
            line.weight.stroke_width(),
            Color32::from_black_alpha((line.weight.alpha() * 255.0).round() as u8),
        );
        painter.line_segment(
            [
                sector_point(center, line.angle, line.inner_radius),
                sector_point(center, line.angle, line.outer_radius),
            ],
            stroke,
        );
    }
}

const TEXT_COLOR: Color32 = Color32::from_rgb(0x11, 0x11, 0x11);

fn paint_center_text(
    painter: &egui::Painter,
    center: Pos2,
    tree: &BeliefTree,
    snapshot: NavSnapshot,
    radii: &RingRadii,
) {
    let Some(text) = compute_center_text(tree, snapshot, radii) else {
        return;
    };
    let line_height = text.font_size + text.line_gap;
    let count = text.line_count();
    let heading_count = text.heading.iter().count();

    for (i, line) in text
        .heading
        .iter()
        .chain(text.body_lines.iter())
        .enumerate()
    {
        let y = center.y + (i as f32 - (count as f32 - 1.0) / 2.0) * line_height;
        let color = if i < heading_count {
            Color32::BLACK
        } else {
            TEXT_COLOR
        };
        painter.text(
            Pos2::new(center.x, y),
            Align2::CENTER_CENTER,
            line,
            FontId::proportional(text.font_size),
            color,
        );
    }
}

fn paint_arc_label(painter: &egui::Painter, center: Pos2, arc: &ArcDescriptor) {
    let Some(layout) = compute_arc_label(arc) else {
        return;
    };
    let (dx, dy) = layout.position;
    let count = layout.lines.len();
    for (i, line) in layout.lines.iter().enumerate() {
        let y = center.y + dy + (i as f32 - (count as f32 - 1.0) / 2.0) * layout.line_height;
        painter.text(
            Pos2::new(center.x + dx, y),
            Align2::CENTER_CENTER,
            line,
            FontId::proportional(layout.font_size),
            TEXT_COLOR,
        );
    }
}

// =============================================================================
// TOOLTIP UI
// =============================================================================

fn tooltip_ui(ui: &mut egui::Ui, content: &TooltipContent) {
    ui.set_max_width(320.0);
    ui.label(
        egui::RichText::new(format!("{}: {}", content.level_name, content.belief))
            .strong()
            .size(15.0),
    );
    if let (Some(level), Some(belief)) = (&content.parent_level, &content.parent_belief) {
        ui.label(
            egui::RichText::new(format!("\u{21b3} {level}: {belief}"))
                .size(12.0)
                .weak(),
        );
    }
    ui.separator();
    egui::Grid::new("belief_tooltip_rows")
        .num_columns(2)
        .spacing([16.0, 2.0])
        .show(ui, |ui| {
            ui.label(egui::RichText::new("Alignment").weak().small());
            ui.label(
                egui::RichText::new(format!(
                    "{} ({}%)",
                    content.alignment_label,
                    content.confidence.round() as i64
                ))
                .small(),
            );
            ui.end_row();

            for (axis_name, phrase) in &content.pole_phrases {
                ui.label(egui::RichText::new(*axis_name).weak().small());
                ui.label(egui::RichText::new(phrase).small());
                ui.end_row();
            }

            if let Some(updated) = &content.updated {
                ui.label(egui::RichText::new("Updated").weak().small());
                ui.label(egui::RichText::new(updated).small());
                ui.end_row();
            }
        });
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
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    fn loaded_nav() -> NavigationController {
        let rows = [
            RawRecord {
                belief: Some("core belief".into()),
                ..RawRecord::with_label("core")
            },
            RawRecord {
                belief: Some("pillar one".into()),
                ..RawRecord::with_label("pillar:1")
            },
            RawRecord {
                belief: Some("sub one one".into()),
                ..RawRecord::with_label("sub:1:1")
            },
        ];
        let mut nav = NavigationController::new();
        nav.set_tree(Arc::new(parse(&rows)));
        nav
    }

    fn arc_at(nav: &NavigationController, depth: RingDepth, pillar: u8, sub: Option<u8>) -> ArcDescriptor {
        let radii = compute_radii(800.0);
        compute_arcs(nav.tree().unwrap(), nav.snapshot(), &radii)
            .into_iter()
            .find(|a| a.depth == depth && a.pillar == pillar && a.sub == sub)
            .unwrap()
    }

    #[test]
    fn complete_pillar_click_navigates() {
        let mut nav = loaded_nav();
        let mut widget = SunburstWidget::new();
        let arc = arc_at(&nav, RingDepth::Pillar, 1, None);
        let tree = nav.tree().unwrap().clone();

        widget.route_click(&mut nav, &tree, &arc);
        assert_eq!(nav.level(), ZoomLevel::PillarFocus);
        assert_eq!(nav.selected_pillar(), Some(1));
    }

    #[test]
    fn sub_click_in_full_view_preselects() {
        let mut nav = loaded_nav();
        let mut widget = SunburstWidget::new();
        let arc = arc_at(&nav, RingDepth::Sub, 1, Some(1));
        let tree = nav.tree().unwrap().clone();

        widget.route_click(&mut nav, &tree, &arc);
        assert_eq!(nav.level(), ZoomLevel::PillarFocus);
        assert_eq!(nav.preselected_sub(), Some(1));
    }

    #[test]
    fn incomplete_click_diverts_to_the_handler() {
        let mut nav = loaded_nav();
        let seen: Rc<RefCell<Option<IncompleteClick>>> = Rc::new(RefCell::new(None));
        let mut widget = SunburstWidget::new();
        let sink = Rc::clone(&seen);
        widget.set_incomplete_handler(move |info| *sink.borrow_mut() = Some(info));

        // Pillar 2 has no belief in the fixture
        let arc = arc_at(&nav, RingDepth::Pillar, 2, None);
        assert!(arc.incomplete);
        let tree = nav.tree().unwrap().clone();
        widget.route_click(&mut nav, &tree, &arc);

        // Navigation did not happen; the callback fired with the node address
        assert_eq!(nav.level(), ZoomLevel::Full);
        let info = seen.borrow().clone().unwrap();
        assert_eq!(info.pillar, 2);
        assert_eq!(info.depth, 1);
        assert_eq!(info.pillar_name, "Finance");
    }

    #[test]
    fn incomplete_click_without_handler_navigates() {
        let mut nav = loaded_nav();
        let mut widget = SunburstWidget::new();
        let arc = arc_at(&nav, RingDepth::Pillar, 2, None);
        let tree = nav.tree().unwrap().clone();

        widget.route_click(&mut nav, &tree, &arc);
        assert_eq!(nav.level(), ZoomLevel::PillarFocus);
        assert_eq!(nav.selected_pillar(), Some(2));
    }

    #[test]
    fn micro_clicks_are_inert() {
        let mut nav = loaded_nav();
        nav.navigate_to_sub(1, 1);
        let mut widget = SunburstWidget::new();
        let radii = compute_radii(800.0);
        let arcs = compute_arcs(nav.tree().unwrap(), nav.snapshot(), &radii);
        let arc = arcs[0].clone();
        let tree = nav.tree().unwrap().clone();

        widget.route_click(&mut nav, &tree, &arc);
        assert_eq!(nav.level(), ZoomLevel::SubFocus);
    }

    #[test]
    fn sub_click_in_pillar_focus_drills_down() {
        let mut nav = loaded_nav();
        nav.navigate_to_pillar(1);
        let mut widget = SunburstWidget::new();
        let arc = arc_at(&nav, RingDepth::Sub, 1, Some(1));
        let tree = nav.tree().unwrap().clone();

        widget.route_click(&mut nav, &tree, &arc);
        assert_eq!(nav.level(), ZoomLevel::SubFocus);
        assert_eq!(nav.selected_sub(), Some(1));
    }

    #[test]
    fn center_path_follows_the_level() {
        let snapshot = NavSnapshot {
            level: ZoomLevel::Full,
            ..Default::default()
        };
        assert_eq!(center_path(snapshot), Some(NodePath::Core));

        let snapshot = NavSnapshot {
            level: ZoomLevel::SubFocus,
            selected_pillar: Some(2),
            selected_sub: Some(3),
            preselected_sub: None,
            heatmap: HeatmapMode::Off,
        };
        assert_eq!(center_path(snapshot), Some(NodePath::Sub(2, 3)));
    }
}

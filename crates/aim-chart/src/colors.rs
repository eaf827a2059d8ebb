//! Wedge fill computation: pillar palette, depth alpha, heatmap ramp.

use aim_core::model::PoleAxis;
use egui::Color32;

use crate::config::{
    alignment_category, DEPTH_ALPHA, HEAT_BLEND_RATIO, HEAT_LIGHTNESS, HEAT_SATURATION,
    INCOMPLETE_ALPHA_FACTOR, PILLAR_COLORS,
};
use crate::geometry::ArcDescriptor;
use crate::nav::HeatmapMode;

/// Base color for a pillar (1-based); out-of-range falls back to pillar 1
pub fn pillar_base_color(pillar: u8) -> Color32 {
    let (r, g, b) = PILLAR_COLORS
        .get(pillar.wrapping_sub(1) as usize)
        .copied()
        .unwrap_or(PILLAR_COLORS[0]);
    Color32::from_rgb(r, g, b)
}

/// HSL to RGB; hue in degrees, saturation/lightness in 0..=1
fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> (u8, u8, u8) {
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let h = (hue.rem_euclid(360.0)) / 60.0;
    let x = c * (1.0 - (h.rem_euclid(2.0) - 1.0).abs());
    let (r1, g1, b1) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c / 2.0;
    let to_byte = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (to_byte(r1), to_byte(g1), to_byte(b1))
}

/// Heat ramp color: 0 = red, through amber, 100 = green
pub fn heat_color(value: f32) -> Color32 {
    let ratio = value.clamp(0.0, 100.0) / 100.0;
    let (r, g, b) = hsl_to_rgb(120.0 * ratio, HEAT_SATURATION, HEAT_LIGHTNESS);
    Color32::from_rgb(r, g, b)
}

/// Heat value in 0..=100 driving the ramp for one wedge, None when the
/// heatmap is off. Pole values map -3..=3 onto the ramp; unset poles sit
/// at the midpoint.
pub fn heat_value(arc: &ArcDescriptor, mode: HeatmapMode) -> Option<f32> {
    match mode {
        HeatmapMode::Off => None,
        HeatmapMode::Confidence => Some(arc.confidence),
        _ => {
            let value = match mode.pole_axis()? {
                PoleAxis::Adapting => arc.adapting.value,
                PoleAxis::Celebrating => arc.celebrating.value,
                PoleAxis::Connecting => arc.connecting.value,
            };
            Some(
                value
                    .map(|v| (v as f32 + 3.0) / 6.0 * 100.0)
                    .unwrap_or(50.0),
            )
        }
    }
}

fn lerp_channel(base: u8, heat: u8, ratio: f32) -> u8 {
    (base as f32 * (1.0 - ratio) + heat as f32 * ratio).round() as u8
}

/// Fill color for a wedge under the active heatmap mode. Incomplete wedges
/// keep the pillar hue but drop most of their alpha.
pub fn fill_color(arc: &ArcDescriptor, mode: HeatmapMode) -> Color32 {
    let base = pillar_base_color(arc.pillar);
    let mut alpha = DEPTH_ALPHA[arc.depth.level() as usize - 1];
    if arc.incomplete {
        alpha *= INCOMPLETE_ALPHA_FACTOR;
    }

    let (r, g, b) = match heat_value(arc, mode) {
        None => (base.r(), base.g(), base.b()),
        Some(value) => {
            let heat = heat_color(value);
            (
                lerp_channel(base.r(), heat.r(), HEAT_BLEND_RATIO),
                lerp_channel(base.g(), heat.g(), HEAT_BLEND_RATIO),
                lerp_channel(base.b(), heat.b(), HEAT_BLEND_RATIO),
            )
        }
    };

    Color32::from_rgba_unmultiplied(r, g, b, (alpha * 255.0).round() as u8)
}

/// Swatch color for an alignment bucket (legend chips)
pub fn alignment_color(confidence: f32) -> Color32 {
    let (r, g, b) = alignment_category(confidence).color;
    Color32::from_rgb(r, g, b)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::RingDepth;
    use aim_core::model::PoleAttribute;

    fn arc(depth: RingDepth, pillar: u8, confidence: f32, incomplete: bool) -> ArcDescriptor {
        ArcDescriptor {
            depth,
            pillar,
            sub: None,
            micro: None,
            start_angle: 0.0,
            end_angle: 1.0,
            inner_radius: 10.0,
            outer_radius: 20.0,
            belief: String::new(),
            label: String::new(),
            confidence,
            show_label: false,
            incomplete,
            adapting: PoleAttribute::default(),
            celebrating: PoleAttribute::default(),
            connecting: PoleAttribute::default(),
        }
    }

    #[test]
    fn heat_ramp_endpoints() {
        let red = heat_color(0.0);
        assert!(red.r() > red.g() && red.r() > red.b());
        let green = heat_color(100.0);
        assert!(green.g() > green.r() && green.g() > green.b());
        // Midpoint is amber: red and green channels balanced
        let mid = heat_color(50.0);
        assert_eq!(mid.r(), mid.g());
    }

    #[test]
    fn depth_alpha_applies() {
        let pillar = fill_color(&arc(RingDepth::Pillar, 1, 50.0, false), HeatmapMode::Off);
        assert_eq!(pillar.a(), (0.25f32 * 255.0).round() as u8);
        let micro = fill_color(&arc(RingDepth::Micro, 1, 50.0, false), HeatmapMode::Off);
        assert_eq!(micro.a(), (0.18f32 * 255.0).round() as u8);
    }

    #[test]
    fn incomplete_wedges_fade() {
        let faded = fill_color(&arc(RingDepth::Pillar, 1, 50.0, true), HeatmapMode::Off);
        assert_eq!(faded.a(), (0.25f32 * 0.4 * 255.0).round() as u8);
    }

    #[test]
    fn off_mode_keeps_the_pillar_color() {
        let fill = fill_color(&arc(RingDepth::Pillar, 2, 50.0, false), HeatmapMode::Off);
        let base = pillar_base_color(2);
        assert_eq!((fill.r(), fill.g(), fill.b()), (base.r(), base.g(), base.b()));
    }

    #[test]
    fn confidence_mode_overrides_the_hue() {
        let fill = fill_color(&arc(RingDepth::Pillar, 1, 100.0, false), HeatmapMode::Confidence);
        let heat = heat_color(100.0);
        // Blend ratio 1.0: heat color fully replaces the base
        assert_eq!((fill.r(), fill.g(), fill.b()), (heat.r(), heat.g(), heat.b()));
    }

    #[test]
    fn unset_pole_reads_as_midpoint() {
        let wedge = arc(RingDepth::Sub, 1, 80.0, false);
        assert_eq!(heat_value(&wedge, HeatmapMode::Adapting), Some(50.0));

        let mut wedge = wedge;
        wedge.adapting.value = Some(3);
        assert_eq!(heat_value(&wedge, HeatmapMode::Adapting), Some(100.0));
        wedge.adapting.value = Some(-3);
        assert_eq!(heat_value(&wedge, HeatmapMode::Adapting), Some(0.0));
    }

    #[test]
    fn out_of_range_pillar_falls_back() {
        assert_eq!(pillar_base_color(0), pillar_base_color(1));
        assert_eq!(pillar_base_color(9), pillar_base_color(1));
    }
}

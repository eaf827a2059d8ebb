//! aim-chart: interactive sunburst widget for AIM belief maps.
//!
//! This crate contains ONLY the chart: no file I/O, no app shell. The
//! shell owns loading and layout and drives the widget through the
//! navigation controller.
//!
//! # Architecture
//!
//! ```text
//! BeliefTree (aim-core, immutable snapshot)
//!        │
//!        ▼
//! NavigationController (zoom level, selections, heatmap, subscribers)
//!        │
//!        ▼
//! geometry (radii → arc descriptors → separators/labels/center text)
//!        │
//!        ├──► colors (pillar palette × depth alpha × heatmap blend)
//!        │
//!        └──► SunburstWidget (paints via egui, hit-tests in polar space,
//!                             routes clicks, assembles tooltips)
//! ```

pub mod colors;
pub mod config;
pub mod geometry;
pub mod nav;
pub mod tooltip;
pub mod widget;

pub use colors::{alignment_color, fill_color, heat_color, heat_value, pillar_base_color};
pub use geometry::{
    compute_arc_label, compute_arcs, compute_center_text, compute_radii, compute_separators,
    hit_test, ArcDescriptor, ArcLabelLayout, CenterText, RingDepth, RingRadii, SeparatorLine,
    SeparatorWeight,
};
pub use nav::{
    BreadcrumbEntry, BreadcrumbTarget, HeatmapMode, NavSnapshot, NavigationController,
    StateChange, SubscriptionId, ZoomLevel,
};
pub use tooltip::{alignment_label, format_date, pole_phrase, tooltip_for_path, TooltipContent};
pub use widget::{IncompleteClick, SunburstWidget};

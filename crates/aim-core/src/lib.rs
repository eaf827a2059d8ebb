//! aim-core: data model, parser, and row export for AIM belief maps.
//!
//! This crate contains the pure map logic with NO UI dependencies:
//! - Fixed 3×3×3 belief tree plus projects, lenses, and insight texts
//! - All-optional row record matching the tabular input schema
//! - Label classification into a closed row-kind enum
//! - Total parser over pre-tokenized rows (never fails)
//! - Round-trip row export
//! - Completeness tallies and priority-ranked project selection
//!
//! Rendering and navigation live in `aim-chart`; file/CSV I/O belongs to
//! the application shell.

pub mod export;
pub mod label;
pub mod model;
pub mod parse;
pub mod progress;
pub mod record;
pub mod text;

// Re-export the commonly used types
pub use export::export_rows;
pub use label::RowKind;
pub use model::{
    BeliefNode, BeliefTree, InsightKind, InsightSet, Insights, LensEntry, MapMode, NodePath,
    PoleAttribute, PoleAxis, PriorityValue, Project, ProjectKind, DEFAULT_CONFIDENCE,
};
pub use parse::{parse, parse_report, ParseReport, ParseStats};
pub use progress::{
    is_node_complete, overall_completeness, pillar_completeness, priority_rank,
    projects_for_pillar, top_projects_across_pillars, CompletenessTally, OverallCompleteness,
};
pub use record::RawRecord;

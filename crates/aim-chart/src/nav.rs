//! Navigation state machine.
//!
//! Owns the zoom level, pillar/sub selections, heatmap mode, and the
//! current tree snapshot. Every mutating operation notifies subscribers
//! synchronously before it returns; a subscriber must not mutate the
//! controller during a notification pass (not enforced, by contract).
//!
//! Invalid navigation targets are logged and ignored; no operation here
//! can fail.

use std::str::FromStr;
use std::sync::Arc;

use aim_core::model::{BeliefTree, PoleAxis};
use tracing::warn;

// =============================================================================
// ZOOM LEVEL
// =============================================================================

/// Which ring set is expanded to full-circle detail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomLevel {
    #[default]
    Full,
    PillarFocus,
    SubFocus,
}

impl ZoomLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoomLevel::Full => "full",
            ZoomLevel::PillarFocus => "pillar_focus",
            ZoomLevel::SubFocus => "sub_focus",
        }
    }
}

// =============================================================================
// HEATMAP MODE
// =============================================================================

/// Overlay metric used to color-code wedges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeatmapMode {
    #[default]
    Off,
    Confidence,
    Adapting,
    Celebrating,
    Connecting,
}

impl HeatmapMode {
    pub const ALL: [HeatmapMode; 5] = [
        HeatmapMode::Off,
        HeatmapMode::Confidence,
        HeatmapMode::Adapting,
        HeatmapMode::Celebrating,
        HeatmapMode::Connecting,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HeatmapMode::Off => "off",
            HeatmapMode::Confidence => "confidence",
            HeatmapMode::Adapting => "adapting",
            HeatmapMode::Celebrating => "celebrating",
            HeatmapMode::Connecting => "connecting",
        }
    }

    /// Picker label
    pub fn label(&self) -> &'static str {
        match self {
            HeatmapMode::Off => "Off",
            HeatmapMode::Confidence => "Alignment",
            HeatmapMode::Adapting => "Adaptive Challenge",
            HeatmapMode::Celebrating => "Celebration",
            HeatmapMode::Connecting => "Collective Experience",
        }
    }

    /// One-line legend text
    pub fn description(&self) -> &'static str {
        match self {
            HeatmapMode::Off => "No heatmap overlay",
            HeatmapMode::Confidence => "How well each belief aligns with your actions (0-100)",
            HeatmapMode::Adapting => "Fixed (self-paced) \u{2194} Guided (welcomes direction)",
            HeatmapMode::Celebrating => "Results (finish line) \u{2194} Practice (the journey)",
            HeatmapMode::Connecting => "Autonomous (solo) \u{2194} Synchronized (together)",
        }
    }

    /// The pole axis this mode reads, if any
    pub fn pole_axis(&self) -> Option<PoleAxis> {
        match self {
            HeatmapMode::Off | HeatmapMode::Confidence => None,
            HeatmapMode::Adapting => Some(PoleAxis::Adapting),
            HeatmapMode::Celebrating => Some(PoleAxis::Celebrating),
            HeatmapMode::Connecting => Some(PoleAxis::Connecting),
        }
    }
}

impl FromStr for HeatmapMode {
    type Err = std::convert::Infallible;

    /// Accepts both the long names and the legacy two-letter axis codes;
    /// anything unrecognized reads as Off.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "confidence" | "alignment" => Self::Confidence,
            "adapting" | "ac" => Self::Adapting,
            "celebrating" | "ce" => Self::Celebrating,
            "connecting" | "cx" => Self::Connecting,
            _ => Self::Off,
        })
    }
}

// =============================================================================
// EVENTS
// =============================================================================

/// Payload delivered to subscribers on every state change
#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
    /// The tree snapshot was swapped (load or reload)
    TreeReplaced,
    Navigated {
        level: ZoomLevel,
        pillar: Option<u8>,
        sub: Option<u8>,
    },
    HeatmapChanged(HeatmapMode),
    PreselectedSubChanged(Option<u8>),
    Reset,
}

type Subscriber = Box<dyn FnMut(&StateChange)>;

/// Handle returned by [`NavigationController::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(usize);

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Immutable copy of the selections, as consumed by the geometry engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavSnapshot {
    pub level: ZoomLevel,
    pub selected_pillar: Option<u8>,
    pub selected_sub: Option<u8>,
    pub preselected_sub: Option<u8>,
    pub heatmap: HeatmapMode,
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// Single owner of the mutable navigation state.
///
/// Holds the current [`BeliefTree`] by `Arc`; reloading swaps the whole
/// snapshot, nothing mutates a loaded tree.
#[derive(Default)]
pub struct NavigationController {
    tree: Option<Arc<BeliefTree>>,
    level: ZoomLevel,
    selected_pillar: Option<u8>,
    selected_sub: Option<u8>,
    preselected_sub: Option<u8>,
    heatmap: HeatmapMode,
    subscribers: Vec<(usize, Subscriber)>,
    next_subscriber_id: usize,
}

fn in_range(i: u8) -> bool {
    (1..=3).contains(&i)
}

impl NavigationController {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // GETTERS
    // =========================================================================

    pub fn tree(&self) -> Option<&Arc<BeliefTree>> {
        self.tree.as_ref()
    }

    pub fn level(&self) -> ZoomLevel {
        self.level
    }

    pub fn selected_pillar(&self) -> Option<u8> {
        self.selected_pillar
    }

    pub fn selected_sub(&self) -> Option<u8> {
        self.selected_sub
    }

    pub fn preselected_sub(&self) -> Option<u8> {
        self.preselected_sub
    }

    pub fn heatmap(&self) -> HeatmapMode {
        self.heatmap
    }

    pub fn snapshot(&self) -> NavSnapshot {
        NavSnapshot {
            level: self.level,
            selected_pillar: self.selected_pillar,
            selected_sub: self.selected_sub,
            preselected_sub: self.preselected_sub,
            heatmap: self.heatmap,
        }
    }

    // =========================================================================
    // TREE LIFECYCLE
    // =========================================================================

    /// Swap in a freshly parsed tree
    pub fn set_tree(&mut self, tree: Arc<BeliefTree>) {
        self.tree = Some(tree);
        self.notify(StateChange::TreeReplaced);
    }

    /// Drop everything back to the initial state
    pub fn reset(&mut self) {
        self.tree = None;
        self.level = ZoomLevel::Full;
        self.selected_pillar = None;
        self.selected_sub = None;
        self.preselected_sub = None;
        self.heatmap = HeatmapMode::Off;
        self.notify(StateChange::Reset);
    }

    // =========================================================================
    // NAVIGATION
    // =========================================================================

    /// Unconditional reset to the full view
    pub fn navigate_to_full_view(&mut self) {
        self.level = ZoomLevel::Full;
        self.selected_pillar = None;
        self.selected_sub = None;
        self.preselected_sub = None;
        self.notify_navigated();
    }

    /// Zoom into one pillar; out-of-range indices are ignored
    pub fn navigate_to_pillar(&mut self, pillar: u8) {
        if !in_range(pillar) {
            warn!(pillar, "ignoring navigation to out-of-range pillar");
            return;
        }
        self.level = ZoomLevel::PillarFocus;
        self.selected_pillar = Some(pillar);
        self.selected_sub = None;
        self.preselected_sub = None;
        self.notify_navigated();
    }

    /// Zoom into one sub; out-of-range indices are ignored
    pub fn navigate_to_sub(&mut self, pillar: u8, sub: u8) {
        if !in_range(pillar) || !in_range(sub) {
            warn!(pillar, sub, "ignoring navigation to out-of-range sub");
            return;
        }
        self.level = ZoomLevel::SubFocus;
        self.selected_pillar = Some(pillar);
        self.selected_sub = Some(sub);
        self.preselected_sub = None;
        self.notify_navigated();
    }

    /// One zoom level out; a no-op in the full view
    pub fn navigate_up(&mut self) {
        match self.level {
            ZoomLevel::SubFocus => {
                if let Some(pillar) = self.selected_pillar {
                    self.navigate_to_pillar(pillar);
                }
            }
            ZoomLevel::PillarFocus => self.navigate_to_full_view(),
            ZoomLevel::Full => {}
        }
    }

    pub fn set_heatmap(&mut self, mode: HeatmapMode) {
        self.heatmap = mode;
        self.notify(StateChange::HeatmapChanged(mode));
    }

    /// Hover-only sub highlight; cleared by every navigation
    pub fn set_preselected_sub(&mut self, sub: Option<u8>) {
        self.preselected_sub = sub.filter(|s| in_range(*s));
        self.notify(StateChange::PreselectedSubChanged(self.preselected_sub));
    }

    // =========================================================================
    // SUBSCRIPTIONS
    // =========================================================================

    pub fn subscribe(&mut self, subscriber: impl FnMut(&StateChange) + 'static) -> SubscriptionId {
        let id = self.next_subscriber_id;
        self.next_subscriber_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        SubscriptionId(id)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(sid, _)| *sid != id.0);
    }

    fn notify(&mut self, change: StateChange) {
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&change);
        }
    }

    fn notify_navigated(&mut self) {
        self.notify(StateChange::Navigated {
            level: self.level,
            pillar: self.selected_pillar,
            sub: self.selected_sub,
        });
    }

    // =========================================================================
    // BREADCRUMB
    // =========================================================================

    /// Trail from the map root down to the current level. The last entry is
    /// the current position and carries no target.
    pub fn breadcrumb(&self) -> Vec<BreadcrumbEntry> {
        let mut crumbs = vec![BreadcrumbEntry {
            label: "AIM".to_string(),
            target: Some(BreadcrumbTarget::FullView),
        }];

        let pillar_name = |p: u8| {
            self.tree
                .as_deref()
                .map(|t| t.pillar_display_name(p))
                .unwrap_or_else(|| format!("Pillar {p}"))
        };

        match (self.level, self.selected_pillar, self.selected_sub) {
            (ZoomLevel::PillarFocus, Some(p), _) => {
                crumbs.push(BreadcrumbEntry {
                    label: pillar_name(p),
                    target: None,
                });
            }
            (ZoomLevel::SubFocus, Some(p), Some(s)) => {
                crumbs.push(BreadcrumbEntry {
                    label: pillar_name(p),
                    target: Some(BreadcrumbTarget::Pillar(p)),
                });
                let sub_label = self
                    .tree
                    .as_deref()
                    .and_then(|t| t.sub(p, s))
                    .map(|n| n.title.clone())
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| format!("Sub {s}"));
                crumbs.push(BreadcrumbEntry {
                    label: sub_label,
                    target: None,
                });
            }
            _ => {
                crumbs[0].target = None;
            }
        }
        crumbs
    }
}

/// One entry in the breadcrumb trail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreadcrumbEntry {
    pub label: String,
    /// None marks the current (non-clickable) level
    pub target: Option<BreadcrumbTarget>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreadcrumbTarget {
    FullView,
    Pillar(u8),
}

// =============================================================================
// TESTS
// =============================================================================

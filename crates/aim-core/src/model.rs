//! Belief-map domain model.
//!
//! The tree shape is fixed arity: one core belief, 3 pillars, 3 subs per
//! pillar, and 3 micro-beliefs per sub: 40 nodes total. Nodes live in flat
//! arrays addressed through index helpers, so the structure can never go
//! sparse and every node exists from the moment the tree is constructed.
//!
//! Indices are 1-based (1..=3) throughout, matching the row label grammar
//! (`pillar:2`, `sub:1:3`, `micro:2:1:3`).

use serde::{Deserialize, Serialize};

/// Number of top-level pillars
pub const PILLAR_COUNT: usize = 3;
/// Sub-beliefs per pillar
pub const SUBS_PER_PILLAR: usize = 3;
/// Micro-beliefs per sub
pub const MICROS_PER_SUB: usize = 3;

/// Confidence used when a row omits or mangles the value
pub const DEFAULT_CONFIDENCE: f32 = 50.0;

// =============================================================================
// MODE
// =============================================================================

/// Map mode selects the default pillar names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapMode {
    Personal,
    #[default]
    Business,
}

impl MapMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MapMode::Personal => "personal",
            MapMode::Business => "business",
        }
    }

    /// Pillar names used when the data does not name a pillar
    pub fn default_pillar_names(&self) -> [&'static str; PILLAR_COUNT] {
        match self {
            MapMode::Personal => ["Outer Self", "Inner Self", "Relationships"],
            MapMode::Business => ["Team", "Finance", "Customer"],
        }
    }
}

// =============================================================================
// POLES
// =============================================================================

/// The three bipolar axes tracked per node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoleAxis {
    Adapting,
    Celebrating,
    Connecting,
}

impl PoleAxis {
    pub const ALL: [PoleAxis; 3] = [PoleAxis::Adapting, PoleAxis::Celebrating, PoleAxis::Connecting];

    /// Two-letter code used in the column schema (`pole_ac` etc.)
    pub fn code(&self) -> &'static str {
        match self {
            PoleAxis::Adapting => "ac",
            PoleAxis::Celebrating => "ce",
            PoleAxis::Connecting => "cx",
        }
    }
}

/// One axis reading: signed magnitude plus a letter-coded orientation.
///
/// `value` is conventionally in -3..=3 but is stored exactly as parsed;
/// out-of-range values are a producer concern, not a parse-time constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoleAttribute {
    pub value: Option<i32>,
    pub letter: Option<char>,
    /// Raw label column content, kept verbatim for display
    #[serde(default)]
    pub label: String,
}

impl PoleAttribute {
    pub fn is_set(&self) -> bool {
        self.value.is_some() || self.letter.is_some()
    }

    /// Combined wire format: value then letter ("2G", "-1F", "G")
    pub fn to_combined(&self) -> Option<String> {
        match (self.value, self.letter) {
            (None, None) => None,
            (value, letter) => {
                let mut s = String::new();
                if let Some(v) = value {
                    s.push_str(&v.to_string());
                }
                if let Some(c) = letter {
                    s.push(c);
                }
                Some(s)
            }
        }
    }
}

// =============================================================================
// NODES
// =============================================================================

/// One node of the belief tree (core, pillar, sub, or micro)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeliefNode {
    pub title: String,
    /// Free-text belief statement; empty means the node is incomplete
    pub belief: String,
    /// Alignment confidence, clamped to 0..=100
    pub confidence: f32,
    /// Date string as found in the data (display formatting is a UI concern)
    pub updated: String,
    pub adapting: PoleAttribute,
    pub celebrating: PoleAttribute,
    pub connecting: PoleAttribute,
    pub today_state: String,
    pub details: String,
    pub priority_human: String,
    pub priority_ai: String,
}

impl Default for BeliefNode {
    fn default() -> Self {
        Self {
            title: String::new(),
            belief: String::new(),
            confidence: DEFAULT_CONFIDENCE,
            updated: String::new(),
            adapting: PoleAttribute::default(),
            celebrating: PoleAttribute::default(),
            connecting: PoleAttribute::default(),
            today_state: String::new(),
            details: String::new(),
            priority_human: String::new(),
            priority_ai: String::new(),
        }
    }
}

impl BeliefNode {
    /// A node counts as complete once its belief text is non-blank
    pub fn is_complete(&self) -> bool {
        !self.belief.trim().is_empty()
    }

    pub fn pole(&self, axis: PoleAxis) -> &PoleAttribute {
        match axis {
            PoleAxis::Adapting => &self.adapting,
            PoleAxis::Celebrating => &self.celebrating,
            PoleAxis::Connecting => &self.connecting,
        }
    }

    pub fn pole_mut(&mut self, axis: PoleAxis) -> &mut PoleAttribute {
        match axis {
            PoleAxis::Adapting => &mut self.adapting,
            PoleAxis::Celebrating => &mut self.celebrating,
            PoleAxis::Connecting => &mut self.connecting,
        }
    }
}

// =============================================================================
// NODE ADDRESSING
// =============================================================================

/// Address of one node in the fixed tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodePath {
    Core,
    Pillar(u8),
    Sub(u8, u8),
    Micro(u8, u8, u8),
}

fn in_range(i: u8) -> bool {
    (1..=3).contains(&i)
}

impl NodePath {
    /// Ring depth: 0 for the core, 1..=3 for pillar/sub/micro
    pub fn depth(&self) -> u8 {
        match self {
            NodePath::Core => 0,
            NodePath::Pillar(_) => 1,
            NodePath::Sub(_, _) => 2,
            NodePath::Micro(_, _, _) => 3,
        }
    }

    /// The enclosing node, if any
    pub fn parent(&self) -> Option<NodePath> {
        match *self {
            NodePath::Core => None,
            NodePath::Pillar(_) => Some(NodePath::Core),
            NodePath::Sub(p, _) => Some(NodePath::Pillar(p)),
            NodePath::Micro(p, s, _) => Some(NodePath::Sub(p, s)),
        }
    }

    /// Pillar index this path belongs to (None for the core)
    pub fn pillar(&self) -> Option<u8> {
        match *self {
            NodePath::Core => None,
            NodePath::Pillar(p) | NodePath::Sub(p, _) | NodePath::Micro(p, _, _) => Some(p),
        }
    }

    pub fn is_valid(&self) -> bool {
        match *self {
            NodePath::Core => true,
            NodePath::Pillar(p) => in_range(p),
            NodePath::Sub(p, s) => in_range(p) && in_range(s),
            NodePath::Micro(p, s, m) => in_range(p) && in_range(s) && in_range(m),
        }
    }

    /// Display name of the ring level
    pub fn level_name(&self) -> &'static str {
        match self {
            NodePath::Core => "Core",
            NodePath::Pillar(_) => "Pillar",
            NodePath::Sub(_, _) => "Sub",
            NodePath::Micro(_, _, _) => "Micro",
        }
    }
}

/// Flat slot for a 1-based (pillar, sub) pair
fn sub_slot(p: u8, s: u8) -> usize {
    (p as usize - 1) * SUBS_PER_PILLAR + (s as usize - 1)
}

/// Flat slot for a 1-based (pillar, sub, micro) triple
fn micro_slot(p: u8, s: u8, m: u8) -> usize {
    (p as usize - 1) * SUBS_PER_PILLAR * MICROS_PER_SUB
        + (s as usize - 1) * MICROS_PER_SUB
        + (m as usize - 1)
}

// =============================================================================
// INSIGHTS
// =============================================================================

/// Kind of narrative insight attached to the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Overview,
    Observations,
    Projects,
}

impl InsightKind {
    pub const ALL: [InsightKind; 3] = [
        InsightKind::Overview,
        InsightKind::Observations,
        InsightKind::Projects,
    ];

    /// Key fragment used in `insight_*` row labels
    pub fn key(&self) -> &'static str {
        match self {
            InsightKind::Overview => "overview",
            InsightKind::Observations => "observations",
            InsightKind::Projects => "projects",
        }
    }
}

/// One overview/observations/projects text bundle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightSet {
    pub overview: String,
    pub observations: String,
    pub projects: String,
}

impl InsightSet {
    pub fn get(&self, kind: InsightKind) -> &str {
        match kind {
            InsightKind::Overview => &self.overview,
            InsightKind::Observations => &self.observations,
            InsightKind::Projects => &self.projects,
        }
    }

    pub fn set(&mut self, kind: InsightKind, text: String) {
        match kind {
            InsightKind::Overview => self.overview = text,
            InsightKind::Observations => self.observations = text,
            InsightKind::Projects => self.projects = text,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.overview.is_empty() && self.observations.is_empty() && self.projects.is_empty()
    }
}

/// All insight slots: one global set plus one per pillar
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    pub global: InsightSet,
    pub per_pillar: [InsightSet; PILLAR_COUNT],
}

impl Insights {
    /// Mutable slot for a pillar context; None for an out-of-range pillar
    pub fn slot_mut(&mut self, pillar: Option<u8>) -> Option<&mut InsightSet> {
        match pillar {
            None => Some(&mut self.global),
            Some(p) if in_range(p) => Some(&mut self.per_pillar[p as usize - 1]),
            Some(_) => None,
        }
    }

    pub fn slot(&self, pillar: Option<u8>) -> Option<&InsightSet> {
        match pillar {
            None => Some(&self.global),
            Some(p) if in_range(p) => Some(&self.per_pillar[p as usize - 1]),
            Some(_) => None,
        }
    }

    /// Insight texts for a pillar context, falling back per field to the
    /// global slot when the pillar slot is blank
    pub fn resolve(&self, pillar: Option<u8>) -> InsightSet {
        let Some(local) = self.slot(pillar) else {
            return self.global.clone();
        };
        let pick = |kind: InsightKind| {
            let text = local.get(kind);
            if text.is_empty() {
                self.global.get(kind).to_string()
            } else {
                text.to_string()
            }
        };
        InsightSet {
            overview: pick(InsightKind::Overview),
            observations: pick(InsightKind::Observations),
            projects: pick(InsightKind::Projects),
        }
    }
}

// =============================================================================
// PROJECTS
// =============================================================================

/// Project priority as found in the data: numeric when the cell parses as
/// an integer, otherwise the raw text ("P1", "High", ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriorityValue {
    Number(i64),
    Text(String),
}

impl Default for PriorityValue {
    fn default() -> Self {
        PriorityValue::Text(String::new())
    }
}

impl PriorityValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, PriorityValue::Text(s) if s.is_empty())
    }
}

impl std::fmt::Display for PriorityValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriorityValue::Number(n) => write!(f, "{n}"),
            PriorityValue::Text(s) => f.write_str(s),
        }
    }
}

/// Cadence of a recommended project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    /// Ongoing habit or routine
    Practice,
    /// Time-boxed goal
    Sprint,
}

impl ProjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectKind::Practice => "practice",
            ProjectKind::Sprint => "sprint",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectKind::Practice => "Practice",
            ProjectKind::Sprint => "Sprint",
        }
    }
}

/// One derived project recommendation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub action: String,
    pub measure: String,
    pub start: Option<f64>,
    pub target: Option<f64>,
    /// Days per week for practice-style projects
    pub days: Option<i32>,
    pub benefit: String,
    pub priority_user: String,
    pub priority_ai: PriorityValue,
    pub outcome: String,
    pub acceptance: String,
    #[serde(rename = "ref")]
    pub reference: String,
    pub rationale: String,
    pub today_state: String,
    pub details: String,
    /// Associated pillar; None means a core-level recommendation
    pub pillar: Option<u8>,
    pub kind: Option<ProjectKind>,
    pub duration: String,
}

// =============================================================================
// LENSES
// =============================================================================

/// A belief applicable across zero or more pillars
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LensEntry {
    pub node: BeliefNode,
    /// Pillars this lens applies to (each 1..=3)
    pub pillars: Vec<u8>,
    /// Stable ordinal assigned at parse time
    pub lens_index: usize,
}

// =============================================================================
// TREE
// =============================================================================

/// The aggregate belief map: a fixed 1+3+9+27 node tree plus lenses,
/// projects, and insight texts.
///
/// Treated as an immutable snapshot after construction; a reload replaces
/// the whole tree rather than mutating it in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BeliefTree {
    pub title: String,
    pub mode: MapMode,
    pub pillar_names: [String; PILLAR_COUNT],
    pub core: BeliefNode,
    pillars: [BeliefNode; PILLAR_COUNT],
    subs: [BeliefNode; PILLAR_COUNT * SUBS_PER_PILLAR],
    micros: [BeliefNode; PILLAR_COUNT * SUBS_PER_PILLAR * MICROS_PER_SUB],
    pub lenses: Vec<LensEntry>,
    pub projects: Vec<Project>,
    pub insights: Insights,
}

impl BeliefTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pillar(&self, p: u8) -> Option<&BeliefNode> {
        in_range(p).then(|| &self.pillars[p as usize - 1])
    }

    pub fn sub(&self, p: u8, s: u8) -> Option<&BeliefNode> {
        (in_range(p) && in_range(s)).then(|| &self.subs[sub_slot(p, s)])
    }

    pub fn micro(&self, p: u8, s: u8, m: u8) -> Option<&BeliefNode> {
        (in_range(p) && in_range(s) && in_range(m)).then(|| &self.micros[micro_slot(p, s, m)])
    }

    /// Node at a path; None for out-of-range indices
    pub fn node(&self, path: NodePath) -> Option<&BeliefNode> {
        match path {
            NodePath::Core => Some(&self.core),
            NodePath::Pillar(p) => self.pillar(p),
            NodePath::Sub(p, s) => self.sub(p, s),
            NodePath::Micro(p, s, m) => self.micro(p, s, m),
        }
    }

    pub fn node_mut(&mut self, path: NodePath) -> Option<&mut BeliefNode> {
        if !path.is_valid() {
            return None;
        }
        Some(match path {
            NodePath::Core => &mut self.core,
            NodePath::Pillar(p) => &mut self.pillars[p as usize - 1],
            NodePath::Sub(p, s) => &mut self.subs[sub_slot(p, s)],
            NodePath::Micro(p, s, m) => &mut self.micros[micro_slot(p, s, m)],
        })
    }

    /// Stored pillar name (may be empty before defaults are filled)
    pub fn pillar_name(&self, p: u8) -> Option<&str> {
        in_range(p).then(|| self.pillar_names[p as usize - 1].as_str())
    }

    /// Pillar name with a generic fallback for blank or out-of-range entries
    pub fn pillar_display_name(&self, p: u8) -> String {
        match self.pillar_name(p) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Pillar {p}"),
        }
    }

    /// All 40 node paths in core, pillar, sub, micro order
    pub fn all_paths() -> Vec<NodePath> {
        let mut paths = Vec::with_capacity(40);
        paths.push(NodePath::Core);
        for p in 1..=3u8 {
            paths.push(NodePath::Pillar(p));
            for s in 1..=3u8 {
                paths.push(NodePath::Sub(p, s));
                for m in 1..=3u8 {
                    paths.push(NodePath::Micro(p, s, m));
                }
            }
        }
        paths
    }
}

// =============================================================================
// TESTS
// =============================================================================

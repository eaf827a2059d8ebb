//! Completeness tallies and project selection.

use std::collections::BTreeMap;

use crate::model::{BeliefNode, BeliefTree, PriorityValue, Project, PILLAR_COUNT};

// =============================================================================
// COMPLETENESS
// =============================================================================

/// Nodes counted per pillar subtree: the pillar itself, 3 subs, 9 micros
pub const PILLAR_NODE_COUNT: usize = 13;

pub fn is_node_complete(node: &BeliefNode) -> bool {
    node.is_complete()
}

/// Filled-node tally for one subtree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletenessTally {
    pub filled: usize,
    pub total: usize,
}

impl CompletenessTally {
    pub fn is_complete(&self) -> bool {
        self.filled == self.total
    }
}

/// Fill tally over a pillar's 13 nodes. Out-of-range pillars tally as
/// completely unfilled.
pub fn pillar_completeness(tree: &BeliefTree, pillar: u8) -> CompletenessTally {
    let mut filled = 0;
    if tree.pillar(pillar).is_some_and(BeliefNode::is_complete) {
        filled += 1;
    }
    for s in 1..=3u8 {
        if tree.sub(pillar, s).is_some_and(BeliefNode::is_complete) {
            filled += 1;
        }
        for m in 1..=3u8 {
            if tree.micro(pillar, s, m).is_some_and(BeliefNode::is_complete) {
                filled += 1;
            }
        }
    }
    CompletenessTally {
        filled,
        total: PILLAR_NODE_COUNT,
    }
}

/// Completeness of the whole map: the core plus every pillar subtree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverallCompleteness {
    pub core_complete: bool,
    pub pillars: [CompletenessTally; PILLAR_COUNT],
}

impl OverallCompleteness {
    pub fn is_complete(&self) -> bool {
        self.core_complete && self.pillars.iter().all(CompletenessTally::is_complete)
    }

    pub fn pillar(&self, pillar: u8) -> Option<&CompletenessTally> {
        (1..=PILLAR_COUNT as u8)
            .contains(&pillar)
            .then(|| &self.pillars[pillar as usize - 1])
    }
}

pub fn overall_completeness(tree: &BeliefTree) -> OverallCompleteness {
    OverallCompleteness {
        core_complete: tree.core.is_complete(),
        pillars: [
            pillar_completeness(tree, 1),
            pillar_completeness(tree, 2),
            pillar_completeness(tree, 3),
        ],
    }
}

// =============================================================================
// PRIORITY RANKING
// =============================================================================

/// Rank for unrecognized or missing priorities; sorts last
pub const UNRANKED_PRIORITY: i64 = 999;

/// Numeric rank derived from a project's machine priority; lower sorts
/// first. Numbers rank as-is, "P<n>" codes rank as n, and the common text
/// levels map to 1/2/3.
pub fn priority_rank(priority: &PriorityValue) -> i64 {
    match priority {
        PriorityValue::Number(n) => *n,
        PriorityValue::Text(raw) => {
            let s = raw.trim().to_lowercase();
            if s.is_empty() {
                return UNRANKED_PRIORITY;
            }
            if let Some(rest) = s.strip_prefix('p') {
                let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
                if let Ok(n) = digits.parse::<i64>() {
                    return n;
                }
            }
            if s.contains("top") || s.contains("high") {
                1
            } else if s.contains("medium") || s.contains("mid") {
                2
            } else if s.contains("low") {
                3
            } else {
                UNRANKED_PRIORITY
            }
        }
    }
}

// =============================================================================
// PROJECT SELECTION
// =============================================================================

/// Projects for one pillar (or every project when `pillar` is None),
/// stably sorted by ascending priority rank. Ties keep insertion order.
pub fn projects_for_pillar(tree: &BeliefTree, pillar: Option<u8>) -> Vec<&Project> {
    let mut projects: Vec<&Project> = tree
        .projects
        .iter()
        .filter(|project| pillar.is_none_or(|p| project.pillar == Some(p)))
        .collect();
    projects.sort_by_key(|project| priority_rank(&project.priority_ai));
    projects
}

/// The highest-priority project per pillar bucket, the pillar-less bucket
/// included, ordered by ascending bucket (core-level first).
pub fn top_projects_across_pillars(tree: &BeliefTree) -> Vec<&Project> {
    let mut sorted: Vec<&Project> = tree.projects.iter().collect();
    sorted.sort_by_key(|project| priority_rank(&project.priority_ai));

    let mut best: BTreeMap<Option<u8>, &Project> = BTreeMap::new();
    for project in sorted {
        best.entry(project.pillar).or_insert(project);
    }
    best.into_values().collect()
}

// =============================================================================
// TESTS
// =============================================================================

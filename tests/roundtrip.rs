//! Round-trip laws: parse → export → parse reproduces every node's title,
//! belief, and confidence, both in-memory and through real CSV text.

use aim_core::export::export_rows;
use aim_core::model::{BeliefTree, NodePath};
use aim_core::parse::parse;
use aim_core::record::RawRecord;
use proptest::prelude::*;

fn label_for(path: NodePath) -> String {
    match path {
        NodePath::Core => "core".to_string(),
        NodePath::Pillar(p) => format!("pillar:{p}"),
        NodePath::Sub(p, s) => format!("sub:{p}:{s}"),
        NodePath::Micro(p, s, m) => format!("micro:{p}:{s}:{m}"),
    }
}

fn node_fields_match(a: &BeliefTree, b: &BeliefTree) {
    for path in BeliefTree::all_paths() {
        let left = a.node(path).unwrap();
        let right = b.node(path).unwrap();
        assert_eq!(left.title, right.title, "title at {path:?}");
        assert_eq!(left.belief, right.belief, "belief at {path:?}");
        assert_eq!(left.confidence, right.confidence, "confidence at {path:?}");
    }
}

fn sample_rows() -> Vec<RawRecord> {
    vec![
        RawRecord {
            belief: Some("My 2026 Map".into()),
            ..RawRecord::with_label("title")
        },
        RawRecord {
            belief: Some("personal".into()),
            ..RawRecord::with_label("mode")
        },
        RawRecord {
            belief: Some("Mind & Body".into()),
            ..RawRecord::with_label("pillar_name:1")
        },
        RawRecord {
            belief: Some("Everything compounds".into()),
            confidence: Some("90".into()),
            ..RawRecord::with_label("core")
        },
        RawRecord {
            title: Some("Feedback".into()),
            belief: Some("I value honest feedback".into()),
            confidence: Some("85".into()),
            pole_ac: Some("2G".into()),
            updated: Some("2026-02-10".into()),
            ..RawRecord::with_label("pillar:2")
        },
        RawRecord {
            belief: Some("Ship weekly".into()),
            confidence: Some("62.5".into()),
            ..RawRecord::with_label("sub:2:1")
        },
        RawRecord {
            belief: Some("Demo every Friday".into()),
            ..RawRecord::with_label("micro:2:1:3")
        },
        RawRecord {
            belief: Some("Systems over goals".into()),
            pillars: Some("1;3".into()),
            ..RawRecord::with_label("lens:0")
        },
        RawRecord {
            project_action: Some("Walk daily".into()),
            project_start: Some("10".into()),
            project_target: Some("30".into()),
            project_measure: Some("minutes".into()),
            pillar: Some("1".into()),
            priority_ai: Some("P2".into()),
            ..RawRecord::with_label("project")
        },
        RawRecord {
            belief: Some("Lead with the body".into()),
            ..RawRecord::with_label("insight_pillar_1_overview")
        },
    ]
}

#[test]
fn parse_always_yields_the_fixed_tree() {
    let tree = parse(&sample_rows());
    let mut nodes = 0;
    for path in BeliefTree::all_paths() {
        assert!(tree.node(path).is_some());
        nodes += 1;
    }
    assert_eq!(nodes, 40);
    for p in 1..=3 {
        assert!(!tree.pillar_name(p).unwrap().is_empty(), "pillar {p} unnamed");
    }
}

#[test]
fn reparse_is_idempotent_on_node_fields() {
    let first = parse(&sample_rows());
    let second = parse(&export_rows(&first));
    node_fields_match(&first, &second);
    assert_eq!(first.title, second.title);
    assert_eq!(first.mode, second.mode);
    assert_eq!(first.pillar_names, second.pillar_names);
}

#[test]
fn csv_text_round_trip() {
    let first = parse(&sample_rows());

    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in export_rows(&first) {
        writer.serialize(row).unwrap();
    }
    let bytes = writer.into_inner().unwrap();

    let mut reader = csv::Reader::from_reader(bytes.as_slice());
    let rows: Vec<RawRecord> = reader
        .deserialize()
        .collect::<Result<_, _>>()
        .unwrap();

    let second = parse(&rows);
    node_fields_match(&first, &second);
    assert_eq!(first.lenses.len(), second.lenses.len());
    assert_eq!(first.projects.len(), second.projects.len());
}

// =============================================================================
// PROPERTIES
// =============================================================================

/// Any node path, 1-based indices
fn any_path() -> impl Strategy<Value = NodePath> {
    (0usize..40).prop_map(|i| BeliefTree::all_paths()[i])
}

prop_compose! {
    fn any_node_row()(
        path in any_path(),
        title in "[a-zA-Z0-9 ]{0,20}",
        belief in "[a-zA-Z0-9 ]{0,30}",
        tenths in 0u32..=1000,
    ) -> RawRecord {
        RawRecord {
            title: Some(title),
            belief: Some(belief),
            confidence: Some((tenths as f32 / 10.0).to_string()),
            ..RawRecord::with_label(label_for(path))
        }
    }
}

proptest! {
    #[test]
    fn export_reparse_reproduces_arbitrary_node_rows(
        rows in proptest::collection::vec(any_node_row(), 0..60)
    ) {
        let first = parse(&rows);
        let second = parse(&export_rows(&first));
        for path in BeliefTree::all_paths() {
            let a = first.node(path).unwrap();
            let b = second.node(path).unwrap();
            prop_assert_eq!(&a.title, &b.title);
            prop_assert_eq!(&a.belief, &b.belief);
            prop_assert_eq!(a.confidence, b.confidence);
        }
    }

    #[test]
    fn confidence_is_always_clamped(
        raw in proptest::option::of("[0-9]{1,4}(\\.[0-9]{1,2})?|-[0-9]{1,3}|[a-z]{0,6}")
    ) {
        let record = RawRecord {
            confidence: raw,
            ..RawRecord::with_label("core")
        };
        let tree = parse(&[record]);
        prop_assert!((0.0..=100.0).contains(&tree.core.confidence));
    }
}

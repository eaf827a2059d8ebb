//! The navigation invariant holds after any operation sequence, valid or
//! not: no pillar selected implies full view, a selected sub implies sub
//! focus with its pillar selected.

use aim_chart::{NavigationController, ZoomLevel};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Op {
    FullView,
    Pillar(u8),
    Sub(u8, u8),
    Up,
    Preselect(Option<u8>),
}

fn any_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::FullView),
        (0u8..6).prop_map(Op::Pillar),
        (0u8..6, 0u8..6).prop_map(|(p, s)| Op::Sub(p, s)),
        Just(Op::Up),
        proptest::option::of(0u8..6).prop_map(Op::Preselect),
    ]
}

fn apply(nav: &mut NavigationController, op: Op) {
    match op {
        Op::FullView => nav.navigate_to_full_view(),
        Op::Pillar(p) => nav.navigate_to_pillar(p),
        Op::Sub(p, s) => nav.navigate_to_sub(p, s),
        Op::Up => nav.navigate_up(),
        Op::Preselect(s) => nav.set_preselected_sub(s),
    }
}

fn invariant_holds(nav: &NavigationController) -> bool {
    let in_range = |i: Option<u8>| i.is_none_or(|v| (1..=3).contains(&v));
    if !in_range(nav.selected_pillar())
        || !in_range(nav.selected_sub())
        || !in_range(nav.preselected_sub())
    {
        return false;
    }
    match nav.level() {
        ZoomLevel::Full => nav.selected_pillar().is_none() && nav.selected_sub().is_none(),
        ZoomLevel::PillarFocus => nav.selected_pillar().is_some() && nav.selected_sub().is_none(),
        ZoomLevel::SubFocus => nav.selected_pillar().is_some() && nav.selected_sub().is_some(),
    }
}

proptest! {
    #[test]
    fn invariant_survives_any_sequence(ops in proptest::collection::vec(any_op(), 0..40)) {
        let mut nav = NavigationController::new();
        for op in ops {
            apply(&mut nav, op);
            prop_assert!(invariant_holds(&nav), "after {:?}: {:?}", op, nav.snapshot());
        }
    }
}

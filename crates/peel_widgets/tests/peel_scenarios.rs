//! End-to-end peel scenarios: drag sequences, threshold boundaries, and the
//! expanded/commit/reset paths.

use peel_core::{DragSample, Point, Size};
use peel_widgets::prelude::*;

const W: f32 = 300.0;
const H: f32 = 130.0;

fn controller() -> PeelController {
    PeelController::new(PeelConfig::default(), Size::new(W, H))
}

fn settle(c: &mut PeelController) {
    for _ in 0..600 {
        if !c.tick(1.0 / 60.0) {
            return;
        }
    }
    panic!("controller never settled");
}

fn round3(v: f32) -> f32 {
    (v * 1000.0).round() / 1000.0
}

#[test]
fn test_leftward_drag_maps_linearly() {
    for tx in [-0.0f32, -1.0, -75.0, -150.0, -299.0, -300.0, -301.0, -5000.0] {
        let mut c = controller();
        c.drag(DragSample::new(tx));
        let expected = (-tx / W).clamp(0.0, 1.0);
        assert!((c.progress() - expected).abs() < 1e-6, "tx={tx}");
    }
}

#[test]
fn test_rightward_drag_is_ignored() {
    for tx in [0.5f32, 10.0, 300.0, 10_000.0] {
        let mut c = controller();
        c.drag(DragSample::new(tx));
        assert_eq!(c.progress(), 0.0, "tx={tx}");
    }
}

#[test]
fn test_full_drag_expands() {
    let mut c = controller();
    let progress: Vec<f32> = [0.0, -50.0, -150.0, -310.0]
        .into_iter()
        .map(|tx| match c.drag(DragSample::new(tx)) {
            PeelTransition::Dragged { progress } => round3(progress),
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(progress, vec![0.0, 0.167, 0.5, 1.0]);

    let mut pins = RandomPin::seeded(3);
    let PeelTransition::Expanded { pinned } = c.end_drag(&mut pins) else {
        panic!("expected expansion");
    };
    assert!((0.4..=0.7).contains(&pinned));
    assert_eq!(c.phase(), PeelPhase::Expanded);

    settle(&mut c);
    assert_eq!(c.state(), PeelState { progress: pinned, expanded: true });
}

#[test]
fn test_short_drag_snaps_back() {
    let mut c = controller();
    for tx in [0.0, -30.0, -50.0] {
        c.drag(DragSample::new(tx));
    }
    assert_eq!(round3(c.progress()), 0.167);

    assert_eq!(c.end_drag(&mut FixedPin(0.5)), PeelTransition::SnappedBack);
    assert_eq!(c.phase(), PeelPhase::Idle);
    assert_eq!(c.resting_progress(), 0.0);

    settle(&mut c);
    assert_eq!(c.state(), PeelState { progress: 0.0, expanded: false });
}

#[test]
fn test_threshold_is_exclusive() {
    let mut at = controller();
    at.drag(DragSample::new(-0.25 * W));
    assert_eq!(at.progress(), 0.25);
    assert_eq!(at.end_drag(&mut FixedPin(0.5)), PeelTransition::SnappedBack);

    let mut past = controller();
    past.drag(DragSample::new(-0.26 * W));
    let transition = past.end_drag(&mut RandomPin::seeded(11));
    let PeelTransition::Expanded { pinned } = transition else {
        panic!("expected expansion, got {transition:?}");
    };
    assert!((0.4..=0.7).contains(&pinned));
}

#[test]
fn test_only_delete_tap_commits() {
    let taps = [
        Point::new(5.0, 5.0),
        Point::new(W / 2.0, H / 2.0),
        Point::new(W - 150.0, H / 2.0),
        Point::new(W - 20.0, 2.0), // above the inset panel
    ];
    for tap in taps {
        let mut c = controller();
        c.drag(DragSample::new(-200.0));
        c.end_drag(&mut FixedPin(0.6));
        settle(&mut c);

        assert_eq!(c.tap(tap), PeelTransition::Reset, "tap={tap:?}");
        assert_eq!(c.phase(), PeelPhase::Idle);
        assert_eq!(c.resting_progress(), 0.0);
    }

    let mut c = controller();
    c.drag(DragSample::new(-200.0));
    c.end_drag(&mut FixedPin(0.6));
    settle(&mut c);
    assert_eq!(c.tap(Point::new(W - 30.0, H / 2.0)), PeelTransition::Commit);
}

#[test]
fn test_reset_from_idle_is_noop() {
    let mut c = controller();
    assert_eq!(c.reset(), PeelTransition::Ignored);
    assert_eq!(c.reset(), PeelTransition::Ignored);
    assert_eq!(c.phase(), PeelPhase::Idle);
    assert!(!c.is_animating());
}

#[test]
fn test_progress_bounded_over_arbitrary_input() {
    let mut c = controller();
    let mut pins = RandomPin::seeded(99);
    let samples = [-10.0, -400.0, 60.0, -90.0, -1.0e9, 1.0e9, -150.0];

    for round in 0..20 {
        for (i, tx) in samples.iter().enumerate() {
            c.drag(DragSample::new(tx * (1.0 + round as f32 * 0.1)));
            if (i + round) % 3 == 0 {
                c.end_drag(&mut pins);
            }
            if (i + round) % 5 == 0 {
                c.tap(Point::new(10.0, 10.0));
            }
            for _ in 0..3 {
                c.tick(1.0 / 60.0);
                let p = c.progress();
                assert!((0.0..=1.0).contains(&p), "progress {p} out of range");
                if c.is_expanded() && !c.is_animating() {
                    assert!((0.4..=0.7).contains(&c.resting_progress()));
                }
            }
        }
    }
}

#[test]
fn test_fixed_pin_gives_exact_layers() {
    let mut c = controller();
    c.drag(DragSample::new(-240.0));
    c.end_drag(&mut FixedPin(0.5));
    settle(&mut c);

    let recipe = c.recipe();
    assert_eq!(recipe.content_mask.width(), 150.0);
    assert_eq!(recipe.flap.edge_x, 150.0);
    assert_eq!(recipe.flap.mask.x(), 0.0);
    assert_eq!(recipe.shadow.offset_x, -150.0);
    assert!(recipe.panel.interactive);
}

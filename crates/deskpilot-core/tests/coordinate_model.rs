//! Properties of the multi-monitor coordinate model, exercised through the
//! public API of `deskpilot-core` only.

use deskpilot_core::domain::selector::screen_table;
use deskpilot_core::domain::translate::{clip_region, global_to_local, local_to_global};
use deskpilot_core::{Point, RawMonitor, Rect, ScreenError, ScreenSelector, ScreenSnapshot};
use proptest::prelude::*;

// ── Fixtures ──────────────────────────────────────────────────────────────────

/// 1920x1080 primary at the origin, 1280x1024 secondary to its right.
fn dual_layout() -> ScreenSnapshot {
    ScreenSnapshot::from_raw(vec![
        RawMonitor::new("DP-1", 0, 0, 1920, 1080).primary(),
        RawMonitor::new("HDMI-1", 1920, 0, 1280, 1024),
    ])
    .expect("dual layout is valid")
}

fn raw_monitor() -> impl Strategy<Value = RawMonitor> {
    (-5000i32..5000, -5000i32..5000, 0u32..4000, 0u32..4000, any::<bool>()).prop_map(
        |(x, y, w, h, primary)| RawMonitor {
            name: String::new(),
            x,
            y,
            width: w,
            height: h,
            is_primary: primary,
        },
    )
}

fn valid_snapshot() -> impl Strategy<Value = ScreenSnapshot> {
    prop::collection::vec(raw_monitor(), 1..6).prop_filter_map("needs a usable monitor", |raw| {
        ScreenSnapshot::from_raw(raw).ok()
    })
}

// ── Scenario: two monitors side by side ───────────────────────────────────────

#[test]
fn test_dual_layout_lists_both_monitors_in_order() {
    let snap = dual_layout();
    let names: Vec<&str> = snap.monitors().iter().map(|m| m.name()).collect();
    assert_eq!(names, vec!["DP-1", "HDMI-1"]);
}

#[test]
fn test_dual_layout_virtual_size_is_3200_by_1080() {
    assert_eq!(dual_layout().virtual_bounds().size(), (3200, 1080));
}

#[test]
fn test_dual_layout_origin_of_screen_1_is_global_1920_0() {
    // Arrange
    let snap = dual_layout();
    let frame = snap.resolve_screen(Some(1)).unwrap();

    // Act
    let global = local_to_global(&frame, Point::new(0, 0));

    // Assert
    assert_eq!(global, Point::new(1920, 0));
}

#[test]
fn test_screen_0_is_primary_regardless_of_enumeration_order() {
    let snap = ScreenSnapshot::from_raw(vec![
        RawMonitor::new("left", -1280, 0, 1280, 1024),
        RawMonitor::new("centre", 0, 0, 1920, 1080).primary(),
        RawMonitor::new("right", 1920, 0, 1280, 1024),
    ])
    .unwrap();

    let frame = snap.resolve_screen(Some(0)).unwrap();

    assert_eq!(frame.origin(), Point::new(0, 0));
    assert_eq!(frame.monitor().map(|m| m.name()), Some("centre"));
    assert_eq!(snap.resolve_screen(Some(1)).unwrap().origin(), Point::new(-1280, 0));
    assert_eq!(snap.resolve_screen(Some(2)).unwrap().origin(), Point::new(1920, 0));
}

#[test]
fn test_clip_cases_on_1080p_monitor() {
    let snap = dual_layout();
    let frame = snap.resolve_screen(Some(0)).unwrap();

    assert_eq!(
        clip_region(&frame, Rect::new(100, 100, 400, 300)),
        Ok(Rect::new(100, 100, 400, 300))
    );
    assert_eq!(
        clip_region(&frame, Rect::new(1900, 1000, 400, 300)),
        Ok(Rect::new(1900, 1000, 20, 80))
    );
    assert!(matches!(
        clip_region(&frame, Rect::new(2000, 0, 400, 300)),
        Err(ScreenError::RegionOutOfBounds { .. })
    ));
}

#[test]
fn test_two_snapshots_of_same_topology_are_identical() {
    assert_eq!(dual_layout(), dual_layout());
}

#[test]
fn test_stale_index_after_unplug_is_invalid() {
    // Arrange: screen 1 existed in the first snapshot
    let before = dual_layout();
    assert!(before.resolve_screen(Some(1)).is_ok());

    // Act: the secondary monitor was unplugged
    let after = ScreenSnapshot::from_raw(vec![RawMonitor::new("DP-1", 0, 0, 1920, 1080).primary()]).unwrap();

    // Assert
    assert_eq!(
        after.resolve_screen(Some(1)),
        Err(ScreenError::InvalidScreenIndex { requested: 1, available: 1 })
    );
}

// ── Laws ──────────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn prop_exactly_one_primary(snap in valid_snapshot()) {
        let primaries = snap.monitors().iter().filter(|m| m.is_primary()).count();
        prop_assert_eq!(primaries, 1);
        prop_assert!(snap.primary().is_primary());
    }

    #[test]
    fn prop_every_monitor_is_non_degenerate(snap in valid_snapshot()) {
        for m in snap.monitors() {
            prop_assert!(m.width() > 0 && m.height() > 0);
        }
    }

    #[test]
    fn prop_indices_follow_enumeration_order(snap in valid_snapshot()) {
        for (i, m) in snap.monitors().iter().enumerate() {
            prop_assert_eq!(m.index(), i);
        }
    }

    #[test]
    fn prop_virtual_bounds_cover_every_monitor(snap in valid_snapshot()) {
        let bounds = snap.virtual_bounds();
        for m in snap.monitors() {
            prop_assert_eq!(bounds.union(&m.rect()), bounds);
        }
    }

    #[test]
    fn prop_local_global_round_trip(
        snap in valid_snapshot(),
        screen in proptest::option::of(0usize..6),
        x in any::<i32>(),
        y in any::<i32>(),
    ) {
        if let Ok(frame) = snap.resolve_screen(screen) {
            let p = Point::new(x, y);
            prop_assert_eq!(global_to_local(&frame, local_to_global(&frame, p)), p);
        }
    }

    #[test]
    fn prop_clip_is_idempotent(
        snap in valid_snapshot(),
        screen in proptest::option::of(0usize..6),
        x in -6000i32..6000,
        y in -6000i32..6000,
        w in 0u32..8000,
        h in 0u32..8000,
    ) {
        if let Ok(frame) = snap.resolve_screen(screen) {
            if let Ok(once) = clip_region(&frame, Rect::new(x, y, w, h)) {
                prop_assert_eq!(clip_region(&frame, once), Ok(once));
                prop_assert!(!once.is_empty());
            }
        }
    }

    #[test]
    fn prop_remap_is_a_bijection_onto_raw_indices(snap in valid_snapshot()) {
        let table = screen_table(&snap);
        prop_assert_eq!(table.len(), snap.len());
        prop_assert_eq!(snap.resolve(ScreenSelector::Primary).unwrap().origin(), snap.primary().origin());
        let mut seen = table.clone();
        seen.sort_unstable();
        seen.dedup();
        prop_assert_eq!(seen.len(), snap.len());
        prop_assert!(snap.resolve_screen(Some(snap.len())).is_err());
    }
}

//! Coordinate translator: moves points and regions between a resolved frame
//! and the virtual desktop.
//!
//! Translation never checks bounds. A pointer move that ends exactly on a
//! monitor's far edge is legal even though the OS may clamp it; bounds are
//! only enforced by [`clip_region`], and only when a caller asks for it.

use crate::domain::error::ScreenError;
use crate::domain::frame::ResolvedFrame;
use crate::domain::geometry::{Point, Rect, Region};

/// Frame-local point -> global point.
///
/// Uses wrapping arithmetic so that [`global_to_local`] is an exact inverse
/// for every `i32` pair.
pub fn local_to_global(frame: &ResolvedFrame, local: Point) -> Point {
    let o = frame.origin();
    Point::new(o.x.wrapping_add(local.x), o.y.wrapping_add(local.y))
}

/// Global point -> frame-local point.
pub fn global_to_local(frame: &ResolvedFrame, global: Point) -> Point {
    let o = frame.origin();
    Point::new(global.x.wrapping_sub(o.x), global.y.wrapping_sub(o.y))
}

/// Intersects `region` with the frame's bounds.
///
/// # Errors
///
/// [`ScreenError::RegionOutOfBounds`] when the intersection has zero area,
/// including a region that merely touches the far edge.
pub fn clip_region(frame: &ResolvedFrame, region: Region) -> Result<Region, ScreenError> {
    let bounds = frame.bounds();
    region
        .intersection(&bounds)
        .ok_or(ScreenError::RegionOutOfBounds { region, bounds })
}

/// Frame-local region -> the same pixels in global coordinates.
pub fn region_to_global(frame: &ResolvedFrame, region: Region) -> Rect {
    let origin = local_to_global(frame, region.origin());
    Rect::new(origin.x, origin.y, region.width, region.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::monitor::RawMonitor;
    use crate::domain::snapshot::ScreenSnapshot;

    fn frames() -> (ResolvedFrame, ResolvedFrame, ResolvedFrame) {
        let snap = ScreenSnapshot::from_raw(vec![
            RawMonitor::new("main", 0, 0, 1920, 1080).primary(),
            RawMonitor::new("side", 1920, 0, 1280, 1024),
        ])
        .unwrap();
        (
            snap.resolve_screen(Some(0)).unwrap(),
            snap.resolve_screen(Some(1)).unwrap(),
            snap.resolve_screen(None).unwrap(),
        )
    }

    #[test]
    fn test_local_to_global_offsets_by_monitor_origin() {
        let (_, side, _) = frames();
        assert_eq!(local_to_global(&side, Point::new(0, 0)), Point::new(1920, 0));
        assert_eq!(local_to_global(&side, Point::new(500, 300)), Point::new(2420, 300));
    }

    #[test]
    fn test_combined_frame_translation_is_identity() {
        let (_, _, all) = frames();
        let p = Point::new(2500, 700);
        assert_eq!(local_to_global(&all, p), p);
        assert_eq!(global_to_local(&all, p), p);
    }

    #[test]
    fn test_global_to_local_can_go_negative() {
        let (_, side, _) = frames();
        assert_eq!(global_to_local(&side, Point::new(100, 50)), Point::new(-1820, 50));
    }

    #[test]
    fn test_round_trip_at_integer_extremes() {
        let (_, side, _) = frames();
        let p = Point::new(i32::MAX, i32::MIN);
        assert_eq!(global_to_local(&side, local_to_global(&side, p)), p);
    }

    #[test]
    fn test_region_fully_inside_is_unchanged() {
        let (main, _, _) = frames();
        let r = Rect::new(100, 100, 400, 300);
        assert_eq!(clip_region(&main, r), Ok(r));
    }

    #[test]
    fn test_region_crossing_far_corner_is_clipped() {
        let (main, _, _) = frames();
        assert_eq!(
            clip_region(&main, Rect::new(1900, 1000, 400, 300)),
            Ok(Rect::new(1900, 1000, 20, 80))
        );
    }

    #[test]
    fn test_region_touching_far_edge_is_valid() {
        let (main, _, _) = frames();
        let r = Rect::new(1520, 0, 400, 1080);
        assert_eq!(clip_region(&main, r), Ok(r));
    }

    #[test]
    fn test_region_starting_at_width_is_out_of_bounds() {
        let (main, _, _) = frames();
        let r = Rect::new(1920, 0, 100, 100);
        assert_eq!(
            clip_region(&main, r),
            Err(ScreenError::RegionOutOfBounds {
                region: r,
                bounds: Rect::new(0, 0, 1920, 1080)
            })
        );
    }

    #[test]
    fn test_region_beyond_monitor_is_out_of_bounds() {
        let (main, _, _) = frames();
        assert!(matches!(
            clip_region(&main, Rect::new(2000, 0, 400, 300)),
            Err(ScreenError::RegionOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_region_with_negative_origin_is_clipped_to_zero() {
        let (main, _, _) = frames();
        assert_eq!(
            clip_region(&main, Rect::new(-50, -50, 100, 100)),
            Ok(Rect::new(0, 0, 50, 50))
        );
    }

    #[test]
    fn test_combined_frame_clips_against_virtual_bounds() {
        let (_, _, all) = frames();
        assert_eq!(
            clip_region(&all, Rect::new(3000, 1000, 400, 400)),
            Ok(Rect::new(3000, 1000, 200, 80))
        );
    }

    #[test]
    fn test_region_to_global_on_secondary_monitor() {
        let (_, side, _) = frames();
        assert_eq!(
            region_to_global(&side, Rect::new(10, 20, 30, 40)),
            Rect::new(1930, 20, 30, 40)
        );
    }
}

//! PointerService: pointer moves, clicks, drags and scrolling in
//! screen-local coordinates.
//!
//! Positions given with a screen number are translated to global
//! coordinates before reaching the platform emulator. Relative moves,
//! relative drags and scrolling need no screen: they act on wherever the
//! pointer currently is.
//!
//! # Drag pacing
//!
//! A drag with a non-zero duration and more than one step visits
//! `steps` evenly spaced points and blocks the calling thread for
//! `duration / steps` after each one. There is no background thread and the
//! drag cannot be cancelled once started.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use deskpilot_core::domain::translate::{global_to_local, local_to_global};
use deskpilot_core::Point;
use tracing::{debug, warn};

use crate::application::emulate_input::{EmulationError, MouseButton, PlatformInputEmulator};
use crate::application::error::{AutomationError, Result};
use crate::application::screens::ScreenService;

/// Scroll clicks used by [`PointerService::scroll_up`] / `scroll_down` by default.
pub const DEFAULT_SCROLL_AMOUNT: i32 = 3;

/// How a drag moves between its start and end points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragOptions {
    pub button: MouseButton,
    /// Total time spread across the intermediate moves. Zero jumps straight
    /// to the target.
    pub duration: Duration,
    pub steps: u32,
}

impl Default for DragOptions {
    fn default() -> Self {
        Self {
            button: MouseButton::Left,
            duration: Duration::ZERO,
            steps: 10,
        }
    }
}

impl DragOptions {
    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_steps(mut self, steps: u32) -> Self {
        self.steps = steps;
        self
    }

    /// Whether the drag visits intermediate points.
    pub fn is_paced(&self) -> bool {
        !self.duration.is_zero() && self.steps > 1
    }
}

/// Evenly spaced points from just after `start` up to and including `end`.
///
/// One-shot: the iterator yields `steps` points and is then exhausted.
#[derive(Debug, Clone)]
pub struct DragPath {
    start: Point,
    end: Point,
    steps: u32,
    next: u32,
}

impl DragPath {
    /// `steps` is raised to at least 1 so the path always reaches `end`.
    pub fn new(start: Point, end: Point, steps: u32) -> Self {
        Self {
            start,
            end,
            steps: steps.max(1),
            next: 1,
        }
    }

    fn lerp(from: i32, to: i32, i: u32, steps: u32) -> i32 {
        let (from, to, i, steps) = (i64::from(from), i64::from(to), i64::from(i), i64::from(steps));
        ((from * steps + (to - from) * i) / steps) as i32
    }
}

impl Iterator for DragPath {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.next > self.steps {
            return None;
        }
        let i = self.next;
        self.next += 1;
        Some(Point::new(
            Self::lerp(self.start.x, self.end.x, i, self.steps),
            Self::lerp(self.start.y, self.end.y, i, self.steps),
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.steps.saturating_add(1).saturating_sub(self.next) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for DragPath {}

/// Pointer use case.
#[derive(Clone)]
pub struct PointerService {
    screens: ScreenService,
    emulator: Arc<dyn PlatformInputEmulator>,
}

impl PointerService {
    pub fn new(screens: ScreenService, emulator: Arc<dyn PlatformInputEmulator>) -> Self {
        Self { screens, emulator }
    }

    // ── Position ──────────────────────────────────────────────────────────

    /// Current pointer position relative to `screen` (global for `None`).
    ///
    /// The result can be negative or past the screen's size when the
    /// pointer is on another monitor.
    pub fn get_position(&self, screen: Option<usize>) -> Result<Point> {
        let global = self.global_position()?;
        let frame = self.screens.resolve_screen(screen)?;
        Ok(global_to_local(&frame, global))
    }

    fn global_position(&self) -> Result<Point> {
        self.emulator
            .cursor_position()
            .map_err(|e| AutomationError::injection("read the pointer position", e))
    }

    /// Moves to `(x, y)` local to `screen`.
    pub fn move_to(&self, x: i32, y: i32, screen: Option<usize>) -> Result<()> {
        let target = self.to_global(x, y, screen)?;
        self.move_global(target)
    }

    /// Moves by `(dx, dy)` from the current position.
    pub fn move_relative(&self, dx: i32, dy: i32) -> Result<()> {
        let target = self.global_position()?.offset(dx, dy);
        self.move_global(target)
    }

    fn to_global(&self, x: i32, y: i32, screen: Option<usize>) -> Result<Point> {
        let frame = self.screens.resolve_screen(screen)?;
        let global = local_to_global(&frame, Point::new(x, y));
        debug!(local = %Point::new(x, y), %global, ?screen, "pointer target resolved");
        Ok(global)
    }

    fn move_global(&self, p: Point) -> Result<()> {
        self.emulator.emit_mouse_move(p.x, p.y).map_err(|e| match e {
            EmulationError::OutOfBounds { x, y } => AutomationError::PositionOutOfBounds { x, y },
            other => AutomationError::injection(format!("move the pointer to {p}"), other),
        })
    }

    // ── Buttons ───────────────────────────────────────────────────────────

    /// Presses `button` without releasing it.
    pub fn mouse_down(&self, button: MouseButton) -> Result<()> {
        self.emulator
            .emit_mouse_button(button, true)
            .map_err(|e| AutomationError::injection(format!("press the {button} button"), e))
    }

    /// Releases `button`.
    pub fn mouse_up(&self, button: MouseButton) -> Result<()> {
        self.emulator
            .emit_mouse_button(button, false)
            .map_err(|e| AutomationError::injection(format!("release the {button} button"), e))
    }

    /// Clicks `count` times, first moving to `at` (local to `screen`) if given.
    pub fn click(&self, button: MouseButton, count: u32, at: Option<Point>, screen: Option<usize>) -> Result<()> {
        if let Some(p) = at {
            self.move_to(p.x, p.y, screen)?;
        }
        for _ in 0..count {
            self.mouse_down(button)?;
            self.mouse_up(button)?;
        }
        Ok(())
    }

    pub fn double_click(&self, button: MouseButton, at: Option<Point>, screen: Option<usize>) -> Result<()> {
        self.click(button, 2, at, screen)
    }

    pub fn right_click(&self, at: Option<Point>, screen: Option<usize>) -> Result<()> {
        self.click(MouseButton::Right, 1, at, screen)
    }

    pub fn middle_click(&self, at: Option<Point>, screen: Option<usize>) -> Result<()> {
        self.click(MouseButton::Middle, 1, at, screen)
    }

    /// Moves to `(x, y)` on `screen`, then clicks once.
    pub fn click_at(&self, x: i32, y: i32, button: MouseButton, screen: Option<usize>) -> Result<()> {
        self.click(button, 1, Some(Point::new(x, y)), screen)
    }

    pub fn double_click_at(&self, x: i32, y: i32, button: MouseButton, screen: Option<usize>) -> Result<()> {
        self.click(button, 2, Some(Point::new(x, y)), screen)
    }

    pub fn right_click_at(&self, x: i32, y: i32, screen: Option<usize>) -> Result<()> {
        self.click(MouseButton::Right, 1, Some(Point::new(x, y)), screen)
    }

    // ── Drag ──────────────────────────────────────────────────────────────

    /// Drags from the current position to `(x, y)` local to `screen`.
    ///
    /// The target is resolved before the button goes down, so an invalid
    /// screen fails with no side effect.
    pub fn drag_to(&self, x: i32, y: i32, options: DragOptions, screen: Option<usize>) -> Result<()> {
        let target = self.to_global(x, y, screen)?;
        let start = self.global_position()?;
        self.drag_global(start, target, options)
    }

    /// Drags by `(dx, dy)` from the current position.
    pub fn drag_relative(&self, dx: i32, dy: i32, options: DragOptions) -> Result<()> {
        let start = self.global_position()?;
        self.drag_global(start, start.offset(dx, dy), options)
    }

    fn drag_global(&self, start: Point, target: Point, options: DragOptions) -> Result<()> {
        debug!(%start, %target, ?options, "drag");
        self.mouse_down(options.button)?;

        let moved = self.drag_moves(start, target, options);
        let released = self.mouse_up(options.button);

        match (moved, released) {
            (Err(e), Err(release_err)) => {
                warn!(error = %release_err, "button release after failed drag also failed");
                Err(e)
            }
            (Err(e), Ok(())) => Err(e),
            (Ok(()), released) => released,
        }
    }

    fn drag_moves(&self, start: Point, target: Point, options: DragOptions) -> Result<()> {
        if !options.is_paced() {
            return self.move_global(target);
        }
        let pause = options.duration / options.steps;
        for p in DragPath::new(start, target, options.steps) {
            self.move_global(p)?;
            thread::sleep(pause);
        }
        Ok(())
    }

    // ── Scroll ────────────────────────────────────────────────────────────

    /// Scrolls vertically then horizontally; zero axes are skipped.
    pub fn scroll(&self, dx: i32, dy: i32) -> Result<()> {
        if dy != 0 {
            self.emulator
                .emit_mouse_scroll(0, dy)
                .map_err(|e| AutomationError::injection("scroll vertically", e))?;
        }
        if dx != 0 {
            self.emulator
                .emit_mouse_scroll(dx, 0)
                .map_err(|e| AutomationError::injection("scroll horizontally", e))?;
        }
        Ok(())
    }

    pub fn scroll_up(&self, amount: i32) -> Result<()> {
        self.scroll(0, amount)
    }

    pub fn scroll_down(&self, amount: i32) -> Result<()> {
        self.scroll(0, amount.saturating_neg())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::emulate_input::MockPlatformInputEmulator;
    use crate::application::screens::MockPlatformScreenEnumerator;
    use deskpilot_core::{RawMonitor, ScreenError};
    use mockall::predicate::eq;
    use mockall::Sequence;
    use proptest::prelude::*;

    fn dual_screens() -> ScreenService {
        let mut mock = MockPlatformScreenEnumerator::new();
        mock.expect_enumerate_monitors().returning(|| {
            Ok(vec![
                RawMonitor::new("DP-1", 0, 0, 1920, 1080).primary(),
                RawMonitor::new("HDMI-1", 1920, 0, 1280, 1024),
            ])
        });
        ScreenService::new(Arc::new(mock))
    }

    fn service(emulator: MockPlatformInputEmulator) -> PointerService {
        PointerService::new(dual_screens(), Arc::new(emulator))
    }

    // ── DragPath ──────────────────────────────────────────────────────────

    #[test]
    fn test_drag_path_visits_evenly_spaced_points() {
        let path: Vec<Point> = DragPath::new(Point::new(0, 0), Point::new(100, 40), 4).collect();
        assert_eq!(
            path,
            vec![Point::new(25, 10), Point::new(50, 20), Point::new(75, 30), Point::new(100, 40)]
        );
    }

    #[test]
    fn test_drag_path_truncates_toward_zero() {
        let path: Vec<Point> = DragPath::new(Point::new(-10, 0), Point::new(-5, 0), 2).collect();
        assert_eq!(path, vec![Point::new(-7, 0), Point::new(-5, 0)]);
    }

    #[test]
    fn test_drag_path_is_one_shot() {
        let mut path = DragPath::new(Point::new(0, 0), Point::new(10, 10), 2);
        assert_eq!(path.len(), 2);
        assert_eq!(path.by_ref().count(), 2);
        assert_eq!(path.next(), None);
    }

    #[test]
    fn test_drag_path_with_zero_steps_still_reaches_end() {
        let path: Vec<Point> = DragPath::new(Point::new(0, 0), Point::new(7, 7), 0).collect();
        assert_eq!(path, vec![Point::new(7, 7)]);
    }

    proptest! {
        #[test]
        fn prop_drag_path_ends_on_target(
            sx in -5000i32..5000, sy in -5000i32..5000,
            ex in -5000i32..5000, ey in -5000i32..5000,
            steps in 1u32..64,
        ) {
            let path: Vec<Point> = DragPath::new(Point::new(sx, sy), Point::new(ex, ey), steps).collect();
            prop_assert_eq!(path.len(), steps as usize);
            prop_assert_eq!(path.last().copied(), Some(Point::new(ex, ey)));
        }
    }

    // ── Moves ─────────────────────────────────────────────────────────────

    #[test]
    fn test_move_to_screen_1_origin_is_global_1920_0() {
        let mut em = MockPlatformInputEmulator::new();
        em.expect_emit_mouse_move().with(eq(1920), eq(0)).times(1).returning(|_, _| Ok(()));
        service(em).move_to(0, 0, Some(1)).unwrap();
    }

    #[test]
    fn test_move_to_invalid_screen_injects_nothing() {
        let mut em = MockPlatformInputEmulator::new();
        em.expect_emit_mouse_move().never();
        let err = service(em).move_to(0, 0, Some(5)).unwrap_err();
        assert!(matches!(err, AutomationError::Screen(ScreenError::InvalidScreenIndex { .. })));
    }

    #[test]
    fn test_move_relative_adds_delta_to_current_position() {
        let mut em = MockPlatformInputEmulator::new();
        em.expect_cursor_position().returning(|| Ok(Point::new(2000, 500)));
        em.expect_emit_mouse_move().with(eq(1990), eq(530)).times(1).returning(|_, _| Ok(()));
        service(em).move_relative(-10, 30).unwrap();
    }

    #[test]
    fn test_platform_out_of_bounds_becomes_position_out_of_bounds() {
        let mut em = MockPlatformInputEmulator::new();
        em.expect_emit_mouse_move()
            .returning(|x, y| Err(EmulationError::OutOfBounds { x, y }));
        let err = service(em).move_to(5000, 0, Some(0)).unwrap_err();
        assert!(matches!(err, AutomationError::PositionOutOfBounds { x: 5000, y: 0 }));
    }

    #[test]
    fn test_position_is_reported_local_to_requested_screen() {
        let mut em = MockPlatformInputEmulator::new();
        em.expect_cursor_position().returning(|| Ok(Point::new(2420, 300)));
        let svc = service(em);
        assert_eq!(svc.get_position(Some(1)).unwrap(), Point::new(500, 300));
        assert_eq!(svc.get_position(Some(0)).unwrap(), Point::new(2420, 300));
        assert_eq!(svc.get_position(None).unwrap(), Point::new(2420, 300));
    }

    // ── Clicks ────────────────────────────────────────────────────────────

    #[test]
    fn test_click_at_moves_then_presses_and_releases() {
        // Arrange
        let mut seq = Sequence::new();
        let mut em = MockPlatformInputEmulator::new();
        em.expect_emit_mouse_move()
            .with(eq(2020), eq(10))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        em.expect_emit_mouse_button()
            .with(eq(MouseButton::Left), eq(true))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        em.expect_emit_mouse_button()
            .with(eq(MouseButton::Left), eq(false))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        // Act / Assert
        service(em).click_at(100, 10, MouseButton::Left, Some(1)).unwrap();
    }

    #[test]
    fn test_double_click_without_position_does_not_move() {
        let mut em = MockPlatformInputEmulator::new();
        em.expect_emit_mouse_move().never();
        em.expect_emit_mouse_button().times(4).returning(|_, _| Ok(()));
        service(em).double_click(MouseButton::Left, None, Some(0)).unwrap();
    }

    #[test]
    fn test_button_failure_is_input_injection_failed() {
        let mut em = MockPlatformInputEmulator::new();
        em.expect_emit_mouse_button()
            .returning(|_, _| Err(EmulationError::Platform("XTestFakeButtonEvent failed".into())));
        let err = service(em).right_click(None, Some(0)).unwrap_err();
        assert!(matches!(err, AutomationError::InputInjectionFailed { ref action, .. } if action.contains("right")));
    }

    // ── Drag ──────────────────────────────────────────────────────────────

    #[test]
    fn test_unpaced_drag_jumps_to_target() {
        let mut seq = Sequence::new();
        let mut em = MockPlatformInputEmulator::new();
        em.expect_cursor_position().returning(|| Ok(Point::new(100, 100)));
        em.expect_emit_mouse_button()
            .with(eq(MouseButton::Left), eq(true))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        em.expect_emit_mouse_move()
            .with(eq(300), eq(300))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        em.expect_emit_mouse_button()
            .with(eq(MouseButton::Left), eq(false))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        service(em).drag_to(300, 300, DragOptions::default(), Some(0)).unwrap();
    }

    #[test]
    fn test_paced_drag_emits_one_move_per_step() {
        let mut em = MockPlatformInputEmulator::new();
        em.expect_cursor_position().returning(|| Ok(Point::new(0, 0)));
        em.expect_emit_mouse_button().times(2).returning(|_, _| Ok(()));
        em.expect_emit_mouse_move().times(5).returning(|_, _| Ok(()));

        let options = DragOptions::default()
            .with_duration(Duration::from_millis(5))
            .with_steps(5);
        service(em).drag_relative(50, 50, options).unwrap();
    }

    #[test]
    fn test_failed_drag_move_still_releases_button() {
        // Arrange
        let mut em = MockPlatformInputEmulator::new();
        em.expect_cursor_position().returning(|| Ok(Point::new(0, 0)));
        em.expect_emit_mouse_button()
            .with(eq(MouseButton::Right), eq(true))
            .times(1)
            .returning(|_, _| Ok(()));
        em.expect_emit_mouse_move()
            .returning(|_, _| Err(EmulationError::Platform("display gone".into())));
        em.expect_emit_mouse_button()
            .with(eq(MouseButton::Right), eq(false))
            .times(1)
            .returning(|_, _| Ok(()));

        // Act
        let err = service(em)
            .drag_to(10, 10, DragOptions::default().with_button(MouseButton::Right), Some(0))
            .unwrap_err();

        // Assert
        assert!(matches!(err, AutomationError::InputInjectionFailed { .. }));
    }

    #[test]
    fn test_drag_to_invalid_screen_never_presses_button() {
        let mut em = MockPlatformInputEmulator::new();
        em.expect_emit_mouse_button().never();
        let err = service(em).drag_to(0, 0, DragOptions::default(), Some(9)).unwrap_err();
        assert!(matches!(err, AutomationError::Screen(ScreenError::InvalidScreenIndex { .. })));
    }

    // ── Scroll ────────────────────────────────────────────────────────────

    #[test]
    fn test_scroll_emits_vertical_before_horizontal() {
        let mut seq = Sequence::new();
        let mut em = MockPlatformInputEmulator::new();
        em.expect_emit_mouse_scroll()
            .with(eq(0), eq(-2))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        em.expect_emit_mouse_scroll()
            .with(eq(4), eq(0))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        service(em).scroll(4, -2).unwrap();
    }

    #[test]
    fn test_scroll_down_is_negative_vertical() {
        let mut em = MockPlatformInputEmulator::new();
        em.expect_emit_mouse_scroll()
            .with(eq(0), eq(-DEFAULT_SCROLL_AMOUNT))
            .times(1)
            .returning(|_, _| Ok(()));
        service(em).scroll_down(DEFAULT_SCROLL_AMOUNT).unwrap();
    }

    #[test]
    fn test_scroll_down_by_minimum_amount_saturates() {
        let mut em = MockPlatformInputEmulator::new();
        em.expect_emit_mouse_scroll()
            .with(eq(0), eq(i32::MAX))
            .times(1)
            .returning(|_, _| Ok(()));
        service(em).scroll_down(i32::MIN).unwrap();
    }
}

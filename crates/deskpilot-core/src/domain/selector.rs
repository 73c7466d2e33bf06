//! Public screen numbering and its mapping onto raw enumeration indices.
//!
//! Callers number screens the convenient way: `0` is always the primary
//! monitor, `1`, `2`, ... are the remaining monitors in enumeration order,
//! and `None` means the whole virtual desktop. The registry itself only
//! knows raw indices. This module is the single place where the two meet.
//!
//! # Example (for beginners)
//!
//! The OS enumerates `[HDMI (1280x1024), DP (1920x1080, primary), DVI]`:
//!
//! | public screen | raw index | monitor |
//! |---|---|---|
//! | `Some(0)` | 1 | DP (primary) |
//! | `Some(1)` | 0 | HDMI |
//! | `Some(2)` | 2 | DVI |
//! | `None` | - | bounding box of all three |

use crate::domain::error::ScreenError;
use crate::domain::snapshot::ScreenSnapshot;
use serde::{Deserialize, Serialize};

/// Explicit choice of frame, converted once from the public screen number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScreenSelector {
    /// The monitor the OS designates primary.
    Primary,
    /// A raw enumeration index within the current snapshot.
    Index(usize),
    /// The whole virtual desktop.
    AllCombined,
}

/// Public screen number -> raw index table for `snapshot`.
///
/// Entry `0` is the primary's raw index; entry `k` is the raw index of the
/// k-th non-primary monitor in enumeration order.
pub fn screen_table(snapshot: &ScreenSnapshot) -> Vec<usize> {
    let primary = snapshot.primary_index();
    std::iter::once(primary)
        .chain((0..snapshot.len()).filter(|&i| i != primary))
        .collect()
}

/// Converts a public screen number into a [`ScreenSelector`].
///
/// # Errors
///
/// [`ScreenError::InvalidScreenIndex`] when `screen` is past the last monitor.
pub fn remap_screen(snapshot: &ScreenSnapshot, screen: Option<usize>) -> Result<ScreenSelector, ScreenError> {
    match screen {
        None => Ok(ScreenSelector::AllCombined),
        Some(0) => Ok(ScreenSelector::Primary),
        Some(k) => screen_table(snapshot)
            .get(k)
            .map(|&raw| ScreenSelector::Index(raw))
            .ok_or(ScreenError::InvalidScreenIndex {
                requested: k,
                available: snapshot.len(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::monitor::RawMonitor;

    fn snapshot(primary_at: usize, count: usize) -> ScreenSnapshot {
        let raw = (0..count)
            .map(|i| {
                let m = RawMonitor::new(format!("m{i}"), i as i32 * 1000, 0, 1000, 800);
                if i == primary_at {
                    m.primary()
                } else {
                    m
                }
            })
            .collect();
        ScreenSnapshot::from_raw(raw).unwrap()
    }

    /// (primary raw index, monitor count, public screen, expected selector)
    const REMAP_CASES: &[(usize, usize, Option<usize>, Option<ScreenSelector>)] = &[
        (0, 1, None, Some(ScreenSelector::AllCombined)),
        (0, 1, Some(0), Some(ScreenSelector::Primary)),
        (0, 1, Some(1), None),
        (0, 2, Some(1), Some(ScreenSelector::Index(1))),
        (0, 2, Some(2), None),
        (1, 2, Some(0), Some(ScreenSelector::Primary)),
        (1, 2, Some(1), Some(ScreenSelector::Index(0))),
        (1, 3, Some(1), Some(ScreenSelector::Index(0))),
        (1, 3, Some(2), Some(ScreenSelector::Index(2))),
        (1, 3, Some(3), None),
        (2, 3, Some(1), Some(ScreenSelector::Index(0))),
        (2, 3, Some(2), Some(ScreenSelector::Index(1))),
        (2, 3, None, Some(ScreenSelector::AllCombined)),
    ];

    #[test]
    fn test_remap_table_cases() {
        for &(primary, count, screen, expected) in REMAP_CASES {
            // Arrange
            let snap = snapshot(primary, count);

            // Act
            let result = remap_screen(&snap, screen);

            // Assert
            match expected {
                Some(selector) => assert_eq!(
                    result,
                    Ok(selector),
                    "primary={primary} count={count} screen={screen:?}"
                ),
                None => assert_eq!(
                    result,
                    Err(ScreenError::InvalidScreenIndex {
                        requested: screen.unwrap_or_default(),
                        available: count
                    }),
                    "primary={primary} count={count} screen={screen:?}"
                ),
            }
        }
    }

    #[test]
    fn test_screen_table_is_a_permutation_of_raw_indices() {
        let snap = snapshot(2, 4);
        let mut table = screen_table(&snap);
        assert_eq!(table[0], 2);
        table.sort_unstable();
        assert_eq!(table, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_remapped_screen_resolves_to_expected_monitor() {
        let snap = snapshot(1, 3);
        let frame = snap.resolve_screen(Some(2)).unwrap();
        assert_eq!(frame.monitor().map(|m| m.name()), Some("m2"));
    }
}

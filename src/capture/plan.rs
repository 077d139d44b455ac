//! Scroll-plan computation.
//!
//! The stitching engine covers the document with the minimal ordered
//! sequence of viewport-sized tiles. The plan starts at the top, steps
//! by one viewport height, and clamps the final position so the last
//! tile never scrolls past the document end.

// ============================================================================
// Scroll Plan
// ============================================================================

/// Computes the ordered scroll positions covering the full document.
///
/// Yields `ceil(document_height / viewport_height)` positions: 0,
/// `viewport_height`, `2 × viewport_height`, …, with the last clamped
/// to `document_height − viewport_height`. Positions are non-decreasing.
///
/// Callers handle the single-tile case (`document_height` not greater
/// than `viewport_height`) before planning.
#[must_use]
pub(crate) fn scroll_positions(document_height: u32, viewport_height: u32) -> Vec<u32> {
    debug_assert!(viewport_height > 0);
    debug_assert!(document_height > viewport_height);

    let count = document_height.div_ceil(viewport_height);
    let max = document_height - viewport_height;

    (0..count).map(|i| (i * viewport_height).min(max)).collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn test_even_division_has_no_clamp() {
        assert_eq!(scroll_positions(1000, 500), vec![0, 500]);
        assert_eq!(scroll_positions(1500, 500), vec![0, 500, 1000]);
    }

    #[test]
    fn test_remainder_clamps_last_position() {
        assert_eq!(scroll_positions(1300, 500), vec![0, 500, 800]);
        assert_eq!(scroll_positions(501, 500), vec![0, 1]);
    }

    #[test]
    fn test_count_is_ceil() {
        assert_eq!(scroll_positions(1300, 500).len(), 3);
        assert_eq!(scroll_positions(1001, 500).len(), 3);
        assert_eq!(scroll_positions(999, 500).len(), 2);
    }

    proptest! {
        #[test]
        fn prop_positions_are_non_decreasing(
            viewport_height in 1u32..=2000,
            extra in 1u32..=50_000,
        ) {
            let document_height = viewport_height + extra;
            let positions = scroll_positions(document_height, viewport_height);

            for pair in positions.windows(2) {
                prop_assert!(pair[0] <= pair[1]);
            }
        }

        #[test]
        fn prop_last_position_never_overscrolls(
            viewport_height in 1u32..=2000,
            extra in 1u32..=50_000,
        ) {
            let document_height = viewport_height + extra;
            let positions = scroll_positions(document_height, viewport_height);

            prop_assert_eq!(
                *positions.last().unwrap(),
                document_height - viewport_height
            );
        }

        #[test]
        fn prop_count_matches_ceil(
            viewport_height in 1u32..=2000,
            extra in 1u32..=50_000,
        ) {
            let document_height = viewport_height + extra;
            let positions = scroll_positions(document_height, viewport_height);

            prop_assert_eq!(
                positions.len() as u32,
                document_height.div_ceil(viewport_height)
            );
        }

        #[test]
        fn prop_tiles_cover_every_row(
            viewport_height in 1u32..=2000,
            extra in 1u32..=50_000,
        ) {
            let document_height = viewport_height + extra;
            let positions = scroll_positions(document_height, viewport_height);

            // Consecutive tiles leave no uncovered gap between them.
            for pair in positions.windows(2) {
                prop_assert!(pair[1] <= pair[0] + viewport_height);
            }
            prop_assert_eq!(positions[0], 0);
            prop_assert_eq!(
                *positions.last().unwrap() + viewport_height,
                document_height
            );
        }
    }
}

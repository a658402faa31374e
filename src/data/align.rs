//! Six-minute cadence filtering.
//!
//! CO-OPS reports on a six-minute grid, but responses can contain off-grid or
//! duplicate entries. Only samples whose epoch lands exactly on the grid are kept.

/// Sampling cadence of the retained rows, in seconds.
pub const CADENCE_SECS: i64 = 360;

/// `true` for every timestamp on the six-minute grid.
pub fn alignment_mask(timestamps: &[i64]) -> Vec<bool> {
    timestamps
        .iter()
        .map(|ts| ts.rem_euclid(CADENCE_SECS) == 0)
        .collect()
}

/// Keep the items whose mask entry is `true`.
///
/// # Panics
/// Panics if `items` and `mask` differ in length.
pub fn apply_mask<T: Copy>(items: &[T], mask: &[bool]) -> Vec<T> {
    assert_eq!(items.len(), mask.len(), "mask length must match item count");
    items
        .iter()
        .zip(mask)
        .filter_map(|(item, keep)| keep.then_some(*item))
        .collect()
}

/// Row indices selected by `mask`.
pub fn kept_indices(mask: &[bool]) -> Vec<usize> {
    mask.iter()
        .enumerate()
        .filter_map(|(idx, keep)| keep.then_some(idx))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_selects_exact_multiples() {
        let ts = [0, 60, 360, 361, 720, -360, -359, 1_325_376_000];
        assert_eq!(
            alignment_mask(&ts),
            vec![true, false, true, false, true, true, false, true]
        );
    }

    #[test]
    fn masking_is_idempotent() {
        let ts: Vec<i64> = (0..50).map(|i| i * 90).collect();
        let once = apply_mask(&ts, &alignment_mask(&ts));
        let twice = apply_mask(&once, &alignment_mask(&once));
        assert_eq!(once, twice);
        assert!(once.iter().all(|t| t % CADENCE_SECS == 0));
        assert_eq!(once.len(), ts.iter().filter(|t| *t % 360 == 0).count());
    }

    #[test]
    fn kept_indices_follow_mask() {
        assert_eq!(kept_indices(&[false, true, true, false, true]), vec![1, 2, 4]);
        assert!(kept_indices(&[]).is_empty());
    }
}

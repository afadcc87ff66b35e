//! Index-clamping array moves used when reordering item lists.
//!
//! Out-of-range indices are clamped instead of rejected, so a stale index
//! coming from a pointer handler can never panic or change a length.

/// Moves the element at `from` to `to`, shifting everything in between by
/// one slot. Both indices are clamped to the slice.
pub fn move_in_array<T>(array: &mut [T], from: usize, to: usize) {
    let Some(last) = array.len().checked_sub(1) else {
        return;
    };
    let from = from.min(last);
    let to = to.min(last);

    if from < to {
        array[from..=to].rotate_left(1);
    } else if from > to {
        array[to..=from].rotate_right(1);
    }
}

/// Removes the element at `current_index` from `source` and inserts it into
/// `target` at `target_index`. `target_index` may equal `target.len()`.
pub fn transfer_item<T>(
    source: &mut Vec<T>,
    target: &mut Vec<T>,
    current_index: usize,
    target_index: usize,
) {
    let Some(last) = source.len().checked_sub(1) else {
        return;
    };
    let from = current_index.min(last);
    let to = target_index.min(target.len());
    target.insert(to, source.remove(from));
}

/// Like [`transfer_item`] but leaves `source` untouched.
pub fn copy_item<T: Clone>(
    source: &[T],
    target: &mut Vec<T>,
    current_index: usize,
    target_index: usize,
) {
    let Some(last) = source.len().checked_sub(1) else {
        return;
    };
    let to = target_index.min(target.len());
    target.insert(to, source[current_index.min(last)].clone());
}

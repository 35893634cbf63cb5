use rand::Rng;

/// Picks the next catalog index, never repeating `current` when there is a choice.
pub fn pick_index<R: Rng + ?Sized>(len: usize, current: usize, rng: &mut R) -> usize {
    if len < 2 {
        return 0;
    }
    let draw = rng.random_range(0..len);
    resolve_draw(len, current, draw)
}

/// Maps a uniform draw in `[0, len)` to the index to display.
///
/// A draw that lands on `current` is shifted to the next index (wrapping)
/// instead of being re-rolled, so every other index stays reachable in one draw.
pub fn resolve_draw(len: usize, current: usize, draw: usize) -> usize {
    if len < 2 {
        return 0;
    }
    let idx = draw % len;
    if idx == current {
        (idx + 1) % len
    } else {
        idx
    }
}

//! Next/previous index rules.
//!
//! Sequential mode steps by one and wraps at both ends. Shuffle mode draws a
//! uniformly random index for either direction, with no history: the current
//! or the previous track may come up again.

use rand::Rng;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Map any raw index onto `[0, len)` using a Euclidean modulo.
///
/// Returns `None` only when `len == 0`.
pub fn wrap_index(raw: i64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(raw.rem_euclid(len as i64) as usize)
}

/// Index to move to from `current` in a sequence of `len` tracks.
pub fn step<R: Rng + ?Sized>(
    current: usize,
    len: usize,
    shuffle: bool,
    direction: Direction,
    rng: &mut R,
) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let raw = if shuffle {
        rng.gen_range(0..len) as i64
    } else {
        match direction {
            Direction::Next => current as i64 + 1,
            Direction::Previous => current as i64 - 1,
        }
    };
    wrap_index(raw, len)
}

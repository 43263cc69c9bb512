pub const fn wrap_decrement(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    if index == 0 {
        len - 1
    } else {
        index - 1
    }
}

pub const fn wrap_increment(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    (index + 1) % len
}

/// Move a table cursor by `delta` rows, clamped to `0..len`.
pub const fn step_clamped(index: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    let target = index.saturating_add_signed(delta);
    if target >= len {
        len - 1
    } else {
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapping_handles_empty_and_edges() {
        assert_eq!(wrap_increment(0, 0), 0);
        assert_eq!(wrap_decrement(0, 0), 0);
        assert_eq!(wrap_increment(2, 3), 0);
        assert_eq!(wrap_decrement(0, 3), 2);
    }

    #[test]
    fn clamped_steps_stay_in_range() {
        assert_eq!(step_clamped(0, -1, 4), 0);
        assert_eq!(step_clamped(2, 5, 4), 3);
        assert_eq!(step_clamped(3, -5, 10), 0);
        assert_eq!(step_clamped(1, 1, 0), 0);
    }
}

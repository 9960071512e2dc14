//! Index stepping for roving focus.
//!
//! Menus clamp at both ends; segmented sets and navigation bars may wrap.
//! The policy is always passed explicitly.

/// What happens when a step would leave `[0, len)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Wrap {
    #[default]
    Clamp,
    Loop,
}

/// Moves `delta` steps from `current` inside a list of `len` entries.
///
/// `None` as `current` stands for "nothing focused" and behaves like index
/// `-1`. Returns `None` only for an empty list.
pub fn step(current: Option<usize>, delta: isize, len: usize, wrap: Wrap) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let len = len as isize;
    let from = current.map_or(-1, |c| c as isize);
    let next = match wrap {
        Wrap::Clamp => (from + delta).clamp(0, len - 1),
        Wrap::Loop => {
            // From "nothing", moving backwards lands on the last entry.
            let from = if current.is_none() && delta < 0 { len } else { from };
            (from + delta).rem_euclid(len)
        }
    };
    Some(next as usize)
}

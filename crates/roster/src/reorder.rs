//! Move-up / move-down reordering for ordered lists.
//!
//! Fest guidelines and prizes are shown in a curated order that organizers
//! adjust one step at a time. Moving past either end is a no-op.

use std::fmt;

use tracing::debug;

use crate::error::{Error, Result};

/// Direction to move an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the front of the list.
    Up,
    /// Towards the back of the list.
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}

/// Swap the item at `index` with its neighbour in `direction`.
///
/// Returns `Ok(false)` when the item is already at that end of the list.
///
/// # Errors
///
/// Returns [`Error::PositionOutOfRange`] if `index` is not in the list.
pub fn move_item<T>(items: &mut [T], index: usize, direction: Direction) -> Result<bool> {
    let len = items.len();
    if index >= len {
        return Err(Error::PositionOutOfRange { index, len });
    }

    let target = match direction {
        Direction::Up if index == 0 => None,
        Direction::Up => Some(index - 1),
        Direction::Down if index + 1 == len => None,
        Direction::Down => Some(index + 1),
    };

    match target {
        Some(target) => {
            items.swap(index, target);
            debug!(from = index, to = target, "Moved list item");
            Ok(true)
        }
        None => {
            debug!(index, %direction, "Item already at end of list");
            Ok(false)
        }
    }
}

/// Shorthand for [`move_item`] with [`Direction::Up`].
///
/// # Errors
///
/// Returns [`Error::PositionOutOfRange`] if `index` is not in the list.
pub fn move_up<T>(items: &mut [T], index: usize) -> Result<bool> {
    move_item(items, index, Direction::Up)
}

/// Shorthand for [`move_item`] with [`Direction::Down`].
///
/// # Errors
///
/// Returns [`Error::PositionOutOfRange`] if `index` is not in the list.
pub fn move_down<T>(items: &mut [T], index: usize) -> Result<bool> {
    move_item(items, index, Direction::Down)
}

//! Boundary-violation errors.
//!
//! A missing element is never an error: lookups report it through `bool`
//! or `Option`. These types only describe indices and destinations that
//! break an operation's precondition.

use core::fmt;

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Index outside `[0, len)`.
    #[error("index out of bounds: the len is {len} but the index is {index}")]
    OutOfBounds { index: usize, len: usize },

    /// Insertion index outside `[0, len]`.
    #[error("insertion index (is {index}) should be <= len (is {len})")]
    InsertOutOfBounds { index: usize, len: usize },

    /// `copy_to` would write past the end of the destination.
    #[error(
        "destination too small: copying {len} elements at offset {offset} into a slice of length {available}"
    )]
    DestinationTooSmall {
        offset: usize,
        len: usize,
        available: usize,
    },
}

/// A rejected insertion, handing the item back to the caller.
#[derive(Error, PartialEq, Eq)]
#[error("{error}")]
pub struct InsertError<T> {
    pub item: T,
    #[source]
    pub error: Error,
}

impl<T> InsertError<T> {
    pub fn into_item(self) -> T {
        self.item
    }
}

// Manual Debug to avoid a `T: Debug` bound.
impl<T> fmt::Debug for InsertError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsertError")
            .field("item", &core::any::type_name::<T>())
            .field("error", &self.error)
            .finish()
    }
}

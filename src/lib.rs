//! Selene collections: a growable list with in-place element handles.
//!
//! # Overview
//!
//! [`RefList<T>`] is a contiguous, growable sequence whose indexer hands out
//! `&mut T` straight into the backing buffer. Mutating through the handle
//! changes the stored element; nothing is copied out and written back.
//!
//! ```
//! use selene_collections::RefList;
//!
//! #[derive(Debug, PartialEq)]
//! struct Particle {
//!     x: f32,
//!     hits: u32,
//! }
//!
//! let mut particles = RefList::new();
//! particles.add(Particle { x: 0.0, hits: 0 });
//! particles.add(Particle { x: 1.0, hits: 0 });
//!
//! let p = &mut particles[1];
//! p.x += 0.5;
//! p.hits += 1;
//!
//! assert_eq!(particles[1], Particle { x: 1.5, hits: 1 });
//! ```
//!
//! # Handles and structural mutation
//!
//! `add`, `insert`, `remove_at`, `remove` and `clear` may move or drop
//! elements. All of them take `&mut self`, so the borrow checker rejects any
//! handle or iterator that would outlive one of these calls.
//!
//! # Growth
//!
//! | Event | Capacity |
//! |-------|----------|
//! | `RefList::new()` | 0 (no allocation) |
//! | first element | [`INITIAL_CAPACITY`] |
//! | full buffer | doubled |
//! | `remove_at` / `clear` | unchanged |
//!
//! # Errors
//!
//! Out-of-range indices and undersized `copy_to` destinations are programmer
//! errors: the plain methods panic with an [`Error`] message, and the `try_`
//! variants return it. A missing element is not an error; `remove`,
//! `contains` and `index_of` report it through `bool` and `Option`.

#![no_std]
#![allow(unsafe_code)]

extern crate alloc;

pub mod error;
pub mod iter;
mod raw;
mod ref_list;

pub use error::{Error, InsertError};
pub use iter::IntoIter;
pub use raw::INITIAL_CAPACITY;
pub use ref_list::RefList;

static_assertions::assert_eq_size!(RefList<u64>, [usize; 3]);
static_assertions::assert_eq_size!(RefList<()>, [usize; 3]);
static_assertions::assert_impl_all!(RefList<u64>: Send, Sync);
static_assertions::assert_not_impl_any!(RefList<alloc::rc::Rc<u64>>: Send, Sync);

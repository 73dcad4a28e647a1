//! Hierarchical arena pools addressed through CRT fingers.
//!
//! An [`Arena`] owns a fixed block of cells and a tree of pools over it.
//! The root pool covers every cell. Any active pool can be carved into a
//! child that occupies some of its free slots, not necessarily contiguous.
//! Each child stores a single [`Finger`](fingerpool_modular::Finger)
//! instead of an index array: `finger mod moduli[i]` is the parent slot of
//! local index `i`.
//!
//! # Architecture
//!
//! ```text
//! Arena<T>
//! ├── cells: Vec<Option<T>>          (physical storage, root only)
//! ├── SharedModulusTable             (built once, Arc-shared by every pool)
//! └── pool table: (generation, Option<PoolRecord>) addressed by PoolId
//!     ├── root:  Backing::Raw,         identity finger
//!     └── child: Backing::Parent(id),  finger over the parent's slots
//! ```
//!
//! Released slots go on a free list and are reused with a bumped
//! generation; a stale [`PoolId`] fails the generation check.
//!
//! Access walks the parent chain, so lookups cost O(depth). Parents are
//! referenced by [`PoolId`], never owned, and a pool with active children
//! cannot be released (see [`Arena::release_cascade`] for subtree
//! teardown).
//!
//! The arena is single-threaded. Hosts that share one across threads must
//! serialise `carve`/`release` themselves.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod config;
pub mod error;
pub mod handle;
pub mod iter;
mod pool;
pub mod render;

// Public re-exports for the primary API surface.
pub use arena::Arena;
pub use config::ArenaConfig;
pub use error::PoolError;
pub use handle::{PoolId, PoolState};
pub use iter::Cells;
pub use render::render;

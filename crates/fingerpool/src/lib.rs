//! Fingerpool: a hierarchical arena allocator whose sub-pools are addressed
//! by a single Chinese Remainder Theorem "finger" each.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the fingerpool sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use fingerpool::prelude::*;
//!
//! let mut arena: Arena<&str> = Arena::with_capacity(10).unwrap();
//! let root = arena.root();
//!
//! let a = arena.carve(root, 2).unwrap();
//! let b = arena.carve(root, 3).unwrap();
//! arena.set(b, 0, "hello").unwrap();
//!
//! // b's first slot is root slot 2.
//! assert_eq!(arena.get(root, 2).unwrap(), Some(&"hello"));
//!
//! arena.release(a).unwrap();
//! assert_eq!(arena.free(root).unwrap(), 7);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`modular`] | `fingerpool-modular` | Miller-Rabin, modulus tables, CRT, fingers |
//! | [`arena`] | `fingerpool-arena` | `Arena`, pool handles, errors, renderer |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Number theory behind pool addressing.
pub mod modular {
    pub use fingerpool_modular::*;
}

/// Arena storage and pool lifecycle.
pub mod arena {
    pub use fingerpool_arena::*;
}

/// Commonly used types.
pub mod prelude {
    pub use fingerpool_arena::{Arena, ArenaConfig, PoolError, PoolId, PoolState};
    pub use fingerpool_modular::{Finger, ModulusError, ModulusTable};
}

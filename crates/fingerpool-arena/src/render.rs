//! Fixed-width text dump of a pool, for inspection only.
//!
//! ```text
//! finger: 3564097275952
//! [a][a][b][b][b][c][c][c][c] d
//! ```
//!
//! Line one is the pool's finger. Line two has one column per local index,
//! all padded to the widest value. Slots carved out to a child are
//! bracketed; free slots are padded with spaces. Empty cells are blank.

use std::fmt::Display;

use crate::arena::Arena;
use crate::error::PoolError;
use crate::handle::PoolId;

/// Render `pool` as two lines of text.
pub fn render<T: Display>(arena: &Arena<T>, pool: PoolId) -> Result<String, PoolError> {
    let finger = arena.finger(pool)?;
    let values = arena
        .iter(pool)?
        .map(|cell| cell.map(ToString::to_string).unwrap_or_default())
        .collect::<Vec<_>>();
    let width = values.iter().map(|v| v.chars().count()).max().unwrap_or(0);

    let mut out = format!("finger: {finger}\n");
    for (i, value) in values.iter().enumerate() {
        let (open, close) = if arena.is_used(pool, i)? {
            ('[', ']')
        } else {
            (' ', ' ')
        };
        out.push(open);
        out.push_str(&format!("{value:<width$}"));
        out.push(close);
    }
    Ok(out)
}

//! Footprint container and merge machinery
//!
//! # Submodules
//! - `footprint` - validated polygon value type with `grow`
//! - `collection` - ordered footprint sequence
//! - `uniter` - set-based transitive merge engine
//! - `iteration` - one grow-and-remerge step

mod collection;
mod footprint;
mod iteration;
mod uniter;

pub use collection::Collection;
pub use footprint::Footprint;
pub use iteration::Iteration;
pub use uniter::Uniter;

//! External collaborators: the directory list source and the presence source.
//!
//! Both are read-only HTTP query interfaces, abstracted behind traits so the
//! engine can be driven by in-memory fakes in tests. The HTTP implementations
//! validate payload shapes at the boundary; nothing untyped flows inward.

mod directory;
mod presence;

pub use directory::*;
pub use presence::*;

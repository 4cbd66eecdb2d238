//! Domain types.

mod region;
mod release;
mod tracked;

pub use region::{Environment, Region};
pub use release::Release;
pub use tracked::{TrackedFile, TrackedFiles};

//! Integration test common infrastructure.
//!
//! Provides a fake hub that accepts the pseudoserver's link and a helper
//! spawning the `pseudolink` binary against it.

pub mod hub;
pub mod process;

#[allow(unused_imports)]
pub use hub::TestHub;
#[allow(unused_imports)]
pub use process::{TestLink, write_config};

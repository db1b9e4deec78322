//! Sync Module - the server link.
//!
//! Connects to the remote server, introduces the pseudoserver, bursts the
//! bot and its channels, then serves inbound lines until the link ends.

pub mod burst;
pub mod handshake;
pub mod link;
pub mod stream;
pub mod tls;


pub use link::Link;
pub use stream::LinkStream;

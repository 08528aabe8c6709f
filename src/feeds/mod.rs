//! RSS Feeds
//!
//! Built-in and custom sources fetched through a feed-to-JSON service.

mod aggregate;
mod client;
mod preview;

pub use aggregate::*;
pub use client::*;
pub use preview::*;

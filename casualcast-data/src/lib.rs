#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![deny(unused_results)]
#![deny(unreachable_pub)]
#![deny(missing_debug_implementations)]
#![deny(rust_2018_idioms)]
#![deny(bad_style)]
#![deny(unused)]
#![deny(clippy::pedantic)]

mod error;
/// Episode lookup by id
pub mod locator;
/// The feed and episode models used by casualcast
pub mod models;
/// Turning feed items into episodes
pub mod projector;

pub use error::FeedError;
pub use models::{AudioDescriptor, Enclosure, Episode, FeedSnapshot, PlayerDescriptor, RawFeedItem};
pub use projector::{Projector, Variant};

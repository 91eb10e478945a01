//! Fetching and parsing of the two public CSV feeds: certified premises
//! (positional columns) and health facilities (header-driven).

pub mod client;
pub mod error;
pub mod parse;

pub use client::FeedClient;
pub use error::FeedError;
pub use parse::{parse_facilities, parse_premises};

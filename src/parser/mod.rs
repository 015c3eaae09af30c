//! Text format parsing and serialization.

mod map;

pub use map::{format_map, parse_map};

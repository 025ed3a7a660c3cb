//! Media module for record representation and payload normalization.

pub mod item;
pub mod parser;

pub use item::{MediaKind, MediaRecord};
pub use parser::{parse_element, parse_snap_media, PayloadShape};

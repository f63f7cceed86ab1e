//! Utility modules.

pub mod text;

pub use text::truncate_chars;

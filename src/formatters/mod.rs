//! Presentation of recommendation outcomes for front ends

pub mod text;
pub mod json;

pub use text::TextFormatter;
pub use json::JsonFormatter;

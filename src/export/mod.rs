//! Output of host records.
//!
//! This module provides:
//! - Text and JSON formatting of [`HostRecord`](crate::models::HostRecord)s
//! - An [`Emitter`] that streams records as they are produced, or collects
//!   them and writes a single batch when input ends

mod emitter;
mod format;

// Re-export public API
pub use emitter::Emitter;
pub use format::{format_json_array, format_json_line, format_text, format_text_batch};

//! Small formatting helpers shared by the adapters.

mod format;

pub use format::format_bytes;

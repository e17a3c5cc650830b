//! Grid placement and multi-screen layout engine for desktop icons.

pub mod layout;
pub mod utils;

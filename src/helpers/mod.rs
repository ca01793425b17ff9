//! Helper functions for the view layer

mod date;
mod html;

pub use date::*;
pub use html::*;

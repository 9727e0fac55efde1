//! JASC palette parsing
//!
//! ```text
//! JASC-PAL
//! 0100
//! 256
//! 0 0 0
//! ...
//! ```
pub mod error;
mod parser;
mod types;
mod writer;

pub use types::*;

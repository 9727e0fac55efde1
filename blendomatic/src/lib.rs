//! Terrain blending masks
//!
//! ```text
//! Header
//!     mode_count: u32
//!     tile_count: u32
//! BlendingMode[mode_count]
//!     tile_size: u32
//!     tile_flags: [u8; tile_count]
//!     tile_bits: [u32; tile_size]
//!     tile_alpha: [[u8; tile_size]; tile_count]
//! ```
pub mod error;
mod parser;
mod types;

pub use parser::parse_blendomatic;
pub use types::*;

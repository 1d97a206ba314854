#![forbid(unsafe_code)]

//! # `vocs`: Voxel primitives
//!
//! The small, format independent pieces shared by the save format crates:
//!
//!  * `u4` and the two-per-byte nibble layout used for block data and light
//!  * Positions within a 16x16x16 cube, a 16x16 layer, and on the global column grid
//!  * `SharedWorld`, a sparse column store that many threads can fill and read at once

// Efficient and fine-grained spin locks
extern crate spin;

// Fast hash map
extern crate rustc_hash;

/// Bulk nibble storage and packing between one value per byte and two values per byte.
pub mod nibbles;

pub mod position;

pub mod world;

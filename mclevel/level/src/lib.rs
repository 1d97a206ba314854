//! Whole save folders: the chunk index of each dimension, the region files it is stored in, and
//! `level.dat`.

#[macro_use]
extern crate log;

pub mod anvil;
pub mod folder;
pub mod info;

mod error;
mod properties;
mod world;

pub use self::error::{Error, Result};
pub use self::folder::{Level, LevelFolder};
pub use self::info::LevelInfo;
pub use self::properties::{SaveOptions, WorldProperties};
pub use self::world::World;

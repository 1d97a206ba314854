mod shared;

pub use self::shared::{SharedWorld, Handle};

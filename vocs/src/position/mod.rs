mod cube;
mod layer;
mod column;

pub use self::cube::CubePosition;
pub use self::layer::LayerPosition;
pub use self::column::{ColumnPosition, RegionPosition};

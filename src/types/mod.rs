//! Basic value types shared by the geometry kernel and the DXF layer

pub mod color;
pub mod handle;
pub mod vector;
pub mod version;

pub use color::Color;
pub use handle::Handle;
pub use vector::{normalize_angle, Vector2, Vector3};
pub use version::DxfVersion;

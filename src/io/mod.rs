//! I/O module for reading and writing drawings as ASCII DXF

pub mod dxf;

pub use dxf::{DxfReader, DxfReaderConfiguration, DxfWriter};

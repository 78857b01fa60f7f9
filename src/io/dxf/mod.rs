//! DXF (Drawing Exchange Format) reading and writing

mod code_page;
mod reader;
mod writer;

pub use code_page::{document_encoding, encoding_from_code_page};
pub use reader::{DxfCodePair, DxfReader, DxfReaderConfiguration, DxfStreamReader, DxfTextReader};
pub use writer::{DxfStreamWriter, DxfStreamWriterExt, DxfTextWriter, DxfWriter, SectionWriter};

//! ASCII DXF writer

use super::stream_writer::DxfStreamWriter;
use crate::error::Result;
use crate::types::Handle;
use encoding_rs::Encoding;
use std::io::Write;

/// ASCII DXF stream writer
pub struct DxfTextWriter<W: Write> {
    writer: W,
    /// Code page for pre-2007 drawings; `None` writes UTF-8
    encoding: Option<&'static Encoding>,
}

impl<W: Write> DxfTextWriter<W> {
    /// Create a new ASCII DXF writer producing UTF-8
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            encoding: None,
        }
    }

    /// Create a writer that encodes text in the drawing's code page
    pub fn with_encoding(writer: W, encoding: Option<&'static Encoding>) -> Self {
        Self { writer, encoding }
    }

    /// Write a DXF code with proper formatting (right-aligned in 3-character field)
    fn write_code(&mut self, code: i32) -> Result<()> {
        writeln!(self.writer, "{:>3}", code)?;
        Ok(())
    }

    fn write_value(&mut self, value: &str) -> Result<()> {
        match self.encoding {
            Some(enc) if enc != encoding_rs::UTF_8 => {
                let (bytes, _, _) = enc.encode(value);
                self.writer.write_all(&bytes)?;
            }
            _ => self.writer.write_all(value.as_bytes())?,
        }
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Get the inner writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Shortest text that parses back to exactly `value`, with at least one
/// decimal place
pub fn format_double(value: f64) -> String {
    if value.is_finite() && value == value.trunc() {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

impl<W: Write> DxfStreamWriter for DxfTextWriter<W> {
    fn write_string(&mut self, code: i32, value: &str) -> Result<()> {
        self.write_code(code)?;
        self.write_value(value)
    }

    fn write_i16(&mut self, code: i32, value: i16) -> Result<()> {
        self.write_code(code)?;
        writeln!(self.writer, "{:>6}", value)?;
        Ok(())
    }

    fn write_double(&mut self, code: i32, value: f64) -> Result<()> {
        self.write_code(code)?;
        writeln!(self.writer, "{}", format_double(value))?;
        Ok(())
    }

    fn write_handle(&mut self, code: i32, handle: Handle) -> Result<()> {
        self.write_code(code)?;
        writeln!(self.writer, "{:X}", handle.value())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::stream_writer::DxfStreamWriterExt;
    use super::*;
    use crate::types::Vector3;

    fn written(f: impl FnOnce(&mut DxfTextWriter<&mut Vec<u8>>)) -> String {
        let mut buf = Vec::new();
        {
            let mut writer = DxfTextWriter::new(&mut buf);
            f(&mut writer);
        }
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_string() {
        assert_eq!(written(|w| w.write_string(0, "LINE").unwrap()), "  0\nLINE\n");
    }

    #[test]
    fn test_write_code_formatting() {
        let output = written(|w| {
            w.write_i16(5, 100).unwrap();
            w.write_i16(62, 7).unwrap();
            w.write_string(100, "AcDbLine").unwrap();
        });
        assert_eq!(output, "  5\n   100\n 62\n     7\n100\nAcDbLine\n");
    }

    #[test]
    fn test_write_point3d() {
        let output = written(|w| w.write_point3d(11, Vector3::new(1.0, 2.5, 0.0)).unwrap());
        assert_eq!(output, " 11\n1.0\n 21\n2.5\n 31\n0.0\n");
    }

    #[test]
    fn test_doubles_round_trip_exactly() {
        for value in [0.1 + 0.2, 1.0 / 3.0, -7.25, 1e-9, 123456789.123, 9.0 - std::f64::consts::FRAC_1_SQRT_2] {
            let text = format_double(value);
            assert_eq!(text.parse::<f64>().unwrap(), value, "{}", text);
        }
        assert_eq!(format_double(5.0), "5.0");
        assert_eq!(format_double(-0.0), "-0.0");
    }

    #[test]
    fn test_write_handle() {
        assert!(written(|w| w.write_handle(5, Handle::new(255)).unwrap()).ends_with("FF\n"));
    }

    #[test]
    fn test_code_page_encoding() {
        let mut buf = Vec::new();
        {
            let mut writer = DxfTextWriter::with_encoding(&mut buf, Some(encoding_rs::WINDOWS_1252));
            writer.write_string(1, "90°").unwrap();
        }
        assert_eq!(buf, b"  1\n90\xB0\n");
    }
}

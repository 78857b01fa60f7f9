//! `$DWGCODEPAGE` handling for pre-2007 drawings.
//!
//! Drawings older than AC1021 store text in the code page named by the
//! header. The same encoding is used to decode lines that are not valid UTF-8
//! and to encode text when the drawing is written back.

use crate::types::DxfVersion;
use encoding_rs::Encoding;

/// Get the `encoding_rs` encoding for a DXF code page string.
///
/// Returns `None` if the encoding is UTF-8 or plain ASCII. Unrecognized names
/// fall back to Windows-1252, the most common code page in DXF files.
pub fn encoding_from_code_page(code_page: &str) -> Option<&'static Encoding> {
    match code_page.trim().to_ascii_lowercase().as_str() {
        "gb2312" | "ansi_936" => Some(encoding_rs::GBK),
        "big5" | "ansi_950" => Some(encoding_rs::BIG5),
        "korean" | "ansi_949" | "johab" => Some(encoding_rs::EUC_KR),
        "ansi_932" => Some(encoding_rs::SHIFT_JIS),

        "dos855" | "dos866" => Some(encoding_rs::IBM866),
        "dos852" => Some(encoding_rs::WINDOWS_1250),
        "dos857" => Some(encoding_rs::WINDOWS_1254),
        "dos869" => Some(encoding_rs::WINDOWS_1253),

        "ansi_874" => Some(encoding_rs::WINDOWS_874),
        "ansi_1250" => Some(encoding_rs::WINDOWS_1250),
        "ansi_1251" => Some(encoding_rs::WINDOWS_1251),
        "ansi_1252" => Some(encoding_rs::WINDOWS_1252),
        "ansi_1253" => Some(encoding_rs::WINDOWS_1253),
        "ansi_1254" => Some(encoding_rs::WINDOWS_1254),
        "ansi_1255" => Some(encoding_rs::WINDOWS_1255),
        "ansi_1256" => Some(encoding_rs::WINDOWS_1256),
        "ansi_1257" => Some(encoding_rs::WINDOWS_1257),
        "ansi_1258" => Some(encoding_rs::WINDOWS_1258),

        "iso8859-1" | "iso_8859-1" => Some(encoding_rs::WINDOWS_1252),
        "iso8859-2" | "iso_8859-2" => Some(encoding_rs::ISO_8859_2),
        "iso8859-3" | "iso_8859-3" => Some(encoding_rs::ISO_8859_3),
        "iso8859-4" | "iso_8859-4" => Some(encoding_rs::ISO_8859_4),
        "iso8859-5" | "iso_8859-5" => Some(encoding_rs::ISO_8859_5),
        "iso8859-6" | "iso_8859-6" => Some(encoding_rs::ISO_8859_6),
        "iso8859-7" | "iso_8859-7" => Some(encoding_rs::ISO_8859_7),
        "iso8859-8" | "iso_8859-8" => Some(encoding_rs::ISO_8859_8),
        "iso8859-9" | "iso_8859-9" => Some(encoding_rs::WINDOWS_1254),
        "iso8859-10" | "iso_8859-10" => Some(encoding_rs::ISO_8859_10),
        "iso8859-13" | "iso_8859-13" => Some(encoding_rs::ISO_8859_13),
        "iso8859-14" | "iso_8859-14" => Some(encoding_rs::ISO_8859_14),
        "iso8859-15" | "iso_8859-15" => Some(encoding_rs::ISO_8859_15),
        "koi8-r" => Some(encoding_rs::KOI8_R),

        "ascii" | "utf-8" | "utf8" | "unicode" => None,

        _ => Some(encoding_rs::WINDOWS_1252),
    }
}

/// Encoding a drawing's text is stored in
///
/// `None` means UTF-8: AC1021 and later always are, and so are drawings whose
/// version could not be determined.
pub fn document_encoding(version: DxfVersion, code_page: Option<&str>) -> Option<&'static Encoding> {
    if version == DxfVersion::Unknown || version.is_unicode() {
        return None;
    }
    match code_page {
        Some(cp) => encoding_from_code_page(cp),
        None => Some(encoding_rs::WINDOWS_1252),
    }
}

//! Encoding and delimiter detection for CSV input.

use encoding_rs::WINDOWS_1252;

use crate::error::{IngestError, Result};

/// Delimiters considered, in tie-break order.
const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Decode raw bytes into text.
///
/// UTF-8 (with or without BOM) is used when valid; anything else is read as
/// Windows-1252, the usual encoding of spreadsheet CSV exports. UTF-16 BOMs are
/// rejected.
pub fn decode_text(bytes: &[u8], origin: &str) -> Result<String> {
    if bytes.len() >= 2 {
        if bytes[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                origin: origin.to_string(),
                encoding: "UTF-16 LE",
            });
        }
        if bytes[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                origin: origin.to_string(),
                encoding: "UTF-16 BE",
            });
        }
    }

    let body = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
    match std::str::from_utf8(body) {
        Ok(text) => Ok(text.to_string()),
        Err(_) => {
            tracing::debug!(origin, "input is not UTF-8, decoding as Windows-1252");
            let (text, _, _) = WINDOWS_1252.decode(body);
            Ok(text.into_owned())
        }
    }
}

/// Pick the delimiter that occurs most often outside quotes on the header line.
///
/// Falls back to `,` when no candidate occurs.
pub fn detect_delimiter(text: &str) -> u8 {
    let header = text
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or_default();

    let mut counts = [0usize; CANDIDATE_DELIMITERS.len()];
    let mut in_quotes = false;
    for byte in header.bytes() {
        if byte == b'"' {
            in_quotes = !in_quotes;
            continue;
        }
        if in_quotes {
            continue;
        }
        if let Some(pos) = CANDIDATE_DELIMITERS.iter().position(|d| *d == byte) {
            counts[pos] += 1;
        }
    }

    let mut best = 0;
    for (pos, count) in counts.iter().enumerate() {
        if *count > counts[best] {
            best = pos;
        }
    }
    CANDIDATE_DELIMITERS[best]
}

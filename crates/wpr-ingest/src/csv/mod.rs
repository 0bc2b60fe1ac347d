//! CSV reading utilities.

mod reader;
mod sniff;

pub use reader::{read_csv_bytes, read_csv_file};
pub use sniff::{decode_text, detect_delimiter};

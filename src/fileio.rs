//! fileio.rs
//!
//! Reading the extracted report text and writing results. Both assume
//! UTF-8.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

/// Strips a leading UTF-8 byte order mark, which some text extractors emit.
fn strip_bom(content: String) -> String {
    if content.starts_with('\u{FEFF}') {
        content.trim_start_matches('\u{FEFF}').to_string()
    } else {
        content
    }
}

/// Reads the whole report text from `filename`.
///
/// Unlike a line reader this keeps line breaks untouched: the section and
/// block splitters work on the text as one string.
///
/// ```no_run
/// use checkin_resumen::fileio::read_report_text;
///
/// # fn main() -> std::io::Result<()> {
/// let text = read_report_text("reporte-2024-03-10.txt")?;
/// println!("{} chars", text.chars().count());
/// # Ok(())
/// # }
/// ```
pub fn read_report_text<P: AsRef<Path>>(filename: P) -> io::Result<String> {
    let content = fs::read_to_string(filename)?;
    Ok(strip_bom(content))
}

/// Reads the whole report text from any reader (stdin for the CLI).
pub fn read_report_from<R: Read>(mut reader: R) -> io::Result<String> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    Ok(strip_bom(content))
}

/// Writes `contents` to `filename`, creating or truncating it.
pub fn write_text<P: AsRef<Path>>(filename: P, contents: &str) -> io::Result<()> {
    let mut file = fs::File::create(filename)?;
    file.write_all(contents.as_bytes())?;
    Ok(())
}

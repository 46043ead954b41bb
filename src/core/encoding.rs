//! N-Triples line encoding for emitted triples

use oxigraph::model::Triple;
use std::io::Write;

/// Encode a triple as one N-Triples statement, without the trailing newline.
/// Literal text is escaped by the `Literal` display implementation.
pub fn ntriples_line(triple: &Triple) -> String {
    format!("{} .", triple)
}

/// Write a triple followed by a newline
pub fn write_ntriples_line<W: Write>(writer: &mut W, triple: &Triple) -> std::io::Result<()> {
    writeln!(writer, "{} .", triple)
}

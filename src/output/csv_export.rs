//! CSV export of collected quotes
//!
//! The file layout is fixed: a `Quote,Author` header followed by one row
//! per quote, quoted per RFC 4180 only where a field needs it.

use crate::crawler::Quote;
use crate::ExportError;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Header row written before any quote
pub const CSV_HEADER: [&str; 2] = ["Quote", "Author"];

/// Writes quotes to `path` as CSV
///
/// The file is created or truncated. Quotes are written in the order given.
/// The buffer is flushed explicitly so a failing disk surfaces as an error
/// instead of being swallowed when the writer drops; the file itself is
/// closed when it goes out of scope on every path.
///
/// # Arguments
///
/// * `path` - Destination file
/// * `quotes` - Quotes in collection order
///
/// # Returns
///
/// * `Ok(())` - Header and every row reached the file
/// * `Err(ExportError)` - Creating, writing, or flushing failed
pub fn export_csv(path: impl AsRef<Path>, quotes: &[Quote]) -> Result<(), ExportError> {
    let path = path.as_ref();
    let path_str = path.display().to_string();

    let file = File::create(path).map_err(|source| ExportError::Create {
        path: path_str.clone(),
        source,
    })?;

    let mut writer = write_quotes(file, quotes).map_err(|source| ExportError::Write {
        path: path_str.clone(),
        source,
    })?;

    writer.flush().map_err(|source| ExportError::Flush {
        path: path_str.clone(),
        source,
    })?;

    tracing::info!("Wrote {} quotes to {}", quotes.len(), path_str);
    Ok(())
}

/// Writes the header and quote rows to any sink
///
/// Returns the CSV writer so the caller decides how to flush it.
pub fn write_quotes<W: Write>(sink: W, quotes: &[Quote]) -> Result<csv::Writer<W>, csv::Error> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(sink);

    writer.write_record(CSV_HEADER)?;
    for quote in quotes {
        writer.write_record([quote.text(), quote.author()])?;
    }

    Ok(writer)
}

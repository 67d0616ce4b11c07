//! CSV and XLSX export of a set's terms.

use rust_xlsxwriter::Workbook;

use crate::error::{ImportError, Result};
use crate::types::Term;

/// Worksheet name used by [`export_xlsx`].
pub const XLSX_SHEET_NAME: &str = "Vocabulary";

/// Column headers written by [`export_csv`] and [`export_xlsx`].
pub const EXPORT_HEADERS: [&str; 5] = ["Word", "Part of Speech", "Meaning", "Pronunciation", "Example"];

/// Write terms as CSV with [`EXPORT_HEADERS`]; missing fields are empty.
pub fn export_csv(terms: &[Term]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_HEADERS)?;

    for term in terms {
        writer.write_record([
            term.word.as_str(),
            term.part_of_speech.as_deref().unwrap_or(""),
            term.meaning.as_str(),
            term.pronunciation.as_deref().unwrap_or(""),
            term.example.as_deref().unwrap_or(""),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ImportError::Csv(e.into_error().into()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write terms as a single-sheet XLSX workbook with [`EXPORT_HEADERS`].
///
/// Missing optional fields are left as empty cells.
pub fn export_xlsx(terms: &[Term]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(XLSX_SHEET_NAME)?;

    for (col, header) in (0u16..).zip(EXPORT_HEADERS) {
        sheet.write_string(0, col, header)?;
    }

    for (row, term) in (1u32..).zip(terms) {
        let cells = [
            Some(term.word.as_str()),
            term.part_of_speech.as_deref(),
            Some(term.meaning.as_str()),
            term.pronunciation.as_deref(),
            term.example.as_deref(),
        ];
        for (col, cell) in (0u16..).zip(cells) {
            if let Some(value) = cell {
                sheet.write_string(row, col, value)?;
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

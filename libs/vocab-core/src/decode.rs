//! Spreadsheet bytes to rows.
//!
//! XLSX workbooks are recognized by their zip signature and read from the
//! first worksheet. Anything else is treated as CSV, whose text encoding is
//! guessed by trying candidates in priority order until one both decodes
//! strictly and yields at least one data row.

use std::borrow::Cow;
use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use encoding_rs::{UTF_8, WINDOWS_1252, WINDOWS_1258};

use crate::error::{ImportError, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Local file header signature that starts every XLSX (zip) file.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Text encodings tried, in order, when decoding uploaded bytes.
///
/// The Windows code pages reject bytes the code page leaves undefined.
/// encoding_rs maps those to C1 control characters, so a decode containing
/// U+0080..=U+009F counts as a failure and the next candidate is tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8 with a leading byte-order mark stripped.
    Utf8Sig,
    Utf8,
    /// Vietnamese legacy code page.
    Windows1258,
    Windows1252,
    Latin1,
}

impl TextEncoding {
    pub const PRIORITY: [TextEncoding; 5] = [
        TextEncoding::Utf8Sig,
        TextEncoding::Utf8,
        TextEncoding::Windows1258,
        TextEncoding::Windows1252,
        TextEncoding::Latin1,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Utf8Sig => "utf-8-sig",
            Self::Utf8 => "utf-8",
            Self::Windows1258 => "windows-1258",
            Self::Windows1252 => "windows-1252",
            Self::Latin1 => "iso-8859-1",
        }
    }

    /// Strict decode; `None` if the bytes are not valid in this encoding.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        match self {
            Self::Utf8Sig => {
                let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                UTF_8.decode_without_bom_handling_and_without_replacement(body)
            }
            Self::Utf8 => UTF_8.decode_without_bom_handling_and_without_replacement(bytes),
            Self::Windows1258 => {
                WINDOWS_1258
                    .decode_without_bom_handling_and_without_replacement(bytes)
                    .filter(|text| !has_c1_controls(text))
            }
            Self::Windows1252 => {
                WINDOWS_1252
                    .decode_without_bom_handling_and_without_replacement(bytes)
                    .filter(|text| !has_c1_controls(text))
            }
            // Every byte is its own code point.
            Self::Latin1 => Some(Cow::Owned(bytes.iter().map(|&b| b as char).collect())),
        }
    }
}

fn has_c1_controls(text: &str) -> bool {
    text.chars().any(|c| ('\u{80}'..='\u{9f}').contains(&c))
}

/// Rows of a decoded spreadsheet with normalized, unique headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table from raw header and row cells.
    ///
    /// Headers are trimmed, blank ones become `c{n}` (1-based position),
    /// and repeated names get a ` (2)`, ` (3)`, ... suffix. Rows are padded
    /// or truncated to the header width.
    pub fn from_records<H, R, C>(headers: H, rows: R) -> Self
    where
        H: IntoIterator,
        H::Item: AsRef<str>,
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: Into<String>,
    {
        let headers = normalize_headers(headers);
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|row| {
                let mut cells: Vec<String> = row.into_iter().map(Into::into).take(width).collect();
                cells.resize(width, String::new());
                cells
            })
            .collect();

        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn header_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Iterate rows as ordered `(header, cell)` pairs.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |cells| Row {
            headers: &self.headers,
            cells,
        })
    }

    /// Cells of one column, in row order.
    pub fn column(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows.iter().map(move |r| r[index].as_str())
    }
}

/// Borrowed view of one table row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    headers: &'a [String],
    cells: &'a [String],
}

impl<'a> Row<'a> {
    pub fn get(&self, header: &str) -> Option<&'a str> {
        self.headers
            .iter()
            .position(|h| h == header)
            .map(|i| self.cells[i].as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.headers
            .iter()
            .zip(self.cells.iter())
            .map(|(h, c)| (h.as_str(), c.as_str()))
    }

    /// Owned cells in header order.
    pub fn to_vec(&self) -> Vec<String> {
        self.cells.to_vec()
    }
}

fn normalize_headers<H>(headers: H) -> Vec<String>
where
    H: IntoIterator,
    H::Item: AsRef<str>,
{
    let mut result: Vec<String> = Vec::new();

    for (i, header) in headers.into_iter().enumerate() {
        let trimmed = header.as_ref().trim();
        let base = if trimmed.is_empty() {
            format!("c{}", i + 1)
        } else {
            trimmed.to_string()
        };

        let mut name = base.clone();
        let mut n = 1;
        while result.contains(&name) {
            n += 1;
            name = format!("{} ({})", base, n);
        }
        result.push(name);
    }

    result
}

/// Source of rows for the column classifier.
pub trait Decoder {
    fn decode_rows(&self, bytes: &[u8]) -> Result<Table>;
}

/// CSV decoder trying [`TextEncoding::PRIORITY`] in order.
#[derive(Debug, Clone, Default)]
pub struct CsvDecoder;

impl Decoder for CsvDecoder {
    fn decode_rows(&self, bytes: &[u8]) -> Result<Table> {
        for encoding in TextEncoding::PRIORITY {
            let Some(text) = encoding.decode(bytes) else {
                tracing::debug!(encoding = encoding.name(), "bytes are not valid in encoding");
                continue;
            };
            match parse_csv(&text) {
                Some(table) => {
                    if !matches!(encoding, TextEncoding::Utf8Sig | TextEncoding::Utf8) {
                        tracing::warn!(encoding = encoding.name(), "decoded upload with legacy encoding");
                    }
                    tracing::debug!(
                        encoding = encoding.name(),
                        rows = table.len(),
                        columns = table.headers().len(),
                        "decoded csv"
                    );
                    return Ok(table);
                }
                None => {
                    tracing::debug!(encoding = encoding.name(), "csv parse produced no rows");
                }
            }
        }

        Err(ImportError::Decoding)
    }
}

/// Reader for the first worksheet of an XLSX workbook.
#[derive(Debug, Clone, Default)]
pub struct XlsxDecoder;

impl Decoder for XlsxDecoder {
    fn decode_rows(&self, bytes: &[u8]) -> Result<Table> {
        let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(Cursor::new(bytes))?;
        let range = match workbook.worksheet_range_at(0) {
            Some(range) => range?,
            None => {
                tracing::debug!("workbook has no worksheets");
                return Err(ImportError::Decoding);
            }
        };

        let mut rows = range
            .rows()
            .map(|row| row.iter().map(cell_text).collect::<Vec<String>>());
        let Some(headers) = rows.next() else {
            tracing::debug!("worksheet is empty");
            return Err(ImportError::Decoding);
        };
        let rows: Vec<Vec<String>> = rows.collect();
        if rows.is_empty() {
            tracing::debug!("worksheet has no data rows");
            return Err(ImportError::Decoding);
        }

        let table = Table::from_records(headers, rows);
        tracing::debug!(rows = table.len(), columns = table.headers().len(), "decoded xlsx");
        Ok(table)
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

/// True if `bytes` start with the zip signature used by XLSX files.
pub fn is_xlsx(bytes: &[u8]) -> bool {
    bytes.starts_with(ZIP_MAGIC)
}

/// Decode an upload, choosing XLSX or CSV from its leading bytes.
pub fn decode_rows(bytes: &[u8]) -> Result<Table> {
    if is_xlsx(bytes) {
        XlsxDecoder.decode_rows(bytes)
    } else {
        CsvDecoder.decode_rows(bytes)
    }
}

fn parse_csv(text: &str) -> Option<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers().ok()?.iter().map(str::to_string).collect();
    if headers.is_empty() {
        return None;
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.ok()?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }
    if rows.is_empty() {
        return None;
    }

    Some(Table::from_records(headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_utf8_with_bom() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice("Từ vựng,Nghĩa\nhello,xin chào\n".as_bytes());

        let table = decode_rows(&bytes).unwrap();
        assert_eq!(table.headers(), &["Từ vựng".to_string(), "Nghĩa".to_string()]);
        let row = table.rows().next().unwrap();
        assert_eq!(row.get("Nghĩa"), Some("xin chào"));
    }

    #[test]
    fn falls_back_to_legacy_encoding() {
        // 0xE9 alone is invalid UTF-8; Windows-1258 reads it as "é".
        let bytes = b"word,meaning\ncaf\xE9,coffee shop\n";
        let table = decode_rows(bytes).unwrap();
        let row = table.rows().next().unwrap();
        assert_eq!(row.get("word"), Some("café"));
        assert_eq!(row.get("meaning"), Some("coffee shop"));
    }

    #[test]
    fn byte_undefined_in_1258_falls_through_to_1252() {
        // 0x8A has no Windows-1258 mapping; Windows-1252 reads it as "Š".
        assert!(TextEncoding::Windows1258.decode(b"\x8Aa").is_none());
        let table = decode_rows(b"word,meaning\n\x8Akoda,car\n").unwrap();
        assert_eq!(table.rows().next().unwrap().get("word"), Some("\u{160}koda"));
    }

    #[test]
    fn byte_undefined_in_both_code_pages_falls_through_to_latin1() {
        assert!(TextEncoding::Windows1252.decode(b"\x81").is_none());
        let table = decode_rows(b"word,meaning\nx\x81y,z\n").unwrap();
        assert_eq!(table.rows().next().unwrap().get("word"), Some("x\u{81}y"));
    }

    fn workbook(rows: &[&[&str]]) -> Vec<u8> {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if !cell.is_empty() {
                    sheet.write_string(r as u32, c as u16, *cell).unwrap();
                }
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn reads_first_worksheet_of_xlsx() {
        let bytes = workbook(&[
            &["Từ vựng", "", "Nghĩa"],
            &["hello", "n", "xin chào"],
            &["cat", "n", "con mèo"],
        ]);
        assert!(is_xlsx(&bytes));

        let table = decode_rows(&bytes).unwrap();
        assert_eq!(
            table.headers(),
            &["Từ vựng".to_string(), "c2".to_string(), "Nghĩa".to_string()]
        );
        assert_eq!(table.len(), 2);
        let row = table.rows().nth(1).unwrap();
        assert_eq!(row.get("Nghĩa"), Some("con mèo"));
        assert_eq!(row.get("c2"), Some("n"));
    }

    #[test]
    fn header_only_xlsx_is_a_decoding_error() {
        let bytes = workbook(&[&["word", "meaning"]]);
        assert!(matches!(decode_rows(&bytes), Err(ImportError::Decoding)));
    }

    #[test]
    fn corrupt_xlsx_is_a_spreadsheet_error() {
        let result = decode_rows(b"PK\x03\x04not really a zip");
        assert!(matches!(result, Err(ImportError::Spreadsheet(_))));
    }

    #[test]
    fn header_only_input_is_a_decoding_error() {
        let result = decode_rows(b"word,meaning\n");
        assert!(matches!(result, Err(ImportError::Decoding)));
    }

    #[test]
    fn empty_input_is_a_decoding_error() {
        assert!(matches!(decode_rows(b""), Err(ImportError::Decoding)));
    }

    #[test]
    fn blank_and_duplicate_headers_are_renamed() {
        let table = Table::from_records(
            vec!["word", " ", "word", "word (2)"],
            vec![vec!["a", "b", "c", "d"]],
        );
        assert_eq!(
            table.headers(),
            &[
                "word".to_string(),
                "c2".to_string(),
                "word (2)".to_string(),
                "word (2) (2)".to_string(),
            ]
        );
    }

    #[test]
    fn short_rows_are_padded() {
        let table = Table::from_records(vec!["a", "b", "c"], vec![vec!["1"]]);
        let row = table.rows().next().unwrap();
        assert_eq!(row.get("c"), Some(""));
        assert_eq!(table.column(0).collect::<Vec<_>>(), vec!["1"]);
    }

    #[test]
    fn ragged_csv_rows_are_accepted() {
        let table = decode_rows(b"word,meaning,example\ncat,animal\ndog,animal,The dog barks.,extra\n")
            .unwrap();
        assert_eq!(table.len(), 2);
        let rows: Vec<_> = table.rows().map(|r| r.to_vec()).collect();
        assert_eq!(rows[0], vec!["cat", "animal", ""]);
        assert_eq!(rows[1][2], "The dog barks.");
    }
}

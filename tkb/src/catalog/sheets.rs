//! Structured records published by the spreadsheet web endpoint.
//!
//! The endpoint answers with an envelope:
//! ```json
//! { "success": true, "count": 2, "data": [ { "hocphan_id": "1001", "stt": 1, ... } ] }
//! ```
//! Cells may arrive as strings, numbers or anything else the sheet script
//! emits, so each field is read from the raw JSON object. A field of an
//! unexpected type degrades to its text rendering (or 0 for counts) instead
//! of discarding the row.

use crate::algorithm::leading_int;
use crate::error::CatalogError;
use crate::models::{section_id, CourseSection, SectionRow};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

/// False for null, `false`, zero and the empty string. Arrays and objects
/// count as set, and so does a string made of blanks.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text rendering of a cell. Strings are kept verbatim, whole numbers print
/// without a fraction, arrays join their items with commas.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (None, Some(u), _) => u.to_string(),
            (None, None, Some(f)) => f.to_string(),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(cell_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Lenient count: leading integer of the rendered text, else 0.
pub fn cell_count(value: &Value) -> u32 {
    leading_int(&cell_text(value)).unwrap_or(0)
}

/// One object-per-row record from the `data` array.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRecord {
    fields: Map<String, Value>,
}

impl SheetRecord {
    /// `None` unless `value` is a JSON object.
    pub fn from_value(value: Value) -> Option<SheetRecord> {
        match value {
            Value::Object(fields) => Some(SheetRecord { fields }),
            _ => None,
        }
    }

    /// Field text; unset and falsy fields give an empty string.
    fn text(&self, key: &str) -> String {
        match self.fields.get(key) {
            Some(v) if is_truthy(v) => cell_text(v),
            _ => String::new(),
        }
    }

    fn count(&self, key: &str) -> u32 {
        self.fields.get(key).map(cell_count).unwrap_or(0)
    }

    /// Normalized row, or `None` when `hocphan_id` is absent or the title is
    /// falsy. A present but null code is kept with an empty course code.
    /// `index` is the 0-based position in the `data` array.
    pub fn into_section(self, index: usize) -> Option<CourseSection> {
        if !self.fields.contains_key("hocphan_id") {
            return None;
        }
        if !self.fields.get("ten_hoc_phan").is_some_and(is_truthy) {
            return None;
        }
        let row = SectionRow {
            course_code: self.text("hocphan_id"),
            sequence: self.text("stt"),
            title: self.text("ten_hoc_phan"),
            capacity: self.count("si_so"),
            enrolled: self.count("da_dang_ky"),
            instructor: self.text("giang_vien"),
            schedule: self.text("thoi_khoa_bieu"),
            weeks: self.text("tuan_hoc"),
        };
        let id = section_id(&row.course_code, &row.sequence, index);
        Some(CourseSection::from_row(id, row))
    }
}

/// Response envelope of the spreadsheet endpoint.
#[derive(Debug, Deserialize)]
pub struct SheetsEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<Vec<Value>>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Normalize the `data` rows. Rows that are not objects or fail the minimum
/// requirements are skipped.
pub fn parse_records(rows: Vec<Value>) -> Vec<CourseSection> {
    let mut out = Vec::new();
    for (index, value) in rows.into_iter().enumerate() {
        let Some(record) = SheetRecord::from_value(value) else {
            debug!(index, "skipping non-object sheet row");
            continue;
        };
        match record.into_section(index) {
            Some(s) => out.push(s),
            None => debug!(index, "skipping incomplete sheet record"),
        }
    }
    out
}

/// Validate the envelope and normalize its rows.
pub fn parse_envelope(envelope: SheetsEnvelope) -> Result<Vec<CourseSection>, CatalogError> {
    match (envelope.success, envelope.data) {
        (true, Some(rows)) => {
            if let Some(n) = envelope.count {
                debug!(count = n, rows = rows.len(), "sheet envelope received");
            }
            Ok(parse_records(rows))
        }
        _ => Err(CatalogError::Rejected(
            envelope.error.unwrap_or_else(|| "invalid response from spreadsheet".to_string()),
        )),
    }
}

/// Parse a raw response body.
pub fn parse_sheets_response(body: &str) -> Result<Vec<CourseSection>, CatalogError> {
    let envelope: SheetsEnvelope = serde_json::from_str(body)?;
    parse_envelope(envelope)
}

use serde_json::Value;

use crate::model::macro_item::{Library, MacroRecord};

/// Error type for import operations
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("could not parse import payload as JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("import payload must be a JSON array")]
    NotAnArray,
}

/// Result of an import operation
#[derive(Debug)]
pub struct ImportResult {
    /// Number of records placed at the front of the library
    pub imported: usize,
    /// Ids of the imported records, in payload order (empty when absent)
    pub ids: Vec<String>,
}

/// Serialize the whole library as a pretty-printed JSON array.
pub fn export(library: &Library) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&library.records)
}

/// Parse a JSON array and prepend its elements to the library verbatim.
///
/// Only the outer shape is checked. Elements that are not complete macros
/// are kept as raw JSON; no ids are assigned and nothing is de-duplicated.
pub fn import(json: &str, library: &mut Library) -> Result<ImportResult, ImportError> {
    let parsed: Value = serde_json::from_str(json).map_err(ImportError::InvalidJson)?;
    let Value::Array(elements) = parsed else {
        return Err(ImportError::NotAnArray);
    };

    let records: Vec<MacroRecord> = elements.into_iter().map(read_record).collect();
    let ids = records
        .iter()
        .map(|r| r.id().unwrap_or_default().to_string())
        .collect();
    let imported = records.len();
    library.records.splice(0..0, records);

    Ok(ImportResult { imported, ids })
}

fn read_record(element: Value) -> MacroRecord {
    match serde_json::from_value(element.clone()) {
        Ok(item) => MacroRecord::Item(item),
        Err(_) => MacroRecord::Raw(element),
    }
}

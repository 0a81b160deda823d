//! Domain models: extracted identity details and stored records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date layouts the model has been seen to return, tried in order.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];

/// Identity details read from the front and back of a document.
///
/// Every field is optional: the model leaves out what it cannot read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentityDetails {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    /// As returned by the model, normally `YYYY-MM-DD`
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub document_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// A saved check-in record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    /// Check-in ID handed back to the user
    pub id: u64,
    pub document_number: Option<String>,
    pub full_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub address: Option<String>,
    /// Names of the images the record was read from
    pub filenames: Vec<String>,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

impl StoredRecord {
    pub fn new(id: u64, details: &IdentityDetails, filenames: Vec<String>) -> Self {
        Self {
            id,
            document_number: details.document_number.clone(),
            full_name: details.full_name.clone(),
            date_of_birth: details.date_of_birth.as_deref().and_then(parse_date),
            gender: details.gender.clone(),
            address: details.address.clone(),
            filenames,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Parse a date string from OCR output.
///
/// Returns `None` for empty input or an unknown layout.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

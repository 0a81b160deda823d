//! Prompt sent alongside the document images.

/// Instruction asking the model for the identity fields as a bare JSON object.
pub fn extraction_prompt() -> &'static str {
    r#"Extract the following from these identity document images (front and back) and return as JSON:
{
    "full_name": "string",
    "gender": "string",
    "date_of_birth": "YYYY-MM-DD",
    "document_number": "string",
    "address": "string"
}
IMPORTANT: Return ONLY the raw JSON object. Use double quotes for keys and string values."#
}

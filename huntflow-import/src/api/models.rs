//! Wire types for the Huntflow v1 API
//!
//! Response types are lenient: every field the importer does not strictly
//! need is optional so that a sparse parse result never fails deserialization.

use serde::{Deserialize, Serialize};

/// Generic `{ "items": [...] }` listing envelope
#[derive(Debug, Clone, Deserialize)]
pub struct Listing<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// An account the token has access to
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

/// A job opening (Huntflow calls it a vacancy)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Opening {
    pub id: i64,
    /// Display name, exposed by the API as `position`
    #[serde(rename = "position")]
    pub name: String,
}

/// A pipeline stage (Huntflow calls it a vacancy status)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Stage {
    pub id: i64,
    pub name: String,
}

/// Response of the resume upload call with `X-File-Parse: true`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResumeUpload {
    /// Identifier of the stored file
    pub id: i64,
    /// Free text extracted from the resume
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub photo: Option<PhotoRef>,
    #[serde(default)]
    pub fields: Option<ParsedFields>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoRef {
    pub id: i64,
}

/// Structured fields the platform parsed out of a resume
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParsedFields {
    #[serde(default)]
    pub phones: Option<Vec<String>>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub birthdate: Option<BirthDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BirthDate {
    #[serde(default)]
    pub day: Option<u32>,
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(default)]
    pub year: Option<i32>,
}

/// Source marker attached to every external resume entry
pub const EXTERNAL_AUTH_TYPE: &str = "NATIVE";

/// Body of the candidate creation call
///
/// Unknown values are serialized as `null` rather than omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidatePayload {
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub position: String,
    pub company: Option<String>,
    pub money: String,
    pub birthday_day: Option<u32>,
    pub birthday_month: Option<u32>,
    pub birthday_year: Option<i32>,
    pub photo: Option<i64>,
    pub externals: Vec<ExternalEntry>,
}

/// Resume attached to a candidate as an external source
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExternalEntry {
    pub data: ExternalData,
    pub files: Vec<FileRef>,
    pub auth_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExternalData {
    pub body: Option<String>,
}

/// Reference to a stored file by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRef {
    pub id: i64,
}

/// Response of the candidate creation call
#[derive(Debug, Clone, Deserialize)]
pub struct CandidateRecord {
    pub id: i64,
    #[serde(default)]
    pub external: Vec<FileRef>,
}

/// Body of the call that puts a candidate on an opening at a stage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkPayload {
    pub vacancy: i64,
    pub status: i64,
    pub comment: String,
    pub files: Vec<FileRef>,
}

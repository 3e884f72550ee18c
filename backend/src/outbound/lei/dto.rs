//! DTOs for decoding LEI registry responses.
//!
//! The registry answers with an array of entity records; only the legal name
//! of the first record is read.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct LeiRecordDto {
    #[serde(rename = "Entity")]
    pub(super) entity: Option<EntityDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct EntityDto {
    #[serde(rename = "LegalName")]
    pub(super) legal_name: Option<LegalNameDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct LegalNameDto {
    #[serde(rename = "$")]
    pub(super) value: Option<String>,
}

/// Why a decoded payload carried no usable name.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum MissingName {
    NoRecords,
    NoLegalName,
}

pub(super) fn first_legal_name(records: Vec<LeiRecordDto>) -> Result<String, MissingName> {
    let first = records.into_iter().next().ok_or(MissingName::NoRecords)?;
    first
        .entity
        .and_then(|entity| entity.legal_name)
        .and_then(|name| name.value)
        .ok_or(MissingName::NoLegalName)
}

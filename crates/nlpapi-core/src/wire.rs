//! Records exactly as the backend API sends them (snake_case keys).
//!
//! Optional keys decode to `None` whether they are missing or `null`, and
//! `None` is never written back out.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::{CollectionId, DeepDiveResult, DocumentId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiUserResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiStatResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_count: Option<u64>,
    pub fields: BTreeMap<String, BTreeMap<String, Option<u64>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiHitMeta {
    pub date: String,
    pub doc_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso3: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Vec<String>>,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSearchHit {
    pub base: String,
    pub doc_id: DocumentId,
    pub main_id: String,
    pub meta: ApiHitMeta,
    pub score: f64,
    pub snippets: Vec<String>,
    pub url: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSearchResult {
    pub hits: Vec<ApiSearchHit>,
    pub status: String,
}

/// `deep_dive` is the id of the collection the document belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiDocumentObj {
    pub id: DocumentId,
    pub main_id: String,
    pub deep_dive: CollectionId,
    pub verify_key: String,
    pub deep_dive_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_valid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deep_dive_result: Option<DeepDiveResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiCollectionResponse {
    pub collection_id: CollectionId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiDocumentResponse {
    pub document_ids: Vec<DocumentId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiDocumentListResponse {
    pub documents: Vec<ApiDocumentObj>,
}

/// Decode a wire payload. Shape errors surface here, never in the normalizer.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(bytes)?)
}

pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
    decode(&bytes)
}

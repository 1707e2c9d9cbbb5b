//! Domain types consumed by application logic and views.
//!
//! These are the camelCase counterparts of the records in [`crate::wire`].
//! Every optional field stays optional; `None` is omitted when serialized.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

pub type CollectionId = i64;
pub type DocumentId = i64;

/// Reserved selection meaning "no collection" or "create a new one".
pub const NO_COLLECTION: CollectionId = -1;

/// Analytical pipeline a collection runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeepDiveKind {
    #[default]
    CircularEconomy,
}

impl DeepDiveKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DeepDiveKind::CircularEconomy => "circular_economy",
        }
    }
}

impl fmt::Display for DeepDiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeepDiveKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "circular_economy" => Ok(DeepDiveKind::CircularEconomy),
            other => Err(Error::UnknownDeepDive(other.to_string())),
        }
    }
}

/// A named group of documents. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: CollectionId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionListResponse {
    pub collections: Vec<Collection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

/// Facet field -> facet value -> count. `None` means "not computed", which
/// is not the same as zero.
pub type FacetCounts = BTreeMap<String, BTreeMap<String, Option<u64>>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    pub fields: FacetCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HitMeta {
    pub date: String,
    pub doc_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso3: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Vec<String>>,
    pub status: String,
}

/// One search hit. `score` is higher-is-better with no fixed bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub base: String,
    pub doc_id: DocumentId,
    pub main_id: String,
    pub meta: HitMeta,
    pub score: f64,
    pub snippets: Vec<String>,
    pub url: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub hits: Vec<SearchHit>,
    pub status: String,
}

/// Scores of a finished deep dive. Shared verbatim by wire and domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeepDiveResult {
    pub reason: String,
    pub cultural: f64,
    pub economic: f64,
    pub educational: f64,
    pub institutional: f64,
    pub legal: f64,
    pub political: f64,
    pub technological: f64,
}

/// A document submitted to a collection for verification and deep dive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentObj {
    pub id: DocumentId,
    pub main_id: String,
    pub collection_id: CollectionId,
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
#[serde(rename_all = "camelCase")]
pub struct CollectionResponse {
    pub collection_id: CollectionId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResponse {
    pub document_ids: Vec<DocumentId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentListResponse {
    pub documents: Vec<DocumentObj>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulltextResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

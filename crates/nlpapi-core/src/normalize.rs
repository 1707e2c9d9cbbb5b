//! Wire -> domain mapping.
//!
//! Every mapping is a pure key rename: no defaults are filled in, nothing is
//! dropped, containers keep their order. Inputs are borrowed, so a caller's
//! wire record is never touched.

use crate::types::{
    CollectionResponse, DocumentListResponse, DocumentObj, DocumentResponse, HitMeta, SearchHit,
    SearchResult, Stats, UserResult,
};
use crate::wire::{
    ApiCollectionResponse, ApiDocumentListResponse, ApiDocumentObj, ApiDocumentResponse,
    ApiHitMeta, ApiSearchHit, ApiSearchResult, ApiStatResult, ApiUserResult,
};

pub trait Normalize {
    type Output;

    fn normalize(&self) -> Self::Output;
}

pub fn normalize<T: Normalize + ?Sized>(wire: &T) -> T::Output {
    wire.normalize()
}

impl<T: Normalize> Normalize for [T] {
    type Output = Vec<T::Output>;

    fn normalize(&self) -> Self::Output {
        self.iter().map(Normalize::normalize).collect()
    }
}

impl<T: Normalize> Normalize for Vec<T> {
    type Output = Vec<T::Output>;

    fn normalize(&self) -> Self::Output {
        self.as_slice().normalize()
    }
}

impl Normalize for ApiUserResult {
    type Output = UserResult;

    fn normalize(&self) -> UserResult {
        UserResult { user_name: self.name.clone() }
    }
}

impl Normalize for ApiStatResult {
    type Output = Stats;

    fn normalize(&self) -> Stats {
        Stats { count: self.doc_count, fields: self.fields.clone() }
    }
}

impl Normalize for ApiHitMeta {
    type Output = HitMeta;

    fn normalize(&self) -> HitMeta {
        HitMeta {
            date: self.date.clone(),
            doc_type: self.doc_type.clone(),
            iso3: self.iso3.clone(),
            language: self.language.clone(),
            status: self.status.clone(),
        }
    }
}

impl Normalize for ApiSearchHit {
    type Output = SearchHit;

    fn normalize(&self) -> SearchHit {
        SearchHit {
            base: self.base.clone(),
            doc_id: self.doc_id,
            main_id: self.main_id.clone(),
            meta: self.meta.normalize(),
            score: self.score,
            snippets: self.snippets.clone(),
            url: self.url.clone(),
            title: self.title.clone(),
        }
    }
}

impl Normalize for ApiSearchResult {
    type Output = SearchResult;

    fn normalize(&self) -> SearchResult {
        SearchResult { hits: self.hits.normalize(), status: self.status.clone() }
    }
}

impl Normalize for ApiDocumentObj {
    type Output = DocumentObj;

    fn normalize(&self) -> DocumentObj {
        DocumentObj {
            id: self.id,
            main_id: self.main_id.clone(),
            collection_id: self.deep_dive,
            verify_key: self.verify_key.clone(),
            deep_dive_key: self.deep_dive_key.clone(),
            is_valid: self.is_valid,
            verify_reason: self.verify_reason.clone(),
            deep_dive_result: self.deep_dive_result.clone(),
            error: self.error.clone(),
        }
    }
}

impl Normalize for ApiCollectionResponse {
    type Output = CollectionResponse;

    fn normalize(&self) -> CollectionResponse {
        CollectionResponse { collection_id: self.collection_id }
    }
}

impl Normalize for ApiDocumentResponse {
    type Output = DocumentResponse;

    fn normalize(&self) -> DocumentResponse {
        DocumentResponse { document_ids: self.document_ids.clone() }
    }
}

impl Normalize for ApiDocumentListResponse {
    type Output = DocumentListResponse;

    fn normalize(&self) -> DocumentListResponse {
        DocumentListResponse { documents: self.documents.normalize() }
    }
}

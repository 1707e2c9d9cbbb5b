#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

//! nlpapi-core
//!
//! Wire and domain records for the search/annotation API, the normalizer that
//! maps one onto the other, and the collaborator seams used by the
//! collection widgets.

pub mod config;
pub mod error;
pub mod normalize;
pub mod traits;
pub mod types;
pub mod wire;

pub use normalize::{normalize, Normalize};

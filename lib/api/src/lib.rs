//! # Namesake API
//!
//! Transport-independent inference surface: compare two names, search a
//! query against candidates, and report feature importances. A server or
//! CLI deserializes a request, hands it to [`MatchService`] and serializes
//! the response.
//!
//! ```rust
//! use namesake_api::{CompareRequest, MatchService};
//! use namesake_matcher::MatchConfig;
//!
//! let service = MatchService::open(MatchConfig::default()).unwrap();
//! let response = service.compare(&CompareRequest::new("Deepak Verma", "Dipak Varma")).unwrap();
//! assert!(!response.model_backed);
//! ```

pub mod dto;
pub mod service;

pub use dto::{
    CompareRequest, CompareResponse, FeatureImportanceResponse, SearchRequest, SearchResponse,
    ValidCompare, ValidSearch,
};
pub use service::MatchService;

//! Match service
//!
//! Owns the active matcher and answers validated requests. Opening a service
//! never fails because of the model: if the artifact cannot be loaded the
//! service degrades to [`FallbackMatcher`] and says so in every response.

use crate::dto::{
    CompareRequest, CompareResponse, FeatureImportanceResponse, SearchRequest, SearchResponse,
};
use namesake_core::Result;
use namesake_matcher::{FallbackMatcher, MatchConfig, NameMatcher, SearchStats};
use namesake_storage::ModelStore;
use tracing::{info, warn};

pub struct MatchService {
    matcher: Box<dyn NameMatcher>,
    config: MatchConfig,
}

impl MatchService {
    /// Validate `config` and load the model it names
    ///
    /// Only an invalid config is an error. A missing or unusable model is
    /// logged and replaced by the edit-ratio fallback.
    pub fn open(config: MatchConfig) -> Result<Self> {
        config.validate()?;

        let matcher: Box<dyn NameMatcher> = match &config.model_path {
            Some(path) => match ModelStore::new(path).load_matcher(None) {
                Ok(matcher) => {
                    info!(path = %path.display(), "serving model-backed matches");
                    Box::new(matcher.with_parallel(config.parallel_search))
                }
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "model unavailable, using edit-ratio fallback"
                    );
                    Box::new(FallbackMatcher::new().with_parallel(config.parallel_search))
                }
            },
            None => {
                warn!("no model configured, using edit-ratio fallback");
                Box::new(FallbackMatcher::new().with_parallel(config.parallel_search))
            }
        };

        Ok(Self { matcher, config })
    }

    /// Serve with an already constructed matcher
    pub fn with_matcher<M: NameMatcher + 'static>(matcher: M, config: MatchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            matcher: Box::new(matcher),
            config,
        })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn is_model_backed(&self) -> bool {
        self.matcher.is_model_backed()
    }

    pub fn compare(&self, request: &CompareRequest) -> Result<CompareResponse> {
        let req = request.validate()?;
        let threshold = req.threshold.unwrap_or(self.config.threshold);
        Ok(self.matcher.predict_match(req.name1, req.name2, threshold))
    }

    pub fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let req = request.validate()?;
        let threshold = req.threshold.unwrap_or(self.config.threshold);
        let matches = self
            .matcher
            .find_matches(req.query_name, req.candidate_names, threshold);
        let stats = SearchStats::compute(&matches, req.candidate_names.len());
        Ok(SearchResponse {
            matches,
            model_backed: self.matcher.is_model_backed(),
            stats,
        })
    }

    pub fn feature_importance(&self) -> FeatureImportanceResponse {
        FeatureImportanceResponse {
            feature_importance: self.matcher.feature_importance(),
            model_backed: self.matcher.is_model_backed(),
        }
    }
}

use crate::config::ServerConfig;
use matchers::ImageMatcher;
use std::sync::Arc;
use store::TargetManager;

/// Shared application state.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// The repository both APIs read and mutate
    pub target_manager: Arc<TargetManager>,

    /// Matcher consulted by the duplicates endpoint
    pub duplicates_matcher: Arc<dyn ImageMatcher>,

    /// Matcher consulted by the query endpoint
    pub query_matcher: Arc<dyn ImageMatcher>,
}

impl ServerState {
    /// Create state with a fresh, empty target manager.
    pub fn new(config: ServerConfig) -> Self {
        let manager = Arc::new(TargetManager::new(config.target_rater.to_target_rater()));
        Self::with_target_manager(config, manager)
    }

    /// Create state around an existing target manager, for callers that
    /// provision databases directly (the in-process test double does).
    pub fn with_target_manager(config: ServerConfig, target_manager: Arc<TargetManager>) -> Self {
        Self {
            duplicates_matcher: config.duplicates_image_matcher.to_image_matcher(),
            query_matcher: config.query_image_matcher.to_image_matcher(),
            config: Arc::new(config),
            target_manager,
        }
    }
}

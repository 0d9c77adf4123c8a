//! Application state shared across handlers

use common::config::AppConfig;
use std::sync::Arc;

use crate::{
    jwt::JwtService,
    repositories::{IdeaRepository, UserRepository},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub jwt_service: JwtService,
    pub idea_repository: Arc<dyn IdeaRepository>,
    pub user_repository: Arc<dyn UserRepository>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        idea_repository: Arc<dyn IdeaRepository>,
        user_repository: Arc<dyn UserRepository>,
    ) -> Self {
        let jwt_service = JwtService::new(&config.jwt_secret);

        Self {
            config: Arc::new(config),
            jwt_service,
            idea_repository,
            user_repository,
        }
    }
}

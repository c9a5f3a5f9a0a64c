// src/application/state.rs

use std::sync::Arc;

use crate::identity::IdentityProvider;
use crate::services::CommentModerationService;

/// Shared state handed to every command.
/// Fields are Arc-wrapped so commands can run concurrently.
pub struct AppState {
    pub comment_service: Arc<CommentModerationService>,
    pub identity: Arc<dyn IdentityProvider>,
}

//! Error rendering middleware

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use tracing::{error, warn};

use crate::{error::ErrorReport, state::AppState};

/// Re-render error responses according to the configuration
///
/// Picks the status with the configured classification mode and only
/// includes the stack outside production.
pub async fn render_errors(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();

    let mut response = next.run(req).await;
    let Some(report) = response.extensions_mut().remove::<ErrorReport>() else {
        return response;
    };

    let status = report.status(state.config.error_classification);
    if status.is_server_error() {
        error!(%method, %uri, status = status.as_u16(), "{}", report.stack);
    } else {
        warn!(%method, %uri, status = status.as_u16(), "{}", report.message);
    }

    report.render(
        state.config.error_classification,
        !state.config.is_production(),
    )
}

//! Access guard middleware for protected routes

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use portal_session::{GuardDecision, Route, Session};
use tracing::{debug, warn};

use crate::AppState;
use crate::cookie::CookieStore;
use crate::error::AppError;
use crate::metrics;

/// Resolve the session once and either pass the request through with its
/// `AuthState` attached, or redirect before anything protected renders.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let store = CookieStore::from_headers(request.headers(), state.cookies.clone());
    let session = Session::open(store)?;

    let to = match session.guard() {
        GuardDecision::Allow => {
            metrics::record_guard("allow");
            request.extensions_mut().insert(session.state().clone());
            return Ok(next.run(request).await);
        }
        GuardDecision::Redirect(to) => to,
        // Sessions opened from a store are always resolved
        GuardDecision::Pending => {
            warn!("guard saw an unresolved session");
            Route::Login
        }
    };

    metrics::record_guard("redirect");
    debug!(path = %request.uri().path(), to = to.path(), "no session credential, redirecting");
    Ok(Redirect::to(to.path()).into_response())
}

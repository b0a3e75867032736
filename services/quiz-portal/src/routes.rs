//! Page handlers
//!
//! Every handler that touches the credential opens a `Session` over a
//! request-scoped `CookieStore` and flushes the store onto its response.

use axum::Form;
use axum::extract::{Extension, Query, State};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{MethodRouter, get, post};
use common::Secret;
use portal_session::{AuthState, Navigation, Route, Session};
use serde::Deserialize;
use tracing::{debug, info};

use crate::AppState;
use crate::cookie::CookieStore;
use crate::error::AppError;
use crate::metrics;
use crate::views::NotFound;
use crate::views::dashboard::DashboardPage;
use crate::views::login::{LoginPage, PASSWORD_SIGN_IN_UNAVAILABLE};

/// Handlers for each entry in the route table.
pub fn handler(route: Route) -> MethodRouter<AppState> {
    match route {
        Route::Login => get(login_page).post(login_submit),
        Route::AuthCallback => get(auth_callback),
        Route::Dashboard => get(dashboard),
        Route::SignOut => post(sign_out),
    }
}

/// Browser navigation as an HTTP redirect.
///
/// `303 See Other` is used for both push and replace: the redirecting URL is
/// never committed to history, so the callback URL cannot be returned to.
pub fn redirect(navigation: Navigation) -> Redirect {
    Redirect::to(navigation.to.path())
}

/// GET /: login page with the Telegram widget.
pub async fn login_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let page = LoginPage {
        widget: &state.widget,
        notice: None,
        email: "",
    };
    Ok(state.views.render(&page)?)
}

#[derive(Deserialize)]
pub struct LoginForm {
    email: String,
    password: Secret<String>,
    #[serde(default)]
    remember: Option<String>,
}

/// POST /: password form. Only Telegram sign-in issues credentials, so the
/// submission is logged and the page comes back with a notice.
pub async fn login_submit(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Html<String>, AppError> {
    info!(
        email = %form.email,
        password_provided = !form.password.is_empty(),
        remember = form.remember.is_some(),
        "password sign-in submitted"
    );

    let page = LoginPage {
        widget: &state.widget,
        notice: Some(PASSWORD_SIGN_IN_UNAVAILABLE),
        email: &form.email,
    };
    Ok(state.views.render(&page)?)
}

/// GET /auth/callback?token=...: persist the provider's token and move on.
///
/// Query pairs are read in order and the first `token` wins, so repeated
/// parameters never turn into a 400.
pub async fn auth_callback(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let token = params
        .iter()
        .find(|(key, _)| key == "token")
        .map(|(_, value)| value.as_str());

    let store = CookieStore::from_headers(&headers, state.cookies.clone());
    let mut session = Session::open(store)?;

    let navigation = session.handle_callback(token).inspect_err(|_| {
        metrics::record_callback("storage_error");
    })?;
    metrics::record_callback(if navigation.to == Route::Dashboard {
        "stored"
    } else {
        "missing_token"
    });

    Ok(session.into_store().apply(redirect(navigation)))
}

/// POST /logout: clear the credential cookie.
pub async fn sign_out(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let store = CookieStore::from_headers(&headers, state.cookies.clone());
    let mut session = Session::open(store)?;
    let navigation = session.sign_out()?;
    Ok(session.into_store().apply(redirect(navigation)))
}

#[derive(Deserialize)]
pub struct DashboardParams {
    #[serde(default)]
    menu: Option<String>,
}

/// GET /dashboard: only reachable through the access guard, which hands
/// over the resolved `AuthState`.
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthState>,
    Query(params): Query<DashboardParams>,
) -> Result<Response, AppError> {
    if !matches!(auth, AuthState::Authenticated(_)) {
        return Ok(Redirect::to(Route::Login.path()).into_response());
    }

    let menu_open = params.menu.as_deref() == Some("open");
    debug!(menu_open, "rendering dashboard");
    let page = DashboardPage::new(&state.dashboard, menu_open);
    Ok(state.views.render(&page)?.into_response())
}

pub async fn not_found(State(state): State<AppState>, uri: Uri) -> Result<Response, AppError> {
    let page = NotFound { path: uri.path() };
    Ok((StatusCode::NOT_FOUND, state.views.render(&page)?).into_response())
}

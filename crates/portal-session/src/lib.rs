//! Session bootstrap for the quiz portal
//!
//! Owns everything that decides who may see the dashboard. This crate has no
//! dependency on the HTTP server, so the flow can be tested against an
//! in-memory store.
//!
//! Flow:
//! 1. Identity provider redirects to `Route::AuthCallback` with `?token=...`
//! 2. `Session::handle_callback()` persists the token via the `CredentialStore`
//!    and returns a navigation to `Route::Dashboard`
//! 3. Every protected request opens a `Session`, which resolves `AuthState`
//!    once from the store
//! 4. `Session::guard()` turns that state into allow / redirect

pub mod auth;
pub mod credential;
pub mod error;
pub mod route;
pub mod session;
pub mod store;

pub use auth::{AuthAction, AuthEvent, AuthState, GuardDecision, Navigation, guard, handle_event};
pub use credential::Credential;
pub use error::{Error, Result};
pub use route::Route;
pub use session::Session;
pub use store::{CredentialStore, MemoryStore};

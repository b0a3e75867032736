//! Route table
//!
//! The application exposes a fixed set of literal paths. The server registers
//! exactly `Route::ALL`, wrapping the protected ones in the access guard.

/// Every page the portal serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`: login page and widget
    Login,
    /// `/auth/callback`: token bootstrap from the identity provider
    AuthCallback,
    /// `/dashboard`: protected
    Dashboard,
    /// `/logout`: clears the stored credential
    SignOut,
}

impl Route {
    pub const ALL: [Route; 4] = [
        Route::Login,
        Route::AuthCallback,
        Route::Dashboard,
        Route::SignOut,
    ];

    pub const fn path(self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::AuthCallback => "/auth/callback",
            Route::Dashboard => "/dashboard",
            Route::SignOut => "/logout",
        }
    }

    /// Whether the access guard must approve the request first.
    pub const fn is_protected(self) -> bool {
        matches!(self, Route::Dashboard)
    }
}

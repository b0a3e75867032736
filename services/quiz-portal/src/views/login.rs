//! Login page

use serde::Serialize;

use super::View;
use super::telegram::TelegramWidget;

/// Shown after a password form submission.
pub const PASSWORD_SIGN_IN_UNAVAILABLE: &str =
    "Password sign-in is not available yet. Please continue with Telegram.";

#[derive(Debug, Serialize)]
pub struct LoginPage<'a> {
    pub widget: &'a TelegramWidget,
    pub notice: Option<&'a str>,
    /// Echoed back into the form after a submission
    pub email: &'a str,
}

impl View for LoginPage<'_> {
    const TEMPLATE: &'static str = "login.html";
}

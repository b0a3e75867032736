//! Telegram login widget
//!
//! The provider's script renders the button itself. All we control are the
//! data attributes on the script tag, filled in by `telegram_widget.html`.

use serde::Serialize;

use crate::config::{TelegramConfig, WidgetSize};

#[derive(Debug, Clone, Serialize)]
pub struct TelegramWidget {
    pub bot_name: String,
    pub auth_url: String,
    pub size: WidgetSize,
    pub show_user_pic: bool,
    pub request_access: String,
}

impl From<&TelegramConfig> for TelegramWidget {
    fn from(config: &TelegramConfig) -> Self {
        Self {
            bot_name: config.bot_name.clone(),
            auth_url: config.auth_url.clone(),
            size: config.size,
            show_user_pic: config.show_user_pic,
            request_access: config.request_access.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::Views;
    use minijinja::context;

    fn widget() -> TelegramWidget {
        TelegramWidget::from(&TelegramConfig {
            bot_name: "QuizzzzzMaster_Bot".into(),
            auth_url: "http://localhost:8000/auth/telegram/callback".into(),
            ..TelegramConfig::default()
        })
    }

    fn render(widget: &TelegramWidget) -> String {
        let ctx = context! { widget => widget };
        Views::new()
            .unwrap()
            .render_snippet(r#"{% include "telegram_widget.html" %}"#, ctx)
    }

    #[test]
    fn renders_provider_script_with_data_attributes() {
        let html = render(&widget());
        assert!(html.contains(
            "<script async src=\"https://telegram.org/js/telegram-widget.js?22\""
        ));
        assert!(html.contains("data-telegram-login=\"QuizzzzzMaster_Bot\""));
        assert!(html.contains("data-size=\"large\""));
        assert!(html.contains("data-userpic=\"false\""));
        assert!(html.contains("data-auth-url=\"http:"));
        assert!(html.contains("localhost:8000"));
        assert!(html.contains("data-request-access=\"write\""));
    }

    #[test]
    fn size_and_user_pic_follow_config() {
        let mut widget = widget();
        widget.size = WidgetSize::Small;
        widget.show_user_pic = true;
        let html = render(&widget);
        assert!(html.contains("data-size=\"small\""));
        assert!(html.contains("data-userpic=\"true\""));
    }

    #[test]
    fn attribute_values_are_escaped() {
        let mut widget = widget();
        widget.auth_url = "https://auth.example.com/cb?a=1&b=\"2\"".into();
        widget.bot_name = "bot\"><img src=x>".into();
        let html = render(&widget);
        assert!(html.contains("a=1&amp;b=&quot;2&quot;"));
        assert!(html.contains("data-telegram-login=\"bot&quot;&gt;&lt;img src=x&gt;\""));
        assert!(!html.contains("<img"));
    }
}

//! Server-rendered HTML views
//!
//! Pages are minijinja templates compiled into the binary. Template names end
//! in `.html`, which turns on HTML auto-escaping, so view models carry raw
//! text and never pre-escape anything.

pub mod dashboard;
pub mod login;
pub mod telegram;
pub mod widgets;

use axum::response::Html;
use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;

/// A view model paired with the template that renders it.
pub trait View: Serialize {
    const TEMPLATE: &'static str;
}

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../../templates/base.html")),
    ("widgets.html", include_str!("../../templates/widgets.html")),
    ("telegram_widget.html", include_str!("../../templates/telegram_widget.html")),
    ("login.html", include_str!("../../templates/login.html")),
    ("dashboard.html", include_str!("../../templates/dashboard.html")),
    ("not_found.html", include_str!("../../templates/not_found.html")),
];

/// Compiled templates shared by all handlers.
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_filter("thousands", thousands);
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    pub fn render<V: View>(&self, view: &V) -> Result<Html<String>, minijinja::Error> {
        self.env.get_template(V::TEMPLATE)?.render(view).map(Html)
    }

    /// Render an ad-hoc `.html` snippet against the loaded templates.
    #[cfg(test)]
    pub fn render_snippet<S: Serialize>(&self, source: &str, ctx: S) -> String {
        self.env
            .template_from_named_str("snippet.html", source)
            .unwrap()
            .render(ctx)
            .unwrap()
    }
}

/// Body for paths outside the route table.
#[derive(Debug, Serialize)]
pub struct NotFound<'a> {
    pub path: &'a str,
}

impl View for NotFound<'_> {
    const TEMPLATE: &'static str = "not_found.html";
}

/// `2450` -> `2,450`
fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// ============================
// doorman-lib/src/render.rs
// ============================
//! HTML page rendering from embedded templates.
use crate::error::AppError;
use axum::response::Html;
use minijinja::{context, Environment, Value};
use std::sync::LazyLock;

// template names keep their .html suffix so minijinja auto-escapes them
static TEMPLATES: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();
    env.add_template("layout.html", include_str!("../templates/layout.html"))
        .unwrap();
    env.add_template("home.html", include_str!("../templates/home.html"))
        .unwrap();
    env.add_template("signup.html", include_str!("../templates/signup.html"))
        .unwrap();
    env.add_template("login.html", include_str!("../templates/login.html"))
        .unwrap();
    env.add_template("profile.html", include_str!("../templates/profile.html"))
        .unwrap();
    env.add_template("main.html", include_str!("../templates/main.html"))
        .unwrap();
    env.add_template("private.html", include_str!("../templates/private.html"))
        .unwrap();
    env.add_template("error.html", include_str!("../templates/error.html"))
        .unwrap();
    env
});

fn render(name: &str, ctx: Value) -> Result<Html<String>, AppError> {
    let template = TEMPLATES.get_template(name)?;
    Ok(Html(template.render(ctx)?))
}

pub fn home_page() -> Result<Html<String>, AppError> {
    render("home.html", context! {})
}

/// Signup form; `error_message` re-renders the form with an explanation.
pub fn signup_page(error_message: Option<&str>) -> Result<Html<String>, AppError> {
    render("signup.html", context! { error_message })
}

/// Login form; `error_message` re-renders the form with an explanation.
pub fn login_page(error_message: Option<&str>) -> Result<Html<String>, AppError> {
    render("login.html", context! { error_message })
}

pub fn profile_page(username: &str) -> Result<Html<String>, AppError> {
    render("profile.html", context! { username })
}

pub fn main_page() -> Result<Html<String>, AppError> {
    render("main.html", context! {})
}

pub fn private_page() -> Result<Html<String>, AppError> {
    render("private.html", context! {})
}

/// Error page body. Infallible: falls back to plain text when the
/// template itself cannot render.
pub fn error_page(status: u16, message: &str) -> String {
    TEMPLATES
        .get_template("error.html")
        .and_then(|template| template.render(context! { status, message }))
        .unwrap_or_else(|_| format!("{status}: {message}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forms_render_with_and_without_errors() {
        let page = signup_page(None).unwrap();
        assert!(page.0.contains("action=\"/signup\""));
        assert!(!page.0.contains("class=\"error\""));

        let page = signup_page(Some("Username already exists.")).unwrap();
        assert!(page.0.contains("Username already exists."));

        let page = login_page(Some("Wrong password.")).unwrap();
        assert!(page.0.contains("Wrong password."));
        assert!(page.0.contains("action=\"/login\""));
    }

    #[test]
    fn test_profile_escapes_username() {
        let page = profile_page("<b>alice</b>").unwrap();
        assert!(!page.0.contains("<b>alice</b>"));
        assert!(page.0.contains("&lt;b&gt;alice"));
    }

    #[test]
    fn test_error_page_never_fails() {
        let body = error_page(500, "An internal server error occurred");
        assert!(body.contains("500"));
        assert!(body.contains("An internal server error occurred"));
    }
}

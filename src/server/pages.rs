//! Page-shell handlers.
//!
//! Each routed path answers with a minimal HTML shell; the client
//! application renders the real page against the JSON API. `/dashboard`,
//! `/neighborhood`, and `/upload` are gated - the [`CurrentUser`] extractor
//! redirects anonymous visitors to the entry page before the shell is sent.

use crate::server::session::CurrentUser;
use axum::response::Html;

fn shell(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!doctype html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title} - Spendscape</title></head>\n<body id=\"app\">{body}</body>\n</html>\n"
    ))
}

/// Entry page.
pub async fn home() -> Html<String> {
    shell("Welcome", "<h1>Spendscape</h1><p>Your spending, as a neighborhood.</p>")
}

/// Signup page.
pub async fn signup() -> Html<String> {
    shell("Sign Up", "<h1>Create your account</h1>")
}

/// Dashboard page (gated).
pub async fn dashboard(CurrentUser(user): CurrentUser) -> Html<String> {
    shell(
        "Dashboard",
        &format!("<h1>Welcome back, {}</h1>", user.first_name),
    )
}

/// Neighborhood page (gated).
pub async fn neighborhood(_user: CurrentUser) -> Html<String> {
    shell("Neighborhood", "<div id=\"scene\"></div>")
}

/// Upload page (gated).
pub async fn upload(_user: CurrentUser) -> Html<String> {
    shell("Upload", "<h1>Bank Statement Analysis</h1>")
}

/// Banking page.
pub async fn banking() -> Html<String> {
    shell("Banking", "<h1>Banking</h1>")
}

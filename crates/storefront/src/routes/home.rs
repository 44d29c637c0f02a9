//! Welcome splash page.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use crate::filters;

/// Welcome page template.
#[derive(Template, WebTemplate)]
#[template(path = "welcome.html")]
pub struct WelcomeTemplate;

/// Display the welcome page with its "Enter Shop" button.
pub async fn welcome() -> impl IntoResponse {
    WelcomeTemplate
}

//! Admin mode login and logout.
//!
//! Admin mode is a cosmetic gate that reveals the image upload controls; the
//! password is shared and offers no real protection.

use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use plumpalicious_core::ShopSession;
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::routes::shop::Flash;
use crate::state::AppState;

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub password: String,
}

/// Compare the submitted password and enter admin mode on a match.
#[instrument(skip_all)]
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    let result = state.session_mut().await.login(&form.password);

    match result {
        Ok(()) => {
            tracing::info!("Admin mode enabled");
            Redirect::to(&Flash::LoggedIn.shop_url()).into_response()
        }
        Err(err) => {
            tracing::warn!(error = %err, "Admin login rejected");
            Redirect::to(&Flash::WrongPassword.shop_url()).into_response()
        }
    }
}

/// Leave admin mode and reset the catalog to its defaults.
#[instrument(skip_all)]
pub async fn logout(State(state): State<AppState>) -> Result<Response> {
    let was_admin = state.persist(ShopSession::logout).await??;

    if was_admin {
        tracing::info!("Admin mode disabled, catalog reset to defaults");
        Ok(Redirect::to(&Flash::LoggedOut.shop_url()).into_response())
    } else {
        Ok(Redirect::to("/shop").into_response())
    }
}

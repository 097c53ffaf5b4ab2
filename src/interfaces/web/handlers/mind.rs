use axum::{
    Form,
    extract::State,
    http::header,
    response::{AppendHeaders, IntoResponse, Response},
};
use std::collections::HashMap;

use super::super::AppState;
use super::super::session::Session;
use super::pages::{error_page, home_page};
use crate::core::error::AppError;
use crate::core::mind;

/// Create a mind from the submitted connector form and bind it to the
/// caller's session.
pub async fn create_mind_endpoint(
    State(state): State<AppState>,
    Form(mut fields): Form<HashMap<String, String>>,
) -> Response {
    let Some(connector) = fields.remove("database_name") else {
        return error_page(&AppError::validation("database_name is required"));
    };

    match mind::provision(
        &state.connectors,
        state.minds.as_ref(),
        &connector,
        &fields,
        mind::unix_timestamp(),
    )
    .await
    {
        Ok(mind_name) => {
            let cookie = Session::bound_to(mind_name).to_cookie(&state.session_key);
            (AppendHeaders([(header::SET_COOKIE, cookie)]), home_page()).into_response()
        }
        Err(e) => {
            tracing::warn!("Mind creation for connector {} failed: {}", connector, e);
            error_page(&e)
        }
    }
}

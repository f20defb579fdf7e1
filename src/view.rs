use axum::{extract::State, Json};
use serde::Serialize;
use tracing::instrument;

use crate::auth::session::SessionUser;
use crate::state::AppState;

/// Which view the client should render. Pure dispatch on session state:
/// logged out gets the login/register menu, logged in gets the entry form and
/// the menu stops mattering.
#[derive(Debug, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum ActiveView {
    Login { menu: [&'static str; 2] },
    Entry { username: String },
}

#[instrument(skip(_state, session))]
pub async fn active_view(
    State(_state): State<AppState>,
    session: Option<SessionUser>,
) -> Json<ActiveView> {
    let view = match session {
        Some(user) => ActiveView::Entry {
            username: user.username,
        },
        None => ActiveView::Login {
            menu: ["login", "register"],
        },
    };
    Json(view)
}

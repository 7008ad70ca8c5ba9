//! Dashboard HTTP Handler

use axum::{extract::State, Json};

use super::db;
use crate::backend::error::BackendResult;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::dashboard::Dashboard;
use crate::shared::Role;

/// GET /api/dashboard
///
/// The payload shape depends on the caller's role.
pub async fn get_dashboard(State(state): State<AppState>, AuthUser(user): AuthUser) -> BackendResult<Json<Dashboard>> {
    let dashboard = match user.role {
        Role::Student => Dashboard::Student(db::student_dashboard(&state.db_pool, user.user_id).await?),
        Role::Landlord => Dashboard::Landlord(db::landlord_dashboard(&state.db_pool, user.user_id).await?),
        Role::Admin => Dashboard::Admin(db::admin_dashboard(&state.db_pool).await?),
    };
    Ok(Json(dashboard))
}

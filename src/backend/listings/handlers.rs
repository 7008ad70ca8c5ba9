//! Property Listing HTTP Handlers
//!
//! Browsing is public. Creating requires a landlord whose verification was
//! approved; editing and deleting require ownership.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use super::db;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::favorites::db::is_favorited;
use crate::backend::middleware::{AuthUser, OptionalAuthUser};
use crate::backend::reviews::db::rating_summary;
use crate::backend::server::state::AppState;
use crate::shared::listing::{
    validate_property, CreatePropertyRequest, LandlordSummary, Property, PropertyDetailResponse,
    PropertyListResponse, PropertyQuery, UpdatePropertyRequest,
};
use crate::shared::Role;

/// Load a listing or fail with 404
pub async fn load_property(state: &AppState, property_id: Uuid) -> BackendResult<Property> {
    db::get_property(&state.db_pool, property_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Property not found: {}", property_id);
            BackendError::not_found("Property not found")
        })
}

/// Load a listing and check that `user_id` owns it
async fn load_owned_property(state: &AppState, property_id: Uuid, user_id: Uuid) -> BackendResult<Property> {
    let property = load_property(state, property_id).await?;
    if property.landlord_id != user_id {
        tracing::warn!("User {} tried to modify property {} owned by {}", user_id, property_id, property.landlord_id);
        return Err(BackendError::forbidden("Only the owner can modify this property"));
    }
    Ok(property)
}

/// GET /api/properties
pub async fn list_properties(
    State(state): State<AppState>,
    Query(query): Query<PropertyQuery>,
) -> BackendResult<Json<PropertyListResponse>> {
    let (properties, total) = db::search_properties(&state.db_pool, &query).await?;

    Ok(Json(PropertyListResponse {
        properties,
        total,
        page: query.page(),
        limit: query.limit(),
    }))
}

/// POST /api/properties
pub async fn create_property(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<CreatePropertyRequest>,
) -> BackendResult<(StatusCode, Json<Property>)> {
    user.require_role(Role::Landlord)?;
    if !user.is_verified() {
        tracing::warn!("Unverified landlord {} tried to create a listing", user.user_id);
        return Err(BackendError::forbidden("Your account must be verified before you can list properties"));
    }

    request.validate()?;

    let property = db::insert_property(&state.db_pool, user.user_id, request).await?;
    tracing::info!("Property {} created by {}", property.id, user.user_id);

    Ok((StatusCode::CREATED, Json(property)))
}

/// GET /api/properties/{id}
///
/// Records a view unless the caller owns the listing.
pub async fn get_property(
    State(state): State<AppState>,
    OptionalAuthUser(viewer): OptionalAuthUser,
    Path(property_id): Path<Uuid>,
) -> BackendResult<Json<PropertyDetailResponse>> {
    let property = load_property(&state, property_id).await?;

    let landlord = get_user_by_id(&state.db_pool, property.landlord_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Landlord not found"))?;

    let viewer_id = viewer.as_ref().map(|v| v.user_id);
    if viewer_id != Some(property.landlord_id) {
        db::record_view(&state.db_pool, property.id, viewer_id).await?;
    }

    let rating = rating_summary(&state.db_pool, property.id).await?;
    let is_favorited = match viewer_id {
        Some(user_id) => is_favorited(&state.db_pool, user_id, property.id).await?,
        None => false,
    };

    Ok(Json(PropertyDetailResponse {
        property,
        landlord: LandlordSummary {
            id: landlord.id,
            username: landlord.username,
            full_name: landlord.full_name,
            avatar_url: landlord.avatar_url,
            verification_status: landlord.verification_status,
        },
        rating,
        is_favorited,
    }))
}

/// PUT /api/properties/{id}
pub async fn update_property(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(property_id): Path<Uuid>,
    Json(request): Json<UpdatePropertyRequest>,
) -> BackendResult<Json<Property>> {
    let mut property = load_owned_property(&state, property_id, user.user_id).await?;

    request.apply_to(&mut property);
    validate_property(&property)?;
    property.updated_at = Utc::now();

    db::save_property(&state.db_pool, &property).await?;
    tracing::info!("Property {} updated", property.id);

    Ok(Json(property))
}

/// DELETE /api/properties/{id}
pub async fn delete_property(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(property_id): Path<Uuid>,
) -> BackendResult<StatusCode> {
    load_owned_property(&state, property_id, user.user_id).await?;

    db::delete_property(&state.db_pool, property_id).await?;
    tracing::info!("Property {} deleted by {}", property_id, user.user_id);

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/landlord/properties
pub async fn my_properties(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> BackendResult<Json<Vec<Property>>> {
    user.require_role(Role::Landlord)?;
    let properties = db::list_properties_for_landlord(&state.db_pool, user.user_id).await?;
    Ok(Json(properties))
}

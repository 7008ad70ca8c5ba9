/**
 * API Routes
 *
 * # Public
 *
 * - `POST /api/auth/signup`, `POST /api/auth/login`
 * - `GET /api/users/{id}`
 * - `GET /api/properties`, `GET /api/properties/{id}` (personalised when a
 *   token is sent)
 * - `GET /api/properties/{id}/reviews`, `GET /api/properties/{id}/reviews/summary`
 *
 * # Protected
 *
 * Everything else under `/api`. Requests without a valid bearer token are
 * rejected with 401 by `auth_middleware` before reaching the handler.
 * Role, ownership and participant checks happen in the handlers.
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};

use crate::backend::ai::handlers as ai;
use crate::backend::auth::{get_me, login, signup};
use crate::backend::dashboard::handlers as dashboard;
use crate::backend::favorites::handlers as favorites;
use crate::backend::listings::handlers as listings;
use crate::backend::messaging::handlers as messaging;
use crate::backend::middleware::auth_middleware;
use crate::backend::notifications::handlers as notifications;
use crate::backend::reviews::handlers as reviews;
use crate::backend::server::state::AppState;
use crate::backend::users::handlers as users;
use crate::backend::verification::handlers as verification;

/// Add routes that need no authentication
pub fn configure_public_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Authentication endpoints
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route("/api/users/{id}", get(users::get_public_profile))
        // Browsing
        .route("/api/properties", get(listings::list_properties))
        .route("/api/properties/{id}", get(listings::get_property))
        .route("/api/properties/{id}/reviews", get(reviews::list_reviews))
        .route("/api/properties/{id}/reviews/summary", get(reviews::review_summary))
}

/// Routes that require a bearer token
pub fn protected_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/auth/me", get(get_me))
        // Account
        .route("/api/users/me", put(users::update_me).delete(users::delete_me))
        .route("/api/users/me/password", put(users::change_password))
        // Listings
        .route("/api/properties", post(listings::create_property))
        .route(
            "/api/properties/{id}",
            put(listings::update_property).delete(listings::delete_property),
        )
        .route("/api/landlord/properties", get(listings::my_properties))
        // Favorites
        .route("/api/favorites", get(favorites::list_favorites).post(favorites::add_favorite))
        .route("/api/favorites/{property_id}", delete(favorites::remove_favorite))
        // Reviews
        .route("/api/properties/{id}/reviews", post(reviews::create_review))
        .route("/api/reviews/{id}", delete(reviews::delete_review))
        // Conversations
        .route(
            "/api/conversations",
            get(messaging::list_conversations).post(messaging::start_conversation),
        )
        .route(
            "/api/conversations/{id}/messages",
            get(messaging::get_messages).post(messaging::send_message),
        )
        .route("/api/conversations/{id}/ai-reply", post(ai::ai_reply))
        // AI
        .route("/api/ai/description", post(ai::generate_description))
        // Notifications
        .route("/api/notifications", get(notifications::list_notifications))
        .route("/api/notifications/unread-count", get(notifications::unread_count))
        .route("/api/notifications/read-all", post(notifications::mark_all_read))
        // Verification
        .route(
            "/api/verification",
            get(verification::my_verification).post(verification::submit_verification),
        )
        // Admin
        .route("/api/admin/verifications", get(verification::list_verifications))
        .route("/api/admin/verifications/{id}/approve", post(verification::approve_verification))
        .route("/api/admin/verifications/{id}/reject", post(verification::reject_verification))
        .route("/api/admin/users", get(verification::admin_list_users))
        // Dashboard
        .route("/api/dashboard", get(dashboard::get_dashboard))
        .route_layer(from_fn_with_state(app_state, auth_middleware))
}

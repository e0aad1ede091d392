pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post},
    Router,
};
use sqlx::PgPool;

use crate::middleware::auth;
use crate::middleware::rate_limit::{new_rps_state, rps_middleware};
use crate::services::{
    application_service::ApplicationService, favorite_service::FavoriteService,
    job_service::JobService, resume_store::ResumeStore, user_service::UserService,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub user_service: UserService,
    pub job_service: JobService,
    pub application_service: ApplicationService,
    pub favorite_service: FavoriteService,
    pub resume_store: ResumeStore,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();
        let resume_store = ResumeStore::new(config.uploads_dir.clone());

        let user_service = UserService::new(pool.clone());
        let job_service = JobService::new(pool.clone());
        let application_service = ApplicationService::new(pool.clone(), resume_store.clone());
        let favorite_service = FavoriteService::new(pool.clone());

        Self {
            pool,
            user_service,
            job_service,
            application_service,
            favorite_service,
            resume_store,
        }
    }
}

/// Assemble every route group with its guards and rate limiters.
///
/// Layer order per group, outermost first: rate limit, authenticate, role
/// guard, handler. Ownership checks live inside the services.
pub fn api_router(state: AppState) -> Router {
    let config = crate::config::get_config();

    let public_api = Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/auth/signup", post(routes::auth::signup))
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/jobs", get(routes::job::list_jobs))
        .layer(from_fn_with_state(
            new_rps_state(config.public_rps),
            rps_middleware,
        ));

    let manager_api = Router::new()
        .route("/api/jobs", post(routes::job::create_job))
        .route("/api/jobs/mine", get(routes::job::list_my_jobs))
        .route(
            "/api/jobs/:id",
            patch(routes::job::update_job).delete(routes::job::delete_job),
        )
        .layer(axum::middleware::from_fn(auth::require_hiring_manager))
        .layer(from_fn_with_state(state.clone(), auth::authenticate))
        .layer(from_fn_with_state(
            new_rps_state(config.api_rps),
            rps_middleware,
        ));

    let candidate_api = Router::new()
        .route("/api/jobs/:id/apply", post(routes::application::apply_to_job))
        .route(
            "/api/applications",
            get(routes::application::list_my_applications),
        )
        .route(
            "/api/applications/:id",
            delete(routes::application::delete_application),
        )
        .route(
            "/api/applications/:id/resume",
            get(routes::application::download_resume),
        )
        .route(
            "/api/jobs/:id/favorite",
            post(routes::favorite::favorite_job).delete(routes::favorite::unfavorite_job),
        )
        .route("/api/favorites", get(routes::favorite::list_favorites))
        .layer(axum::middleware::from_fn(auth::require_candidate))
        .layer(from_fn_with_state(state.clone(), auth::authenticate))
        .layer(from_fn_with_state(
            new_rps_state(config.api_rps),
            rps_middleware,
        ));

    let reviewer_api = Router::new()
        .route(
            "/api/applications/:id/status",
            patch(routes::application::update_application_status),
        )
        .layer(axum::middleware::from_fn(auth::require_reviewer))
        .layer(from_fn_with_state(state.clone(), auth::authenticate))
        .layer(from_fn_with_state(
            new_rps_state(config.api_rps),
            rps_middleware,
        ));

    let admin_api = Router::new()
        .route("/api/admin/users", get(routes::admin::list_users))
        .route(
            "/api/admin/users/:id/role",
            patch(routes::admin::update_user_role),
        )
        .route(
            "/api/admin/users/:id/block",
            patch(routes::admin::toggle_block_user),
        )
        .route(
            "/api/admin/users/:id",
            delete(routes::admin::soft_delete_user),
        )
        .route("/api/admin/jobs", get(routes::admin::list_jobs))
        .route(
            "/api/admin/applications",
            get(routes::admin::list_applications),
        )
        .layer(axum::middleware::from_fn(auth::require_admin))
        .layer(from_fn_with_state(state.clone(), auth::authenticate))
        .layer(from_fn_with_state(
            new_rps_state(config.api_rps),
            rps_middleware,
        ));

    public_api
        .merge(manager_api)
        .merge(candidate_api)
        .merge(reviewer_api)
        .merge(admin_api)
        .with_state(state)
}

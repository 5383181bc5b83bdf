//! Server initialization and routing

use crate::api;
use crate::cache::CacheManager;
use crate::config::Config;
use crate::jwt::JwtManager;
use crate::middleware::route_guard::route_guard_middleware;
use crate::migration;
use crate::repository::{
    appointment::AppointmentRepositoryImpl, assessment::AssessmentRepositoryImpl,
    client::ClientRepositoryImpl, estimate::EstimateRepositoryImpl, message::MessageRepositoryImpl,
    ongoing_service::OngoingServiceRepositoryImpl, report::ReportRepositoryImpl,
    tenant::TenantRepositoryImpl, vehicle::VehicleRepositoryImpl,
};
use crate::service::{
    AppointmentService, AssessmentService, ClientService, EstimateService, MessageService,
    ReportService, TenantService, WorkshopService,
};
use crate::storage::LocalBlobStore;
use crate::vision::VisionClient;
use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use sqlx::{mysql::MySqlPoolOptions, MySqlPool};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Uploaded vehicle photos can be a few megabytes
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: MySqlPool,
    pub cache_manager: CacheManager,
    pub jwt_manager: JwtManager,
    pub tenant_service: Arc<TenantService<TenantRepositoryImpl>>,
    pub client_service: Arc<ClientService<ClientRepositoryImpl, VehicleRepositoryImpl>>,
    pub estimate_service:
        Arc<EstimateService<EstimateRepositoryImpl, TenantRepositoryImpl, VehicleRepositoryImpl>>,
    pub appointment_service:
        Arc<AppointmentService<AppointmentRepositoryImpl, EstimateRepositoryImpl>>,
    pub message_service: Arc<MessageService<MessageRepositoryImpl, ClientRepositoryImpl>>,
    pub workshop_service: Arc<WorkshopService<OngoingServiceRepositoryImpl, VehicleRepositoryImpl>>,
    pub assessment_service: Arc<
        AssessmentService<
            AssessmentRepositoryImpl,
            VehicleRepositoryImpl,
            VisionClient,
            LocalBlobStore,
        >,
    >,
    pub report_service:
        Arc<ReportService<ReportRepositoryImpl, AssessmentRepositoryImpl, LocalBlobStore>>,
}

/// Run the server
pub async fn run(config: Config) -> Result<()> {
    // Apply migrations before the pool comes up
    migration::run_migrations(&config).await?;

    // Create database connection pool
    let db_pool = MySqlPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;

    info!("Connected to database");

    // Create cache manager
    let cache_manager = CacheManager::new(&config.redis).await?;
    info!("Connected to Redis");

    // Create repositories
    let tenant_repo = Arc::new(TenantRepositoryImpl::new(db_pool.clone()));
    let client_repo = Arc::new(ClientRepositoryImpl::new(db_pool.clone()));
    let vehicle_repo = Arc::new(VehicleRepositoryImpl::new(db_pool.clone()));
    let estimate_repo = Arc::new(EstimateRepositoryImpl::new(db_pool.clone()));
    let appointment_repo = Arc::new(AppointmentRepositoryImpl::new(db_pool.clone()));
    let message_repo = Arc::new(MessageRepositoryImpl::new(db_pool.clone()));
    let ongoing_repo = Arc::new(OngoingServiceRepositoryImpl::new(db_pool.clone()));
    let assessment_repo = Arc::new(AssessmentRepositoryImpl::new(db_pool.clone()));
    let report_repo = Arc::new(ReportRepositoryImpl::new(db_pool.clone()));

    // Token verification for the external identity provider
    let jwt_manager = JwtManager::new(config.auth.clone());

    // External collaborators
    let vision_client = Arc::new(VisionClient::new(config.vision.clone()));
    let blob_store = Arc::new(LocalBlobStore::new(
        config.storage.root.clone(),
        config.storage.public_base_url.clone(),
    ));

    // Create services
    let tenant_service = Arc::new(TenantService::new(
        tenant_repo.clone(),
        Some(cache_manager.clone()),
        config.app_base_url.clone(),
    ));
    let client_service = Arc::new(ClientService::new(client_repo.clone(), vehicle_repo.clone()));
    let estimate_service = Arc::new(EstimateService::new(
        estimate_repo.clone(),
        tenant_repo.clone(),
        vehicle_repo.clone(),
        Some(cache_manager.clone()),
    ));
    let appointment_service = Arc::new(AppointmentService::new(
        appointment_repo,
        estimate_repo.clone(),
    ));
    let message_service = Arc::new(MessageService::new(message_repo, client_repo.clone()));
    let workshop_service = Arc::new(WorkshopService::new(ongoing_repo, vehicle_repo.clone()));
    let assessment_service = Arc::new(AssessmentService::new(
        assessment_repo.clone(),
        vehicle_repo,
        vision_client,
        blob_store.clone(),
    ));
    let report_service = Arc::new(ReportService::new(report_repo, assessment_repo, blob_store));

    // Create app state
    let state = AppState {
        config: Arc::new(config.clone()),
        db_pool,
        cache_manager,
        jwt_manager,
        tenant_service,
        client_service,
        estimate_service,
        appointment_service,
        message_service,
        workshop_service,
        assessment_service,
        report_service,
    };

    let app = build_router(state);

    let http_addr = config.http_addr();
    let listener = TcpListener::bind(&http_addr).await?;
    info!("HTTP server started on {}", http_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the HTTP router
pub fn build_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health endpoints
        .route("/health", get(api::health::health))
        .route("/ready", get(api::health::ready))
        // Portal dispatch
        .route("/api/v1/portal", get(api::portal::resolve))
        // Tenant endpoints
        .route("/api/v1/tenants/ensure", post(api::tenant::ensure))
        .route("/api/v1/tenants/me", get(api::tenant::get))
        .route(
            "/api/v1/tenants/me/settings",
            put(api::tenant::update_settings),
        )
        // Client roster endpoints
        .route(
            "/api/v1/clients",
            get(api::client::list).post(api::client::create),
        )
        .route(
            "/api/v1/clients/{client_id}/vehicles",
            get(api::client::list_vehicles),
        )
        .route("/api/v1/vehicles", post(api::client::add_vehicle))
        // Estimate endpoints
        .route("/api/v1/estimates", post(api::estimate::generate))
        .route("/api/v1/estimates/recent", get(api::estimate::recent))
        .route(
            "/api/v1/estimates/{id}/status",
            put(api::estimate::set_status),
        )
        // Appointment endpoints
        .route("/api/v1/appointments", post(api::appointment::schedule))
        .route(
            "/api/v1/appointments/upcoming",
            get(api::appointment::upcoming),
        )
        .route(
            "/api/v1/appointments/{id}/status",
            put(api::appointment::set_status),
        )
        .route(
            "/api/v1/appointments/{id}/deposit",
            put(api::appointment::mark_deposit_paid),
        )
        // Chat endpoints
        .route("/api/v1/messages", post(api::message::send))
        .route(
            "/api/v1/clients/{client_id}/messages",
            get(api::message::conversation),
        )
        // Shop-floor endpoints
        .route("/api/v1/services", post(api::workshop::start))
        .route(
            "/api/v1/services/in-progress",
            get(api::workshop::in_progress),
        )
        .route(
            "/api/v1/services/{id}/status",
            put(api::workshop::set_status),
        )
        // Assessment endpoints
        .route("/api/v1/assessments", post(api::assessment::process_image))
        .route("/api/v1/assessments/{id}", get(api::assessment::get))
        // Service report endpoints
        .route("/api/v1/reports", post(api::report::generate))
        .route("/api/v1/reports/{id}", get(api::report::get))
        // Role-guarded dashboard pages
        .route("/dashboard", get(api::portal::area))
        .route("/admin", get(api::portal::area))
        .route("/manager", get(api::portal::area))
        .route("/client", get(api::portal::area))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            route_guard_middleware,
        ))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

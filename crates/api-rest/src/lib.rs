//! # API REST
//!
//! REST surface for the wardview patient dashboard.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialisation, CORS, session extraction)
//!
//! The dashboard model is serialised as JSON for the template layer; redirect directives
//! become HTTP redirects. Binaries construct [`AppState`] and serve [`router`].

#![warn(rust_2018_idioms)]

use std::sync::Arc;

use axum::{
    Router,
    extract::{Path as AxumPath, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Redirect as HttpRedirect, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use wardview_core::PatientId;
use wardview_core::dashboard::DashboardService;
use wardview_core::model::{Location, SessionContext, UserContext};
use wardview_core::page::PageDirective;
use wardview_core::services::PatientDirectory;

/// Header carrying the authenticated username, as set by the fronting proxy.
const REMOTE_USER_HEADER: &str = "x-remote-user";

/// Application state shared across REST API handlers
///
/// Contains the services needed by the dashboard endpoints: the patient directory for
/// resolving path identifiers, the assembled dashboard service, and the deployment's
/// session location.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn PatientDirectory>,
    pub dashboard: Arc<DashboardService>,
    pub session_location: Option<Location>,
}

impl AppState {
    pub fn new(
        directory: Arc<dyn PatientDirectory>,
        dashboard: Arc<DashboardService>,
        session_location: Option<Location>,
    ) -> Self {
        Self {
            directory,
            dashboard,
            session_location,
        }
    }

    /// The per-request session: user from the remote-user header (or `anonymous`), location
    /// from the deployment configuration.
    fn session_from(&self, headers: &HeaderMap) -> SessionContext {
        let username = headers
            .get(REMOTE_USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .unwrap_or("anonymous");
        SessionContext {
            user: UserContext::new(username),
            location: self.session_location.clone(),
        }
    }
}

/// Health check response for monitoring and load balancers.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Minimal model behind the deleted-patient landing view.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedPatientRes {
    #[serde(rename = "patientId")]
    pub patient_id: String,
}

#[derive(Debug, Deserialize)]
struct DashboardQuery {
    tab: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeletedPatientQuery {
    #[serde(rename = "patientId")]
    patient_id: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, patient_dashboard, deleted_patient),
    components(schemas(HealthRes, DeletedPatientRes))
)]
struct ApiDoc;

/// Assembles the dashboard router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/patientdashboard/patient/:patient_id", get(patient_dashboard))
        .route("/patientdashboard/deletedPatient", get(deleted_patient))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Returns the current health status of the wardview service.
/// This endpoint is used for monitoring and load balancer health checks.
///
/// # Returns
/// * `Json<HealthRes>` - Health status response containing service status
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "wardview REST API is alive".into(),
    })
}

#[utoipa::path(
    get,
    path = "/patientdashboard/patient/{patient_id}",
    params(
        ("patient_id" = String, Path, description = "Patient identifier"),
        ("tab" = Option<String>, Query, description = "Dashboard tab to preselect")
    ),
    responses(
        (status = 200, description = "Dashboard model as JSON for the template layer"),
        (status = 303, description = "Patient record is voided; redirect to the deleted-patient view"),
        (status = 400, description = "Invalid patient identifier"),
        (status = 404, description = "Unknown patient"),
        (status = 500, description = "Internal server error")
    )
)]
/// Patient dashboard page
///
/// Resolves the patient through the directory, assembles the dashboard model and returns it
/// as JSON. Voided records answer with a redirect to the deleted-patient view instead.
///
/// The session user is taken from the `x-remote-user` header; the session location is fixed
/// per deployment.
///
/// # Returns
/// * `Ok(Response)` - Dashboard model as JSON, or a redirect for voided records
/// * `Err((StatusCode, &str))` - Invalid id, unknown patient, or internal server error
///
/// # Errors
/// Returns `500 Internal Server Error` if:
/// - the patient directory fails, or
/// - dashboard assembly fails.
#[axum::debug_handler]
async fn patient_dashboard(
    State(state): State<AppState>,
    AxumPath(patient_id): AxumPath<String>,
    Query(query): Query<DashboardQuery>,
    headers: HeaderMap,
) -> Result<Response, (StatusCode, &'static str)> {
    let patient_id = match PatientId::parse(&patient_id) {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Invalid patient id: {:?}", e);
            return Err((StatusCode::BAD_REQUEST, "Invalid patient id"));
        }
    };

    let patient = match state.directory.find_patient(&patient_id) {
        Ok(Some(patient)) => patient,
        Ok(None) => return Err((StatusCode::NOT_FOUND, "Unknown patient")),
        Err(e) => {
            tracing::error!("Patient lookup error: {:?}", e);
            return Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"));
        }
    };

    let session = state.session_from(&headers);
    match state
        .dashboard
        .patient_page(patient, query.tab.as_deref(), &session)
    {
        Ok(PageDirective::Render(model)) => Ok(Json(model).into_response()),
        Ok(PageDirective::Redirect(redirect)) => {
            let query = redirect.query_string();
            let target = if query.is_empty() {
                format!("/{}", redirect.page)
            } else {
                format!("/{}?{}", redirect.page, query)
            };
            Ok(HttpRedirect::to(&target).into_response())
        }
        Err(e) => {
            tracing::error!("Dashboard assembly error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}

#[utoipa::path(
    get,
    path = "/patientdashboard/deletedPatient",
    params(
        ("patientId" = Option<String>, Query, description = "Identifier of the deleted patient")
    ),
    responses(
        (status = 200, description = "Deleted-patient view model", body = DeletedPatientRes)
    )
)]
/// Deleted-patient landing view
///
/// Target of the redirect issued for voided records; echoes the patient identifier so the
/// template layer can render the notice.
///
/// # Returns
/// * `Json<DeletedPatientRes>` - Minimal model carrying the patient identifier
#[axum::debug_handler]
async fn deleted_patient(Query(query): Query<DeletedPatientQuery>) -> Json<DeletedPatientRes> {
    Json(DeletedPatientRes {
        patient_id: query.patient_id.unwrap_or_default(),
    })
}

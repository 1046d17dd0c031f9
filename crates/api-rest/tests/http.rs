//! HTTP-level tests for the dashboard router, driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use api_rest::{AppState, router};
use wardview_core::addons::{AddressHierarchyAbsent, AddressLevelProvider};
use wardview_core::dashboard::DashboardService;
use wardview_core::memory::{MemoryAddressHierarchy, MemoryHis};
use wardview_core::model::Location;

fn demo_state(with_address_hierarchy: bool) -> AppState {
    let his = Arc::new(MemoryHis::demo());
    let provider: Arc<dyn AddressLevelProvider> = if with_address_hierarchy {
        Arc::new(MemoryAddressHierarchy::demo())
    } else {
        Arc::new(AddressHierarchyAbsent)
    };
    let dashboard = DashboardService::new(his.clone(), his.clone(), his.clone(), provider);
    AppState::new(
        his,
        Arc::new(dashboard),
        Some(Location::new("ward-2", "Ward 2")),
    )
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("JSON body")
}

#[tokio::test]
async fn health_answers_ok() {
    let app = router(demo_state(true));
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let value = body_json(response).await;
    assert_eq!(value["ok"], true);
}

#[tokio::test]
async fn dashboard_renders_the_full_model() {
    let app = router(demo_state(true));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/patientdashboard/patient/1042")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let model = body_json(response).await;

    for key in [
        "patient",
        "orders",
        "addressHierarchyLevels",
        "selectedTab",
        "activeVisit",
        "encounterTemplateExtensions",
        "overallActions",
        "visitActions",
        "patientTabs",
    ] {
        assert!(model.get(key).is_some(), "missing attribute {key}");
    }

    assert_eq!(model["selectedTab"], "visits");
    assert_eq!(model["patient"]["formattedName"], "Pritchard, Ada");
    assert!(
        !model["activeVisit"].is_null(),
        "ward session location resolves to a visit-capable site"
    );
    assert_eq!(
        model["addressHierarchyLevels"],
        serde_json::json!(["cityVillage", "countyDistrict", "country"])
    );
}

#[tokio::test]
async fn action_lists_come_back_sorted_for_the_session_user() {
    let app = router(demo_state(true));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/patientdashboard/patient/1042")
                .header("x-remote-user", "dr.finch")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    let model = body_json(response).await;
    let ids: Vec<&str> = model["overallActions"]
        .as_array()
        .expect("overallActions array")
        .iter()
        .map(|e| e["id"].as_str().expect("extension id"))
        .collect();
    // Sorted by weight, with the privileged delete action filtered out.
    assert_eq!(ids, ["start-visit", "request-appointment"]);
}

#[tokio::test]
async fn privileged_extensions_appear_for_a_privileged_user() {
    let app = router(demo_state(true));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/patientdashboard/patient/1042")
                .header("x-remote-user", "admin")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    let model = body_json(response).await;
    let ids: Vec<&str> = model["overallActions"]
        .as_array()
        .expect("overallActions array")
        .iter()
        .map(|e| e["id"].as_str().expect("extension id"))
        .collect();
    assert_eq!(ids, ["start-visit", "request-appointment", "delete-patient"]);
}

#[tokio::test]
async fn tab_query_parameter_is_echoed() {
    let app = router(demo_state(true));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/patientdashboard/patient/1042?tab=growthChart")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    let model = body_json(response).await;
    assert_eq!(model["selectedTab"], "growthChart");
}

#[tokio::test]
async fn a_voided_patient_redirects_to_the_deleted_patient_view() {
    let app = router(demo_state(true));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/patientdashboard/patient/1099")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("Location header");
    assert_eq!(location, "/patientdashboard/deletedPatient?patientId=1099");
}

#[tokio::test]
async fn the_deleted_patient_view_echoes_the_id() {
    let app = router(demo_state(true));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/patientdashboard/deletedPatient?patientId=1099")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let value = body_json(response).await;
    assert_eq!(value["patientId"], "1099");
}

#[tokio::test]
async fn an_unknown_patient_is_not_found() {
    let app = router(demo_state(true));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/patientdashboard/patient/7777")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn an_invalid_patient_id_is_rejected() {
    let app = router(demo_state(true));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/patientdashboard/patient/bad!id")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn without_the_address_module_the_level_list_is_empty() {
    let app = router(demo_state(false));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/patientdashboard/patient/1042")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let model = body_json(response).await;
    assert_eq!(model["addressHierarchyLevels"], serde_json::json!([]));
}

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use wardview_core::addons::{AddressHierarchyAbsent, AddressLevelProvider};
use wardview_core::dashboard::DashboardService;
use wardview_core::memory::{MemoryAddressHierarchy, MemoryHis};

/// Main entry point for the wardview application
///
/// Starts the REST server for the patient dashboard endpoints, backed by the in-memory demo
/// services. The address-hierarchy provider is chosen once at startup: deployments with the
/// add-on get the seeded hierarchy, all others get the absent stand-in.
///
/// # Environment Variables
/// - `WARDVIEW_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `WARDVIEW_SESSION_LOCATION`: Session location id (default: "ward-2")
/// - `WARDVIEW_ADDRESS_HIERARCHY`: Truthy to install the address-hierarchy add-on
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If server startup or runtime fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wardview_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("WARDVIEW_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let his = Arc::new(MemoryHis::demo());

    let session_location_id =
        std::env::var("WARDVIEW_SESSION_LOCATION").unwrap_or_else(|_| "ward-2".into());
    let session_location = his.location(&session_location_id);
    if session_location.is_none() {
        tracing::warn!(
            "unknown session location '{}'; serving without one",
            session_location_id
        );
    }

    let with_hierarchy = std::env::var("WARDVIEW_ADDRESS_HIERARCHY")
        .map(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false);
    let address_levels: Arc<dyn AddressLevelProvider> = if with_hierarchy {
        Arc::new(MemoryAddressHierarchy::demo())
    } else {
        Arc::new(AddressHierarchyAbsent)
    };

    tracing::info!("++ Starting wardview REST on {}", addr);
    tracing::info!(
        "++ Address hierarchy add-on: {}",
        if with_hierarchy { "installed" } else { "absent" }
    );

    let dashboard = Arc::new(DashboardService::new(
        his.clone(),
        his.clone(),
        his.clone(),
        address_levels,
    ));
    let app = api_rest::router(AppState::new(his, dashboard, session_location));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

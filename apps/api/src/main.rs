use std::net::SocketAddr;
use std::sync::Arc;

use dotenv::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{self, TraceLayer};
use tracing::{info, warn, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod router;

use notification_cell::handlers::NotificationState;
use notification_cell::services::{LogSink, NotificationSink};
use scheduling_cell::handlers::SchedulingState;
use shared_config::ClinicConfig;
use shared_store::{ClinicStore, MemoryStore};

#[tokio::main]
async fn main() {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting MedAssist API server");

    // Load configuration
    let config = ClinicConfig::from_env();
    for issue in config.validate() {
        warn!("Configuration issue: {}", issue);
    }

    // Wire the persistence gateway and the notification transport. Every
    // service receives its collaborators explicitly from here.
    let store: Arc<dyn ClinicStore> = Arc::new(MemoryStore::new());
    let sink: Arc<dyn NotificationSink> = Arc::new(LogSink::new());

    if let Err(e) = store.put_settings(config.clinic_settings()).await {
        warn!("Failed to seed clinic settings: {}", e);
    }

    let scheduling = Arc::new(SchedulingState::new(Arc::clone(&store)));
    let notifications = Arc::new(NotificationState {
        store: Arc::clone(&store),
        sink,
    });

    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the application router
    let app = router::create_router(store, scheduling, notifications)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors);

    // Run the server
    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use marketplace_client::auth::adapter::outgoing::JsonFileSessionStore;
use marketplace_client::auth::application::domain::entities::AuthUser;
use marketplace_client::auth::application::ports::outgoing::{SessionKey, SessionStore};
use marketplace_client::auth::application::use_cases::restore_session::{
    IRestoreSessionUseCase, RestoreSessionUseCase,
};
use marketplace_client::geocoding::adapter::outgoing::LocationIqGeocoder;
use marketplace_client::geocoding::application::services::AddressAutocomplete;
use marketplace_client::notification::adapter::outgoing::tracing_listener;
use marketplace_client::notification::NotificationService;
use marketplace_client::profile::adapter::outgoing::HttpProfileApi;
use marketplace_client::profile::UserProfileContext;
use marketplace_client::service::adapter::outgoing::{ConfiguredGeolocation, HttpServiceCatalog};
use marketplace_client::service::application::service::BrowseSubServicesService;
use marketplace_client::service::MapViewController;
use marketplace_client::shared::config::ClientConfig;
use marketplace_client::shared::http::BackendClient;

#[tokio::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,reqwest=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting marketplace client...");

    let config = ClientConfig::from_env()?;
    let notifier = NotificationService::global().clone();
    tracing_listener::attach(&notifier);

    let store: Arc<dyn SessionStore> =
        Arc::new(JsonFileSessionStore::new(&config.session_store_path));
    let client = BackendClient::new(&config.api_base_url, store.clone());

    // Session
    match RestoreSessionUseCase::new(store.clone()).execute(Utc::now()) {
        Some(session) => {
            let role = store
                .get(SessionKey::User)
                .ok()
                .flatten()
                .and_then(|raw| serde_json::from_str::<AuthUser>(&raw).ok())
                .and_then(|user| user.role);
            let profiles = UserProfileContext::new(Arc::new(HttpProfileApi::new(client.clone())))
                .reload(session.user_id, role)
                .await;
            info!(
                user_id = %session.user_id,
                expires_at = %session.expires_at,
                avatar = profiles.active_image.as_deref().unwrap_or("-"),
                "Session restored"
            );
        }
        None => info!("No active session, browsing anonymously"),
    }

    // Optional address lookup: `marketplace-client "Model Town"`
    if let Some(query) = std::env::args().nth(1) {
        let autocomplete = AddressAutocomplete::with_settings(
            Arc::new(LocationIqGeocoder::new(&config.geocoder_url, &config.geocoder_key)),
            config.autocomplete_debounce,
            config.autocomplete_limit,
        );
        if let Some(lookup) = autocomplete.input(&query) {
            lookup.await?;
        }
        for suggestion in autocomplete.suggestions() {
            info!(place = %suggestion.display_name, lat = %suggestion.lat, lon = %suggestion.lon, "Suggestion");
        }
    }

    // Map
    let catalog = Arc::new(HttpServiceCatalog::new(client));
    let mut map = MapViewController::new(
        Arc::new(ConfiguredGeolocation::new(config.device_position)),
        Arc::new(BrowseSubServicesService::new(catalog)),
    );
    map.load().await;

    let state = map.state();
    if let Some(message) = &state.error {
        warn!(message = %message, "Map view degraded");
    }
    if let Some(center) = state.center {
        info!(center = %center, services = state.services.len(), "Map centred");
    }
    for marker in map.markers() {
        info!(
            title = %marker.title,
            position = %marker.position,
            subtitle = marker.subtitle.as_deref().unwrap_or(""),
            "Marker"
        );
    }

    Ok(())
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting client: {e}");
    }
}

use core_config::AppInfo;
use event_bus::EventPublisher;
use std::sync::Arc;

/// Shared application state injected into the handlers.
///
/// The publisher is selected once at startup (logging vs. bus) and
/// reused for every request.
#[derive(Clone)]
pub struct AppState {
    pub app: AppInfo,
    pub service_name: String,
    pub publisher: Arc<dyn EventPublisher>,
}

// Application state for HTTP handlers
use crate::application::report_service::ReportService;
use crate::application::selector::InstallationSelector;
use crate::application::store::{DashboardStore, NotificationStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub selector: Arc<InstallationSelector>,
    pub dashboard: Arc<DashboardStore>,
    pub notifications: Arc<NotificationStore>,
    pub reports: Arc<ReportService>,
}

// Application state for HTTP handlers
use crate::application::options_service::OptionsService;
use crate::application::query_renderer::ChartService;

#[derive(Clone)]
pub struct AppState {
    pub chart_service: ChartService,
    pub options_service: OptionsService,
}

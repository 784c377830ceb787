// Application layer - Use cases over the chart repository and template store
pub mod chart_repository;
pub mod filter_compiler;
pub mod options_service;
pub mod pivot;
pub mod query_renderer;
pub mod template_store;

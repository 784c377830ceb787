// Domain layer - Chart request, catalog and payload models
pub mod catalog;
pub mod chart;
pub mod filter;
pub mod options;
pub mod palette;

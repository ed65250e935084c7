pub mod reports;

pub use reports::AnalyticsService;

// Domain layer - Pure data models and derivations
pub mod alerts;
pub mod chart;
pub mod dashboard;
pub mod installation;
pub mod metrics;
pub mod telemetry;

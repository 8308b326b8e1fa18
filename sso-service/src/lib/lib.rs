pub mod cli;
pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod telemetry;

pub use domain::identity;
pub use outbound::repositories;

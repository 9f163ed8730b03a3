pub mod configuration;
pub mod dialog;
pub mod domain;
pub mod form;
pub mod operations;
pub mod routes;
pub mod startup;
pub mod store;
pub mod telemetry;
pub mod workspace;

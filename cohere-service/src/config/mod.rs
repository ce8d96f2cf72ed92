pub mod cohere_config;
pub mod cohere_models;
pub mod default_config;

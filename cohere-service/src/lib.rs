//! Cohere clients used by the retrieval pipeline.
//!
//! - [`services::generate_service::GenerateService`]: `/v1/generate`
//! - [`services::rerank_service::RerankService`]: `/v1/rerank`
//!
//! Both are built from one [`config::cohere_config::CohereConfig`], usually
//! loaded with [`config::default_config::config_from_env`], and are meant to be
//! constructed once and shared behind `Arc`.

pub mod config;
pub mod error_handler;
pub mod services;
pub mod telemetry;

pub use config::cohere_config::CohereConfig;
pub use config::cohere_models::{GenerationModel, RerankModel};
pub use error_handler::{CohereError, ConfigError};
pub use services::generate_service::{GenerateParams, GenerateService};
pub use services::rerank_service::{RerankHit, RerankService};

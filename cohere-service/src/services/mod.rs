pub mod generate_service;
pub(crate) mod http_client;
pub mod rerank_service;

pub mod candidate;
pub mod language;
pub mod search_query;
pub mod weaviate_config;

//! Article pre-search over Weaviate GraphQL.
//!
//! Public API:
//! - [`WeaviateClient::search`]: dispatch on [`SearchStrategy`]
//! - [`WeaviateClient::search_keyword`], [`WeaviateClient::search_dense`],
//!   [`WeaviateClient::search_hybrid`]: one strategy each, same contract

pub mod errors;
pub mod graphql;
pub mod structs;
mod weaviate_client;

pub use errors::wiki_search_error::{Result, WikiSearchError};
pub use structs::candidate::Candidate;
pub use structs::language::Language;
pub use structs::search_query::{SearchQuery, SearchStrategy};
pub use structs::weaviate_config::WeaviateConfig;
pub use weaviate_client::{WeaviateClient, parse_get_response};

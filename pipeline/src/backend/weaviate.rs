use wiki_search::{Candidate, SearchQuery, WeaviateClient, WikiSearchError};

use super::{BackendFuture, SearchBackend};

impl SearchBackend for WeaviateClient {
    fn search<'a>(&'a self, query: &'a SearchQuery) -> BackendFuture<'a, Vec<Candidate>, WikiSearchError> {
        Box::pin(async move { WeaviateClient::search(self, query).await })
    }
}

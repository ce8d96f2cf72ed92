pub mod wiki_search_error;

pub mod health_route;
pub mod languages_route;
pub mod search;

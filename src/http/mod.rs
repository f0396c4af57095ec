pub mod openapi;
pub mod routes;
pub mod routing;
pub mod types;

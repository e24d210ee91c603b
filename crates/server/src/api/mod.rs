pub mod handlers;
pub mod intake;
pub mod middleware;
pub mod packaging;
pub mod routes;
pub mod tmdb;
pub mod torrents;

pub use routes::create_router;

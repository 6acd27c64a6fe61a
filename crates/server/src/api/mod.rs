pub mod actors;
pub mod handlers;
pub mod routes;
pub mod sessions;

pub use routes::create_router;

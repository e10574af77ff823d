//! API Module
//!
//! Request dispatch for the static content server.
//!
//! # Routes
//! - `GET /profile/<token>` - the profile page (`/profile.html`)
//! - `GET <anything else>` - the home page (`/index.html`)
//! - `POST`, other methods, malformed requests - the system 404 page

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{create_routes, RoutePattern, RouteTable, HOME_PAGE, PROFILE_PAGE};

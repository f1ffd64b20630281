//! Member profiles: creation, lookup and browsing.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/profiles` | Create a profile (email must be unique) |
//! | GET | `/api/profiles?search=&intent=` | List profiles, newest first, optionally filtered |
//! | GET | `/api/profiles/{id}` | Get one profile |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ProfileService;

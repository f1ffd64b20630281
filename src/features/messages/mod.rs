//! Direct messages between members, addressed by email.
//!
//! Messages are fetched on demand; there is no push delivery.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/messages?profileEmail=&counterpartEmail=` | Conversation between two addresses |
//! | POST | `/api/messages` | Send a message |
//! | GET | `/api/profiles/{id}/messages?from=` | Conversation with a profile owner |
//! | POST | `/api/profiles/{id}/messages` | Message a profile owner |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::MessageService;

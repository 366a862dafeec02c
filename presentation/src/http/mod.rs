//! HTTP API
//!
//! | Method | Path                                        | Handler                |
//! |--------|---------------------------------------------|------------------------|
//! | GET    | `/`                                         | health                 |
//! | GET    | `/api/conversations`                        | list                   |
//! | POST   | `/api/conversations`                        | create                 |
//! | GET    | `/api/conversations/{id}`                   | get                    |
//! | DELETE | `/api/conversations/{id}`                   | delete                 |
//! | POST   | `/api/conversations/{id}/message`           | full council turn      |
//! | POST   | `/api/conversations/{id}/message/stream`    | streamed council turn  |

pub mod error;
pub mod handlers;
pub mod routes;
pub mod sse;
pub mod state;


pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;

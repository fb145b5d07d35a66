// Web frontend module
pub mod routes;
pub mod server;
pub mod typing;

pub use routes::{create_router, AppError, AppState};
pub use server::{WebServer, WebServerConfig};
pub use typing::{typing_response, typing_stream};

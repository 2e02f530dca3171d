pub mod http;
pub mod pipeline;

pub use http::{build_router, start_server, AppState};

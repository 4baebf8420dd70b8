mod http_server;

pub use http_server::{HealthResponse, HttpServer, HttpState, REQUEST_TIMEOUT};

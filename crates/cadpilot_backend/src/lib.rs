mod env;
mod http_backend;

pub use env::backend_base_url;
pub use http_backend::HttpBackend;

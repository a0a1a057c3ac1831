pub mod dom;
pub mod http;

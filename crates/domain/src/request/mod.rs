//! HTTP Request domain types

mod auth;
mod body;
mod header;
mod method;
mod query;
mod spec;

pub use auth::AuthConfig;
pub use body::BodyType;
pub use header::{Header, find_header};
pub use method::HttpMethod;
pub use query::QueryParam;
pub use spec::Request;

pub mod form;
pub mod request;

pub use form::parse_str;
pub use request::{InputSource, RequestContext};

mod failure_policy;
mod handler;
mod request;

pub use failure_policy::*;
pub use handler::*;
pub use request::*;

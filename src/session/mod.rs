pub mod builder;
pub mod engine;
pub mod input;
pub mod models;
pub mod script;
pub mod validator;

pub use engine::Session;
pub use models::{Request, ResponseCode, SessionError};

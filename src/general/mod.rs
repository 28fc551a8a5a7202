pub mod cast;
pub mod infer;
pub mod logging;
pub mod message;

pub mod base_instance;
pub mod health;
pub mod id;

pub use base_instance::*;
pub use health::*;
pub use id::*;

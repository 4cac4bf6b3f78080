pub mod base_pool;
pub mod overlay;

pub use base_pool::*;
pub use overlay::*;

pub mod clock;
pub mod dispatch;
pub mod encounter;
pub mod event;
pub mod instance;
pub mod observed;
pub mod pool;
pub mod pressure;
pub mod registry;
pub mod resolver;
pub mod result;
pub mod scheduler;
pub mod statics;
pub mod summary;
pub mod template;
pub mod tick;

pub use clock::*;
pub use dispatch::*;
pub use encounter::*;
pub use event::*;
pub use instance::*;
pub use observed::*;
pub use pool::*;
pub use pressure::*;
pub use registry::*;
pub use result::*;
pub use statics::*;
pub use summary::*;
pub use template::*;
pub use tick::*;

pub mod adaptive;
pub mod bestiary;
pub mod effect;
pub mod error;
pub mod force;
pub mod moves;
pub mod pattern;
pub mod percentage;
pub mod re;
pub mod record;
pub mod size;
pub mod targeting;
pub mod template;
pub mod transition;

pub use adaptive::*;
pub use bestiary::*;
pub use effect::*;
pub use error::*;
pub use force::*;
pub use moves::*;
pub use pattern::*;
pub use percentage::*;
pub use re::*;
pub use record::*;
pub use size::*;
pub use targeting::*;
pub use template::*;
pub use transition::*;

pub mod card;
pub mod pack;
pub mod pull;

pub use card::*;
pub use pack::*;
pub use pull::*;

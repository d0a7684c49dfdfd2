pub mod config;
pub mod item;
pub mod outline;

pub use config::*;
pub use item::*;
pub use outline::*;

pub mod asset;
pub mod health;
pub mod market;
pub mod network;
pub mod position;

pub use asset::*;
pub use health::*;
pub use market::*;
pub use network::*;
pub use position::*;

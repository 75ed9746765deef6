pub mod approval;
pub mod health_ratio;
pub mod portfolio;
pub mod position_reader;

pub use approval::approve;
pub use health_ratio::*;
pub use portfolio::*;
pub use position_reader::PositionReader;

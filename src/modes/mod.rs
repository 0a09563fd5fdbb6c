pub mod replay;
pub mod train;

pub use replay::ReplayMode;
pub use train::{TrainConfig, TrainMode};

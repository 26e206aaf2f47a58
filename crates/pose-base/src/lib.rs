pub mod logging;
pub mod rect;
pub mod tensor;
pub mod vec2;

pub use logging::{init_file_logger, init_stdout_logger, level_from_env, FileLogger, StdoutLogger};
pub use rect::Rect;
pub use tensor::{Tensor, TensorError, element_count};
pub use vec2::Vec2;

// Re-export log crate so downstream crates can use pose_base::log::*
pub use log;

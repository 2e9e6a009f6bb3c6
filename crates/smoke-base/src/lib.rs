pub mod logging;
pub mod tensor;

pub use logging::{FileLogger, LogConfig, StdoutLogger, init_logger};
pub use tensor::{Tensor, TensorError};

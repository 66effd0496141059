pub mod trainer;
pub mod evaluate;

pub use trainer::{train_step, train_sweep};
pub use evaluate::{accuracy, is_accurate, total_absolute_error};

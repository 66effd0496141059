pub mod absolute;

pub use absolute::AbsoluteError;

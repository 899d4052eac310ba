pub mod file;
pub mod traits;

// Re-export
pub use file::FileDayRepository;
pub use traits::{DayRepository, StoreError};

pub mod day;
pub mod hour;
pub mod stats;

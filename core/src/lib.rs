pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;

pub use config::{AppConfig, ConfigError, ScaleConfig};
pub use error::{LogError, LogResult};
pub use input::{expand_key, parse_args, parse_hour_input, HourInput, ParsedInput};
pub use model::day::{Day, HourMap, HOURS_PER_DAY};
pub use model::hour::{slot_status, Field, HourRecord, HourStatus, Setting};
pub use model::stats::{
    category_counts, field_stats, setting_counts, sleep_awake_split, summarize, DaySummary,
    FieldStats, SleepSplit,
};
pub use repository::{DayRepository, FileDayRepository, StoreError};
pub use service::day_service::DayService;
pub use service::dto::{describe, hour_views, HourView};
pub use time::{date_key, hour_label, parse_date_key, parse_human_date};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::ScaleConfig;
use crate::input::HourInput;
use crate::model::day::Day;
use crate::repository::DayRepository;
use crate::time::{date_key, parse_date_key};

/// Load, change and save whole days through a [`DayRepository`].
///
/// Every mutating call is one read-modify-write. If the change itself fails
/// validation nothing is written.
pub struct DayService<R: DayRepository> {
    repo: R,
    scales: ScaleConfig,
}

impl<R: DayRepository> DayService<R> {
    pub fn new(repo: R, scales: ScaleConfig) -> Self {
        Self { repo, scales }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn get_day(&self, date: NaiveDate) -> Result<Option<Day>> {
        match self.repo.load(&date_key(date)) {
            Ok(day) => Ok(Some(day)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to load {}", date)),
        }
    }

    /// The stored day, or a new empty one using the configured scales.
    pub fn open(&self, date: NaiveDate) -> Result<Day> {
        Ok(self.get_day(date)?.unwrap_or_else(|| {
            debug!(%date, "no stored day, starting empty");
            Day::new(date, self.scales)
        }))
    }

    pub fn record_hour(&self, date: NaiveDate, hour: usize, input: HourInput) -> Result<Day> {
        self.update(date, |day| {
            day.set_hour(hour, input.program, input.strength, input.pain)?;
            Ok(())
        })
    }

    pub fn clear_hour(&self, date: NaiveDate, hour: usize) -> Result<Day> {
        self.update(date, |day| {
            day.clear_hour(hour)?;
            Ok(())
        })
    }

    pub fn clear_day(&self, date: NaiveDate) -> Result<Day> {
        self.update(date, |day| {
            day.clear_all();
            Ok(())
        })
    }

    pub fn copy_forward(&self, date: NaiveDate, source: usize, count: usize) -> Result<Day> {
        self.update(date, |day| {
            day.copy_forward(source, count)?;
            Ok(())
        })
    }

    pub fn list_dates(&self) -> Result<Vec<NaiveDate>> {
        self.repo
            .list_keys()?
            .iter()
            .map(|k| parse_date_key(k))
            .collect()
    }

    fn update<F>(&self, date: NaiveDate, change: F) -> Result<Day>
    where
        F: FnOnce(&mut Day) -> Result<()>,
    {
        let mut day = self.open(date)?;
        change(&mut day)?;
        self.repo
            .save(&day.key(), &day)
            .with_context(|| format!("Failed to save {}", date))?;
        info!(%date, recorded = day.recorded_hours(), "day updated");
        Ok(day)
    }
}

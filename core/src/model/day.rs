use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::ScaleConfig;
use crate::error::{LogError, LogResult};
use crate::model::hour::{Field, HourRecord};
use crate::model::stats::{self, FieldStats};
use crate::time::date_key;

pub const HOURS_PER_DAY: usize = 24;

/// Ordered snapshot of hour index -> slot content.
pub type HourMap = BTreeMap<usize, Option<HourRecord>>;

/// A calendar day split into 24 hour slots.
///
/// Slot `h` covers `h:00` to `(h+1):00` and is filled in once that hour has
/// passed, so slot 14 holds what happened between 14:00 and 15:00.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Day {
    date: NaiveDate,
    scales: ScaleConfig,
    slots: [Option<HourRecord>; HOURS_PER_DAY],
}

impl Day {
    pub fn new(date: NaiveDate, scales: ScaleConfig) -> Self {
        Self {
            date,
            scales,
            slots: [None; HOURS_PER_DAY],
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Storage key, `YYYY-MM-DD`.
    pub fn key(&self) -> String {
        date_key(self.date)
    }

    pub fn scales(&self) -> &ScaleConfig {
        &self.scales
    }

    /// Overwrites whatever was recorded for `hour`.
    pub fn set_hour(&mut self, hour: usize, program: u8, strength: u8, pain: u8) -> LogResult<&mut Self> {
        check_hour(hour)?;
        let record = HourRecord::new(program, strength, pain, &self.scales)?;
        self.slots[hour] = Some(record);
        Ok(self)
    }

    pub fn clear_hour(&mut self, hour: usize) -> LogResult<&mut Self> {
        check_hour(hour)?;
        self.slots[hour] = None;
        Ok(self)
    }

    pub fn clear_all(&mut self) -> &mut Self {
        self.slots = [None; HOURS_PER_DAY];
        self
    }

    pub fn get_hour(&self, hour: usize) -> LogResult<Option<HourRecord>> {
        check_hour(hour)?;
        Ok(self.slots[hour])
    }

    pub fn get_all_hours(&self) -> HourMap {
        self.slots.iter().copied().enumerate().collect()
    }

    /// Slots `start..=end`.
    pub fn get_range(&self, start: usize, end: usize) -> LogResult<HourMap> {
        check_range(start, end)?;
        Ok((start..=end).map(|h| (h, self.slots[h])).collect())
    }

    /// Copies the slot at `source` into the `count` slots that follow it.
    ///
    /// All target indices are checked before anything is written: if the run
    /// would go past hour 23 the day is left untouched and the first index
    /// beyond the day is reported. An empty source copies emptiness.
    pub fn copy_forward(&mut self, source: usize, count: usize) -> LogResult<&mut Self> {
        check_hour(source)?;
        let last = source
            .checked_add(count)
            .filter(|last| *last < HOURS_PER_DAY)
            .ok_or(LogError::OutOfRange { hour: HOURS_PER_DAY })?;

        let record = self.slots[source];
        for slot in &mut self.slots[source + 1..=last] {
            *slot = record;
        }
        Ok(self)
    }

    pub fn recorded_hours(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn field_stats(&self, field: Field) -> LogResult<FieldStats> {
        stats::field_stats(field, &self.get_all_hours())
    }

    pub fn field_stats_between(&self, field: Field, start: usize, end: usize) -> LogResult<FieldStats> {
        stats::field_stats(field, &self.get_range(start, end)?)
    }

    /// Re-checks every stored record against the day's scales.
    pub fn validate(&self) -> LogResult<()> {
        self.slots
            .iter()
            .flatten()
            .try_for_each(|record| record.validate(&self.scales))
    }
}

fn check_hour(hour: usize) -> LogResult<()> {
    if hour >= HOURS_PER_DAY {
        return Err(LogError::OutOfRange { hour });
    }
    Ok(())
}

fn check_range(start: usize, end: usize) -> LogResult<()> {
    check_hour(start)?;
    check_hour(end)?;
    if start > end {
        return Err(LogError::InvalidRange { start, end });
    }
    Ok(())
}

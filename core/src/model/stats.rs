use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{LogError, LogResult};
use crate::model::day::HourMap;
use crate::model::hour::{Field, HourRecord, Setting};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct FieldStats {
    pub min: u8,
    pub max: u8,
    /// Rounded half-up to 2 decimal places.
    pub avg: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SleepSplit {
    pub hours_asleep: usize,
    pub hours_awake: usize,
}

/// Everything a day view usually wants in one pass.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub recorded_hours: usize,
    pub sleep: SleepSplit,
    pub pain: Option<FieldStats>,
    pub program: Option<FieldStats>,
    pub strength: Option<FieldStats>,
    pub program_counts: BTreeMap<u8, usize>,
}

fn records(map: &HourMap) -> impl Iterator<Item = &HourRecord> {
    map.values().flatten()
}

/// Min, max and average of `field` over the non-empty slots in `map`.
///
/// Asleep hours (pain 0) are left out when `field` is pain, and only then.
pub fn field_stats(field: Field, map: &HourMap) -> LogResult<FieldStats> {
    let values: Vec<u8> = records(map)
        .map(|r| r.get(field))
        .filter(|v| field != Field::Pain || *v != 0)
        .collect();

    let (Some(min), Some(max)) = (values.iter().min(), values.iter().max()) else {
        return Err(LogError::NoData { field });
    };
    let sum: u64 = values.iter().map(|v| u64::from(*v)).sum();

    Ok(FieldStats {
        min: *min,
        max: *max,
        avg: round_avg(sum, values.len() as u64),
    })
}

/// `sum / count` rounded half-up to hundredths. Done in integers so that
/// `.xx5` cases aren't at the mercy of binary floating point.
fn round_avg(sum: u64, count: u64) -> f64 {
    let hundredths = (sum * 200 + count) / (count * 2);
    hundredths as f64 / 100.0
}

/// How many hours each value of `setting` was in use. Off (0) is counted.
pub fn category_counts(setting: Setting, map: &HourMap) -> BTreeMap<u8, usize> {
    let field = Field::from(setting);
    let mut counts = BTreeMap::new();
    for record in records(map) {
        *counts.entry(record.get(field)).or_insert(0) += 1;
    }
    counts
}

/// How many hours each `(program, strength)` combination was in use.
pub fn setting_counts(map: &HourMap) -> BTreeMap<(u8, u8), usize> {
    let mut counts = BTreeMap::new();
    for record in records(map) {
        *counts.entry((record.program(), record.strength())).or_insert(0) += 1;
    }
    counts
}

pub fn sleep_awake_split(map: &HourMap) -> SleepSplit {
    records(map).fold(SleepSplit::default(), |mut split, r| {
        if r.is_asleep() {
            split.hours_asleep += 1;
        } else {
            split.hours_awake += 1;
        }
        split
    })
}

pub fn summarize(map: &HourMap) -> DaySummary {
    DaySummary {
        recorded_hours: records(map).count(),
        sleep: sleep_awake_split(map),
        pain: field_stats(Field::Pain, map).ok(),
        program: field_stats(Field::Program, map).ok(),
        strength: field_stats(Field::Strength, map).ok(),
        program_counts: category_counts(Setting::Program, map),
    }
}

use serde::{Deserialize, Serialize};

use crate::model::day::HourMap;
use crate::model::hour::{slot_status, HourRecord, HourStatus};
use crate::time::hour_label;

/// Flattened slot for listings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HourView {
    pub hour: usize,
    pub period: String, // "1400 - 1500"
    pub program: Option<u8>,
    pub strength: Option<u8>,
    pub pain: Option<u8>,
    pub description: String,
}

impl HourView {
    pub fn from_slot(hour: usize, slot: Option<&HourRecord>) -> Self {
        Self {
            hour,
            period: hour_label(hour),
            program: slot.map(|r| r.program()),
            strength: slot.map(|r| r.strength()),
            pain: slot.map(|r| r.pain()),
            description: describe(slot_status(slot)),
        }
    }
}

pub fn describe(status: HourStatus) -> String {
    match status {
        HourStatus::Empty => "NO RECORD".to_string(),
        HourStatus::OffAndAsleep => "DEVICE OFF & ASLEEP".to_string(),
        HourStatus::OffWithPain { pain } => format!("Pain: {} | DEVICE OFF", pain),
        HourStatus::AsleepWithDevice { program, strength } => {
            format!("ASLEEP | Program: {} Strength: {}", program, strength)
        }
        HourStatus::Normal { program, strength, pain } => {
            format!("Pain: {} | Program: {} Strength: {}", pain, program, strength)
        }
    }
}

pub fn hour_views(map: &HourMap) -> Vec<HourView> {
    map.iter()
        .map(|(hour, slot)| HourView::from_slot(*hour, slot.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScaleConfig;
    use crate::model::day::Day;
    use chrono::NaiveDate;

    #[test]
    fn test_views_cover_the_four_cases_and_empties() {
        let mut day = Day::new(NaiveDate::from_ymd_opt(2022, 7, 4).unwrap(), ScaleConfig::default());
        day.set_hour(1, 0, 0, 0).unwrap();
        day.set_hour(2, 0, 3, 6).unwrap();
        day.set_hour(3, 2, 7, 0).unwrap();
        day.set_hour(4, 2, 7, 4).unwrap();

        let views = hour_views(&day.get_range(0, 4).unwrap());
        let descriptions: Vec<&str> = views.iter().map(|v| v.description.as_str()).collect();
        assert_eq!(
            descriptions,
            vec![
                "NO RECORD",
                "DEVICE OFF & ASLEEP",
                "Pain: 6 | DEVICE OFF",
                "ASLEEP | Program: 2 Strength: 7",
                "Pain: 4 | Program: 2 Strength: 7",
            ]
        );
        assert_eq!(views[4].period, "0400 - 0500");
        assert_eq!(views[0].pain, None);
        assert_eq!(views[4].strength, Some(7));
    }
}

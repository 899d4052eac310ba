use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ScaleConfig;
use crate::error::{LogError, LogResult};

/// One of the three values stored per hour.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Program,
    Strength,
    Pain,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Program, Field::Strength, Field::Pain];

    pub fn name(&self) -> &'static str {
        match self {
            Field::Program => "program",
            Field::Strength => "strength",
            Field::Pain => "pain",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "program" | "prog" | "p" => Ok(Field::Program),
            "strength" | "str" | "s" => Ok(Field::Strength),
            "pain" => Ok(Field::Pain),
            _ => Err(format!("Unknown field: '{}' (expected program, strength or pain)", s)),
        }
    }
}

/// Device settings that can be counted per value. Pain is deliberately absent.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Setting {
    Program,
    Strength,
}

impl From<Setting> for Field {
    fn from(setting: Setting) -> Self {
        match setting {
            Setting::Program => Field::Program,
            Setting::Strength => Field::Strength,
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Field::from(*self), f)
    }
}

impl FromStr for Setting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<Field>() {
            Ok(Field::Program) => Ok(Setting::Program),
            Ok(Field::Strength) => Ok(Setting::Strength),
            _ => Err(format!("Unknown setting: '{}' (expected program or strength)", s)),
        }
    }
}

/// How a single slot reads to a person looking at the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourStatus {
    Empty,
    OffAndAsleep,
    OffWithPain { pain: u8 },
    AsleepWithDevice { program: u8, strength: u8 },
    Normal { program: u8, strength: u8, pain: u8 },
}

/// What happened during one clock hour: device program and strength, plus the
/// reported pain level.
///
/// A program of 0 means the device was off, a pain of 0 means asleep. Values
/// are checked once in [`HourRecord::new`]; there are no setters, a slot is
/// replaced with a whole new record instead.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HourRecord {
    program: u8,
    strength: u8,
    pain: u8,
}

impl HourRecord {
    pub fn new(program: u8, strength: u8, pain: u8, scales: &ScaleConfig) -> LogResult<Self> {
        check(Field::Program, program, scales)?;
        check(Field::Strength, strength, scales)?;
        check(Field::Pain, pain, scales)?;
        Ok(Self { program, strength, pain })
    }

    pub fn program(&self) -> u8 {
        self.program
    }

    pub fn strength(&self) -> u8 {
        self.strength
    }

    pub fn pain(&self) -> u8 {
        self.pain
    }

    pub fn get(&self, field: Field) -> u8 {
        match field {
            Field::Program => self.program,
            Field::Strength => self.strength,
            Field::Pain => self.pain,
        }
    }

    pub fn is_device_off(&self) -> bool {
        self.program == 0
    }

    pub fn is_asleep(&self) -> bool {
        self.pain == 0
    }

    pub fn status(&self) -> HourStatus {
        match (self.is_device_off(), self.is_asleep()) {
            (true, true) => HourStatus::OffAndAsleep,
            (true, false) => HourStatus::OffWithPain { pain: self.pain },
            (false, true) => HourStatus::AsleepWithDevice {
                program: self.program,
                strength: self.strength,
            },
            (false, false) => HourStatus::Normal {
                program: self.program,
                strength: self.strength,
                pain: self.pain,
            },
        }
    }

    /// Re-checks a record against `scales`, e.g. after loading it from disk.
    pub fn validate(&self, scales: &ScaleConfig) -> LogResult<()> {
        for field in Field::ALL {
            check(field, self.get(field), scales)?;
        }
        Ok(())
    }
}

fn check(field: Field, value: u8, scales: &ScaleConfig) -> LogResult<()> {
    let max = scales.max_for(field);
    if value > max {
        return Err(LogError::Validation { field, value, max });
    }
    Ok(())
}

/// Status of an optional slot; `None` reads as [`HourStatus::Empty`].
pub fn slot_status(slot: Option<&HourRecord>) -> HourStatus {
    slot.map(HourRecord::status).unwrap_or(HourStatus::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scales() -> ScaleConfig {
        ScaleConfig::default()
    }

    #[test]
    fn test_accepts_every_value_in_bounds() {
        let s = scales();
        for program in 0..=s.program_max {
            for strength in 0..=s.strength_max {
                for pain in 0..=s.pain_max {
                    let rec = HourRecord::new(program, strength, pain, &s).unwrap();
                    assert_eq!(rec.program(), program);
                    assert_eq!(rec.strength(), strength);
                    assert_eq!(rec.pain(), pain);
                }
            }
        }
    }

    #[test]
    fn test_rejects_each_field_just_past_its_bound() {
        let s = scales();
        assert_eq!(
            HourRecord::new(6, 0, 0, &s).unwrap_err(),
            LogError::Validation { field: Field::Program, value: 6, max: 5 }
        );
        assert_eq!(
            HourRecord::new(0, 15, 0, &s).unwrap_err(),
            LogError::Validation { field: Field::Strength, value: 15, max: 14 }
        );
        assert_eq!(
            HourRecord::new(0, 0, 11, &s).unwrap_err(),
            LogError::Validation { field: Field::Pain, value: 11, max: 10 }
        );
        assert!(HourRecord::new(255, 255, 255, &s).is_err());
    }

    #[test]
    fn test_custom_scales() {
        let s = ScaleConfig { program_max: 9, strength_max: 20, pain_max: 5 };
        assert!(HourRecord::new(9, 20, 5, &s).is_ok());
        assert!(HourRecord::new(0, 0, 6, &s).is_err());

        let rec = HourRecord::new(9, 20, 5, &s).unwrap();
        assert!(rec.validate(&s).is_ok());
        assert!(rec.validate(&ScaleConfig::default()).is_err());
    }

    #[test]
    fn test_status_four_cases() {
        let s = scales();
        let status = |p, st, pa| HourRecord::new(p, st, pa, &s).unwrap().status();

        assert_eq!(status(0, 0, 0), HourStatus::OffAndAsleep);
        assert_eq!(status(0, 3, 6), HourStatus::OffWithPain { pain: 6 });
        assert_eq!(
            status(2, 7, 0),
            HourStatus::AsleepWithDevice { program: 2, strength: 7 }
        );
        assert_eq!(
            status(2, 7, 4),
            HourStatus::Normal { program: 2, strength: 7, pain: 4 }
        );
        assert_eq!(slot_status(None), HourStatus::Empty);
    }

    #[test]
    fn test_field_and_setting_parsing() {
        assert_eq!("Pain".parse::<Field>().unwrap(), Field::Pain);
        assert_eq!("prog".parse::<Field>().unwrap(), Field::Program);
        assert!("mood".parse::<Field>().is_err());

        assert_eq!("strength".parse::<Setting>().unwrap(), Setting::Strength);
        assert!("pain".parse::<Setting>().is_err());
        assert_eq!(Field::from(Setting::Program), Field::Program);
    }
}

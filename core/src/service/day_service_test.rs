use crate::config::ScaleConfig;
use crate::error::LogError;
use crate::input::HourInput;
use crate::model::day::Day;
use crate::repository::{DayRepository, StoreError};
use crate::service::day_service::DayService;
use chrono::NaiveDate;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

#[derive(Default)]
struct MockDayRepo {
    days: RefCell<BTreeMap<String, Day>>,
    saves: Cell<usize>,
    fail_loads: bool,
}

impl DayRepository for MockDayRepo {
    fn load(&self, key: &str) -> Result<Day, StoreError> {
        if self.fail_loads {
            return Err(StoreError::Corrupt("broken".to_string()));
        }
        self.days
            .borrow()
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    fn save(&self, key: &str, day: &Day) -> Result<(), StoreError> {
        self.saves.set(self.saves.get() + 1);
        self.days.borrow_mut().insert(key.to_string(), day.clone());
        Ok(())
    }

    fn list_keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.days.borrow().keys().cloned().collect())
    }
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 7, 4).unwrap()
}

fn input(program: u8, strength: u8, pain: u8) -> HourInput {
    HourInput { program, strength, pain }
}

fn service() -> DayService<MockDayRepo> {
    DayService::new(MockDayRepo::default(), ScaleConfig::default())
}

#[test]
fn test_open_unknown_date_gives_empty_day() {
    let service = service();
    let day = service.open(date()).unwrap();
    assert_eq!(day.date(), date());
    assert_eq!(day.recorded_hours(), 0);
    assert_eq!(*day.scales(), ScaleConfig::default());
    assert!(service.get_day(date()).unwrap().is_none());
}

#[test]
fn test_open_uses_configured_scales_for_new_days() {
    let scales = ScaleConfig { program_max: 8, strength_max: 20, pain_max: 10 };
    let service = DayService::new(MockDayRepo::default(), scales);
    let day = service.record_hour(date(), 3, input(8, 20, 2)).unwrap();
    assert_eq!(*day.scales(), scales);
}

#[test]
fn test_record_hour_persists() {
    let service = service();
    service.record_hour(date(), 14, input(2, 7, 4)).unwrap();

    let stored = service.get_day(date()).unwrap().unwrap();
    let rec = stored.get_hour(14).unwrap().unwrap();
    assert_eq!((rec.program(), rec.strength(), rec.pain()), (2, 7, 4));
    assert_eq!(service.list_dates().unwrap(), vec![date()]);
}

#[test]
fn test_invalid_change_is_not_saved() {
    let service = service();
    let err = service.record_hour(date(), 14, input(9, 7, 4)).unwrap_err();
    assert!(matches!(err.downcast_ref::<LogError>(), Some(LogError::Validation { .. })));

    let err = service.copy_forward(date(), 20, 10).unwrap_err();
    assert!(err.downcast_ref::<LogError>().unwrap().is_out_of_range());

    assert_eq!(service.repo_saves(), 0);
    assert!(service.get_day(date()).unwrap().is_none());
}

#[test]
fn test_copy_forward_and_clear_round_trip() {
    let service = service();
    service.record_hour(date(), 1, input(0, 0, 0)).unwrap();
    let day = service.copy_forward(date(), 1, 5).unwrap();
    assert_eq!(day.recorded_hours(), 6);

    let day = service.clear_hour(date(), 3).unwrap();
    assert_eq!(day.get_hour(3).unwrap(), None);
    assert_eq!(service.get_day(date()).unwrap().unwrap().recorded_hours(), 5);

    let day = service.clear_day(date()).unwrap();
    assert_eq!(day.recorded_hours(), 0);
    assert_eq!(service.get_day(date()).unwrap().unwrap().recorded_hours(), 0);
}

#[test]
fn test_load_failure_surfaces() {
    let repo = MockDayRepo { fail_loads: true, ..Default::default() };
    let service = DayService::new(repo, ScaleConfig::default());
    assert!(service.open(date()).is_err());
    assert!(service.record_hour(date(), 1, input(1, 1, 1)).is_err());
}

impl DayService<MockDayRepo> {
    fn repo_saves(&self) -> usize {
        self.repo().saves.get()
    }
}

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde_json;
use tracing::{debug, info};

use crate::model::day::Day;
use crate::repository::traits::{DayRepository, StoreError};

const DEFAULT_FILE_NAME: &str = "days.json";
const DEFAULT_DIR_NAME: &str = ".stimlog";

type DayMap = BTreeMap<String, Day>;

/// All days in a single pretty-printed JSON object, keyed by date.
#[derive(Clone)]
pub struct FileDayRepository {
    file_path: PathBuf,
}

impl FileDayRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self, StoreError> {
        let mut path = match base_dir {
            Some(dir) => dir,
            None => {
                let home_dir = dirs::home_dir().ok_or(StoreError::NoHomeDir)?;
                home_dir.join(DEFAULT_DIR_NAME)
            }
        };
        fs::create_dir_all(&path)?; // Ensure the directory exists
        path.push(DEFAULT_FILE_NAME);

        if !path.exists() {
            info!(path = %path.display(), "creating day store");
            let mut writer = BufWriter::new(File::create(&path)?);
            serde_json::to_writer_pretty(&mut writer, &DayMap::new())?;
            writer.flush()?;
        }

        Ok(FileDayRepository { file_path: path })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn read_days(&self) -> Result<DayMap, StoreError> {
        let file = File::open(&self.file_path)?;
        let reader = BufReader::new(file);
        let days = serde_json::from_reader(reader)?;
        Ok(days)
    }

    fn write_days(&self, days: &DayMap) -> Result<(), StoreError> {
        let file = File::create(&self.file_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, days)?;
        writer.flush()?;
        Ok(())
    }
}

impl DayRepository for FileDayRepository {
    fn load(&self, key: &str) -> Result<Day, StoreError> {
        let mut days = self.read_days()?;
        let day = days
            .remove(key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;

        if day.key() != key {
            return Err(StoreError::Corrupt(format!(
                "entry {} holds day {}",
                key,
                day.key()
            )));
        }
        day.validate()
            .map_err(|e| StoreError::Corrupt(format!("entry {}: {}", key, e)))?;

        debug!(key, recorded = day.recorded_hours(), "loaded day");
        Ok(day)
    }

    fn save(&self, key: &str, day: &Day) -> Result<(), StoreError> {
        if day.key() != key {
            return Err(StoreError::KeyMismatch {
                key: key.to_string(),
                date: day.key(),
            });
        }
        let mut days = self.read_days()?;
        days.insert(key.to_string(), day.clone());
        self.write_days(&days)?;
        debug!(key, recorded = day.recorded_hours(), "saved day");
        Ok(())
    }

    fn list_keys(&self) -> Result<Vec<String>, StoreError> {
        // BTreeMap keys come out sorted, and YYYY-MM-DD sorts by date.
        Ok(self.read_days()?.into_keys().collect())
    }
}

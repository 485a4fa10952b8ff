use std::fs;
use std::path::Path;

use anyhow::Context;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::TaskboardError;

/// Schedule constants shared by the normalizer and both grid builders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Calendar date of day offset 1.
    pub project_epoch: NaiveDate,
    /// The daily grid always extends at least this far.
    pub base_end: NaiveDate,
    pub max_schedule_days: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            project_epoch: ymd(2025, 11, 25),
            base_end: ymd(2026, 3, 31),
            max_schedule_days: 180,
        }
    }
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

impl ScheduleConfig {
    /// Clip a day offset into `[1, max_schedule_days]`.
    pub fn clip_day(&self, day: i64) -> u32 {
        day.clamp(1, i64::from(self.max_schedule_days.max(1))) as u32
    }

    /// Day offset of a date relative to the epoch, clipped.
    pub fn day_of(&self, date: NaiveDate) -> u32 {
        self.clip_day((date - self.project_epoch).num_days() + 1)
    }

    /// Calendar date of a (1-based) day offset. Saturates at the end of the
    /// representable calendar.
    pub fn date_of(&self, day: u32) -> NaiveDate {
        self.project_epoch
            .checked_add_signed(Duration::days(i64::from(day) - 1))
            .unwrap_or(NaiveDate::MAX)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.max_schedule_days >= 1, "max_schedule_days must be at least 1");
        anyhow::ensure!(
            self.project_epoch
                .checked_add_signed(Duration::days(i64::from(self.max_schedule_days)))
                .is_some(),
            "max_schedule_days {} runs past the last representable date",
            self.max_schedule_days
        );
        anyhow::ensure!(
            self.base_end >= self.project_epoch,
            "base_end {} is before project_epoch {}",
            self.base_end,
            self.project_epoch
        );
        Ok(())
    }
}

fn read_config(path: &Path) -> anyhow::Result<ScheduleConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let config: ScheduleConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

/// Load the schedule config. A missing file means defaults.
pub fn load(path: &Path) -> Result<ScheduleConfig, TaskboardError> {
    if !path.exists() {
        return Ok(ScheduleConfig::default());
    }
    read_config(path).map_err(|e| TaskboardError::config(format!("{e:#}")))
}

/// Write the default config unless one already exists.
pub fn write_default(path: &Path) -> Result<(), TaskboardError> {
    if path.exists() {
        return Ok(());
    }
    let text = serde_json::to_string_pretty(&ScheduleConfig::default())?;
    fs::write(path, text).map_err(|e| TaskboardError::config(e.to_string()))
}

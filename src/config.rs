//! Settings file layout.
//!
//! `commitart.toml` in the repository root (or a file given with `--config`)
//! can override any default below. Command line flags win over the file. The
//! resolved [`Config`] is handed to each operation; nothing reads it globally.

use crate::error::{ArtError, Result};
use crate::grid::WeekStart;
use crate::journal::DEFAULT_JOURNAL_FILE;
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

pub const CONFIG_FILE: &str = "commitart.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Journal file name, relative to the repository root.
    pub log_file: String,

    /// Commit messages read `<prefix> <date time>`.
    pub message_prefix: String,

    /// Time of day stamped on every generated commit.
    pub commit_time: NaiveTime,

    pub timezone: Timezone,

    pub week_start: WeekStart,

    /// Consecutive failed commits before a batch gives up.
    pub max_consecutive_failures: u32,

    /// Pause between commits, e.g. `50ms`.
    pub pause: Option<String>,

    pub git_binary: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_file: DEFAULT_JOURNAL_FILE.to_string(),
            message_prefix: "Commit for".to_string(),
            commit_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN),
            timezone: Timezone::default(),
            week_start: WeekStart::default(),
            max_consecutive_failures: 3,
            pause: None,
            git_binary: "git".to_string(),
        }
    }
}

impl FromStr for Config {
    type Err = ArtError;

    fn from_str(data: &str) -> Result<Self> {
        let config: Config = toml::from_str(data)?;
        config.validate()?;
        Ok(config)
    }
}

impl Config {
    /// Read `path`; a missing file yields the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(data) => data.parse(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        std::fs::read_to_string(path.as_ref())?.parse()
    }

    fn validate(&self) -> Result<()> {
        if self.log_file.trim().is_empty() {
            return Err(ArtError::Validation("log_file must not be empty".to_string()));
        }
        if self.max_consecutive_failures == 0 {
            return Err(ArtError::Validation(
                "max_consecutive_failures must be at least 1".to_string(),
            ));
        }
        self.pause_duration()?;
        Ok(())
    }

    pub fn pause_duration(&self) -> Result<Duration> {
        match &self.pause {
            Some(pause) => humantime::parse_duration(pause)
                .map_err(|e| ArtError::Validation(format!("invalid pause {pause:?}: {e}"))),
            None => Ok(Duration::ZERO),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.timezone.today()
    }

    /// `date` at the configured commit time in the configured timezone.
    pub fn commit_timestamp(&self, date: NaiveDate) -> Result<DateTime<FixedOffset>> {
        self.timezone.at(date.and_time(self.commit_time))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Timezone {
    #[default]
    Local,
    Utc,
}

impl Timezone {
    pub fn today(self) -> NaiveDate {
        match self {
            Timezone::Local => Local::now().date_naive(),
            Timezone::Utc => Utc::now().date_naive(),
        }
    }

    fn at(self, naive: chrono::NaiveDateTime) -> Result<DateTime<FixedOffset>> {
        match self {
            Timezone::Local => Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.fixed_offset())
                .ok_or_else(|| {
                    ArtError::InvalidDate(format!("{naive} does not exist in the local timezone"))
                }),
            Timezone::Utc => Ok(Utc.from_utc_datetime(&naive).fixed_offset()),
        }
    }
}

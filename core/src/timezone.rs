// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tokio::fs;

/// File name of the preference record inside the state directory.
pub const PREFERENCES_FILE: &str = "timezones.json";

/// Version written by this build.
pub const PREFERENCES_VERSION: u32 = 1;

/// A named clock zone, e.g. `IST` on `Asia/Kolkata`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimezonePreference {
    /// Short label shown under the clock.
    pub label: String,

    /// IANA time zone name.
    pub iana: String,
}

impl TimezonePreference {
    pub fn new(label: impl Into<String>, iana: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            iana: iana.into(),
        }
    }

    /// Resolves the IANA name.
    pub fn tz(&self) -> Result<Tz, TimezoneError> {
        self.iana
            .parse::<Tz>()
            .map_err(|_| TimezoneError::UnknownZone(self.iana.clone()))
    }
}

/// Which of the two clocks a preference belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Slot {
    Primary,
    Secondary,
}

impl Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Slot::Primary => f.write_str("primary"),
            Slot::Secondary => f.write_str("secondary"),
        }
    }
}

impl FromStr for Slot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "primary" => Ok(Slot::Primary),
            "secondary" => Ok(Slot::Secondary),
            _ => Err(format!("Invalid clock slot: {s}")),
        }
    }
}

/// The persisted pair of clock zones.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimezonePreferences {
    pub version: u32,
    pub primary: TimezonePreference,
    pub secondary: TimezonePreference,
}

impl Default for TimezonePreferences {
    fn default() -> Self {
        Self {
            version: PREFERENCES_VERSION,
            primary: TimezonePreference::new("IST", "Asia/Kolkata"),
            secondary: TimezonePreference::new("Dubai", "Asia/Dubai"),
        }
    }
}

impl TimezonePreferences {
    pub fn get(&self, slot: Slot) -> &TimezonePreference {
        match slot {
            Slot::Primary => &self.primary,
            Slot::Secondary => &self.secondary,
        }
    }

    pub fn set(&mut self, slot: Slot, pref: TimezonePreference) {
        match slot {
            Slot::Primary => self.primary = pref,
            Slot::Secondary => self.secondary = pref,
        }
    }

    /// Checks the version and both IANA names.
    pub fn validate(&self) -> Result<(), TimezoneError> {
        if self.version != PREFERENCES_VERSION {
            return Err(TimezoneError::UnsupportedVersion(self.version));
        }
        self.primary.tz()?;
        self.secondary.tz()?;
        Ok(())
    }
}

/// Errors of the timezone preferences and clocks.
#[derive(Debug, thiserror::Error)]
pub enum TimezoneError {
    #[error("unknown IANA time zone: {0}")]
    UnknownZone(String),

    #[error("unsupported preference record version: {0}")]
    UnsupportedVersion(u32),

    #[error("failed to encode preferences: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write preferences to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Reads and writes [`TimezonePreferences`] as JSON in the state directory.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(state_dir: &Path) -> Self {
        Self {
            path: state_dir.join(PREFERENCES_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the record, falling back to the defaults when the file is
    /// missing, unreadable or invalid.
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn load(&self) -> TimezonePreferences {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no preference record, using defaults");
                return TimezonePreferences::default();
            }
            Err(e) => {
                tracing::warn!(err = %e, "failed to read preference record, using defaults");
                return TimezonePreferences::default();
            }
        };

        let prefs = match serde_json::from_str::<TimezonePreferences>(&content) {
            Ok(prefs) => prefs,
            Err(e) => {
                tracing::warn!(err = %e, "corrupt preference record, using defaults");
                return TimezonePreferences::default();
            }
        };

        match prefs.validate() {
            Ok(()) => prefs,
            Err(e) => {
                tracing::warn!(err = %e, "invalid preference record, using defaults");
                TimezonePreferences::default()
            }
        }
    }

    /// Validates and writes the record. Nothing is written if validation fails.
    #[tracing::instrument(skip(self, prefs), fields(path = %self.path.display()))]
    pub async fn save(&self, prefs: &TimezonePreferences) -> Result<(), TimezoneError> {
        prefs.validate()?;
        let content = serde_json::to_string_pretty(prefs)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| TimezoneError::Write {
                    path: parent.to_owned(),
                    source,
                })?;
        }

        fs::write(&self.path, content)
            .await
            .map_err(|source| TimezoneError::Write {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!("preference record saved");
        Ok(())
    }

    /// Replaces one clock and saves.
    pub async fn set(
        &self,
        slot: Slot,
        pref: TimezonePreference,
    ) -> Result<TimezonePreferences, TimezoneError> {
        pref.tz()?;
        let mut prefs = self.load().await;
        prefs.set(slot, pref);
        self.save(&prefs).await?;
        Ok(prefs)
    }

    /// Writes the defaults.
    pub async fn reset(&self) -> Result<TimezonePreferences, TimezoneError> {
        let prefs = TimezonePreferences::default();
        self.save(&prefs).await?;
        Ok(prefs)
    }
}

/// What a clock widget shows at a given instant.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ClockReading {
    pub label: String,

    /// 24-hour `HH:MM:SS`.
    pub time: String,

    /// e.g. `Mon, Jan 5`.
    pub date: String,
}

impl ClockReading {
    pub fn at(now: DateTime<Utc>, pref: &TimezonePreference) -> Result<Self, TimezoneError> {
        let local = now.with_timezone(&pref.tz()?);
        Ok(Self {
            label: pref.label.clone(),
            time: local.format("%H:%M:%S").to_string(),
            date: local.format("%a, %b %-d").to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn defaults_are_valid() {
        let prefs = TimezonePreferences::default();
        assert!(prefs.validate().is_ok());
        assert_eq!(prefs.primary.label, "IST");
        assert_eq!(prefs.secondary.iana, "Asia/Dubai");
    }

    #[test]
    fn rejects_unknown_zone() {
        let pref = TimezonePreference::new("Mars", "Mars/Olympus_Mons");
        assert!(matches!(pref.tz(), Err(TimezoneError::UnknownZone(z)) if z == "Mars/Olympus_Mons"));
    }

    #[test]
    fn reads_clock_in_zone() {
        let now = Utc.with_ymd_and_hms(2026, 1, 5, 4, 0, 7).unwrap();

        let ist = ClockReading::at(now, &TimezonePreference::new("IST", "Asia/Kolkata")).unwrap();
        assert_eq!(ist.time, "09:30:07");
        assert_eq!(ist.date, "Mon, Jan 5");
        assert_eq!(ist.label, "IST");

        let la =
            ClockReading::at(now, &TimezonePreference::new("LA", "America/Los_Angeles")).unwrap();
        assert_eq!(la.time, "20:00:07");
        assert_eq!(la.date, "Sun, Jan 4");
    }

    #[test]
    fn clock_fails_on_unknown_zone() {
        let now = Utc.with_ymd_and_hms(2026, 1, 5, 4, 0, 0).unwrap();
        assert!(ClockReading::at(now, &TimezonePreference::new("X", "Nowhere/City")).is_err());
    }

    #[tokio::test]
    async fn loads_defaults_when_missing() {
        let dir = TempDir::new().unwrap();
        let store = PreferenceStore::new(dir.path());
        assert_eq!(store.load().await, TimezonePreferences::default());
    }

    #[tokio::test]
    async fn saves_and_loads() {
        let dir = TempDir::new().unwrap();
        let store = PreferenceStore::new(&dir.path().join("nested"));

        let prefs = store
            .set(Slot::Secondary, TimezonePreference::new("NYC", "America/New_York"))
            .await
            .unwrap();
        assert_eq!(prefs.secondary.label, "NYC");
        assert_eq!(prefs.primary, TimezonePreferences::default().primary);

        let loaded = store.load().await;
        assert_eq!(loaded, prefs);
    }

    #[tokio::test]
    async fn refuses_to_save_unknown_zone() {
        let dir = TempDir::new().unwrap();
        let store = PreferenceStore::new(dir.path());
        store
            .set(Slot::Primary, TimezonePreference::new("UTC", "UTC"))
            .await
            .unwrap();
        let before = std::fs::read_to_string(store.path()).unwrap();

        let result = store
            .set(Slot::Primary, TimezonePreference::new("Bad", "Not/AZone"))
            .await;
        assert!(matches!(result, Err(TimezoneError::UnknownZone(_))));
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), before);
    }

    #[tokio::test]
    async fn falls_back_on_corrupt_or_invalid_record() {
        let dir = TempDir::new().unwrap();
        let store = PreferenceStore::new(dir.path());

        std::fs::write(store.path(), "{ not json").unwrap();
        assert_eq!(store.load().await, TimezonePreferences::default());

        let invalid = r#"{"version":1,"primary":{"label":"X","iana":"Bogus/Zone"},"secondary":{"label":"Dubai","iana":"Asia/Dubai"}}"#;
        std::fs::write(store.path(), invalid).unwrap();
        assert_eq!(store.load().await, TimezonePreferences::default());

        let future = r#"{"version":9,"primary":{"label":"UTC","iana":"UTC"},"secondary":{"label":"UTC","iana":"UTC"}}"#;
        std::fs::write(store.path(), future).unwrap();
        assert_eq!(store.load().await, TimezonePreferences::default());
    }

    #[tokio::test]
    async fn reset_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let store = PreferenceStore::new(dir.path());
        store
            .set(Slot::Primary, TimezonePreference::new("UTC", "UTC"))
            .await
            .unwrap();
        assert_eq!(store.reset().await.unwrap(), TimezonePreferences::default());
        assert_eq!(store.load().await, TimezonePreferences::default());
    }
}

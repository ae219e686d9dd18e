// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use chrono::{DateTime, Local, NaiveDate};
use tokio::fs;

use crate::layout::monday_of;
use crate::timezone::PreferenceStore;
use crate::{Config, EventSet, LayoutParams, sample_events};

/// Calendar application core: configuration, the loaded events and the
/// timezone preference store.
#[derive(Debug, Clone)]
pub struct Teamcal {
    now: DateTime<Local>,
    config: Config,
    events: EventSet,
    preferences: Option<PreferenceStore>,
}

impl Teamcal {
    /// Creates a new instance with the given configuration.
    pub async fn new(mut config: Config) -> Result<Self, Box<dyn Error>> {
        let now = Local::now();
        config.normalize()?;

        let events = match &config.events_path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading events...");
                let content = fs::read_to_string(path).await.map_err(|e| {
                    format!("Failed to read events file {}: {e}", path.display())
                })?;
                EventSet::from_toml(&content)?
            }
            None => {
                tracing::debug!("no events file configured, using the demo week");
                sample_events()
            }
        };

        let preferences = config.state_dir.as_deref().map(PreferenceStore::new);
        Ok(Self {
            now,
            config,
            events,
            preferences,
        })
    }

    /// The current time in this instance.
    pub fn now(&self) -> DateTime<Local> {
        self.now
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn events(&self) -> &EventSet {
        &self.events
    }

    /// Replaces the loaded events.
    pub fn set_events(&mut self, events: EventSet) {
        self.events = events;
    }

    /// The timezone preference store, if a state directory is available.
    pub fn preferences(&self) -> Result<&PreferenceStore, Box<dyn Error>> {
        self.preferences
            .as_ref()
            .ok_or_else(|| "No state directory available for timezone preferences".into())
    }

    /// Layout parameters for the week containing `date`, or the current week.
    pub fn layout_params(&self, date: Option<NaiveDate>) -> LayoutParams {
        let date = date.unwrap_or_else(|| self.now.date_naive());
        LayoutParams {
            grid: self.config.time_grid(),
            anchor: monday_of(date),
            month: date,
            week_start: self.config.week_start,
            now_indicator: self.config.now_indicator,
        }
    }
}

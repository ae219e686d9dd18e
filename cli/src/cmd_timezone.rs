// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, error::Error};

use chrono::{DateTime, Utc};
use clap::{ArgMatches, Command, arg, value_parser};
use teamcal_core::Teamcal;
use teamcal_core::timezone::{ClockReading, Slot, TimezonePreference, TimezonePreferences};

use crate::table::{Table, TableColumn};

#[derive(Debug, Default, Clone, Copy)]
pub struct CmdTzShow;

impl CmdTzShow {
    pub const NAME: &str = "show";

    pub fn command() -> Command {
        Command::new(Self::NAME).about("Show the clock time zones")
    }

    pub fn from(_matches: &ArgMatches) -> Self {
        Self
    }

    pub async fn run(self, teamcal: &Teamcal) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "showing time zones...");
        let store = teamcal.preferences()?;
        let prefs = store.load().await;
        println!("{}", format_preferences(&prefs, Utc::now()));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdTzSet {
    pub slot: Slot,
    pub iana: String,
    pub label: Option<String>,
}

impl CmdTzSet {
    pub const NAME: &str = "set";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Set the time zone of a clock")
            .arg(arg!(slot: <SLOT> "Which clock to change").value_parser(value_parser!(Slot)))
            .arg(arg!(iana: <ZONE> "IANA time zone name, e.g. Europe/Berlin"))
            .arg(arg!(-l --label <LABEL> "Label shown under the clock"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            slot: matches
                .get_one("slot")
                .copied()
                .expect("slot is required"),
            iana: matches
                .get_one::<String>("iana")
                .cloned()
                .expect("zone is required"),
            label: matches.get_one("label").cloned(),
        }
    }

    pub async fn run(self, teamcal: &Teamcal) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "setting time zone...");
        let label = self.label.unwrap_or_else(|| default_label(&self.iana));
        let pref = TimezonePreference::new(label, self.iana);
        let store = teamcal.preferences()?;
        let prefs = store.set(self.slot, pref).await?;
        println!("{}", format_preferences(&prefs, Utc::now()));
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CmdTzReset;

impl CmdTzReset {
    pub const NAME: &str = "reset";

    pub fn command() -> Command {
        Command::new(Self::NAME).about("Restore the default time zones")
    }

    pub fn from(_matches: &ArgMatches) -> Self {
        Self
    }

    pub async fn run(self, teamcal: &Teamcal) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "resetting time zones...");
        let store = teamcal.preferences()?;
        let prefs = store.reset().await?;
        println!("{}", format_preferences(&prefs, Utc::now()));
        Ok(())
    }
}

/// Label derived from the zone name, `America/New_York` becomes `New York`.
fn default_label(iana: &str) -> String {
    iana.rsplit('/').next().unwrap_or(iana).replace('_', " ")
}

fn format_preferences(prefs: &TimezonePreferences, now: DateTime<Utc>) -> String {
    let rows = [
        (Slot::Primary, &prefs.primary, now),
        (Slot::Secondary, &prefs.secondary, now),
    ];
    let columns = [
        PreferenceColumn::Slot,
        PreferenceColumn::Label,
        PreferenceColumn::Zone,
        PreferenceColumn::Time,
    ];
    Table::new(&columns, &rows).with_header(true).to_string()
}

type PreferenceRow<'a> = (Slot, &'a TimezonePreference, DateTime<Utc>);

#[derive(Debug, Clone, Copy)]
enum PreferenceColumn {
    Slot,
    Label,
    Zone,
    Time,
}

impl<'p> TableColumn<PreferenceRow<'p>> for PreferenceColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            PreferenceColumn::Slot => "Clock",
            PreferenceColumn::Label => "Label",
            PreferenceColumn::Zone => "Zone",
            PreferenceColumn::Time => "Time",
        }
        .into()
    }

    fn format<'a>(&self, (slot, pref, now): &'a PreferenceRow<'p>) -> Cow<'a, str> {
        match self {
            PreferenceColumn::Slot => slot.to_string().into(),
            PreferenceColumn::Label => pref.label.as_str().into(),
            PreferenceColumn::Zone => pref.iana.as_str().into(),
            PreferenceColumn::Time => match ClockReading::at(*now, pref) {
                Ok(reading) => format!("{} {}", reading.time, reading.date).into(),
                Err(e) => e.to_string().into(),
            },
        }
    }
}

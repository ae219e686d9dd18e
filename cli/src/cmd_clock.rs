// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io::Write, time::Duration};

use chrono::{DateTime, Utc};
use clap::{ArgMatches, Command, arg};
use colored::Colorize;
use teamcal_core::Teamcal;
use teamcal_core::timezone::{ClockReading, TimezoneError, TimezonePreferences};

#[derive(Debug, Clone, Copy)]
pub struct CmdClock {
    pub watch: bool,
}

impl CmdClock {
    pub const NAME: &str = "clock";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show the primary and secondary clocks")
            .arg(arg!(-w --watch "Keep updating every second until interrupted"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            watch: matches.get_flag("watch"),
        }
    }

    pub async fn run(self, teamcal: &Teamcal) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "showing clocks...");
        let store = teamcal.preferences()?;
        let prefs = store.load().await;

        if !self.watch {
            println!("{}", format_clocks(&prefs, Utc::now())?);
            return Ok(());
        }

        let mut ticker = tokio::time::interval(Duration::from_secs(1));
        let mut stdout = std::io::stdout();
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    write!(stdout, "\r{}", format_clocks(&prefs, Utc::now())?)?;
                    stdout.flush()?;
                }
                res = tokio::signal::ctrl_c() => {
                    res?;
                    tracing::debug!("interrupted, stopping clocks");
                    break;
                }
            }
        }
        writeln!(stdout)?;
        Ok(())
    }
}

/// Both clocks on one line, primary first.
pub fn format_clocks(
    prefs: &TimezonePreferences,
    now: DateTime<Utc>,
) -> Result<String, TimezoneError> {
    let primary = ClockReading::at(now, &prefs.primary)?;
    let secondary = ClockReading::at(now, &prefs.secondary)?;
    Ok(format!(
        "{}  {}",
        format_reading(&primary),
        format_reading(&secondary)
    ))
}

fn format_reading(reading: &ClockReading) -> String {
    format!(
        "{} {} {}",
        reading.label.bold(),
        reading.time,
        reading.date.dimmed()
    )
}

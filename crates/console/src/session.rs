//! Interactive session: parse a line, run it against the yard, render the result.

use thiserror::Error;

use boardstock_core::DomainError;
use boardstock_infra::{Yard, YardError};
use boardstock_inventory::{Dimensions, Specification, WarningSettings, measure};

use crate::command::{Command, CommandError, SettingsChange};
use crate::view;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SessionError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Yard(#[from] YardError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("warehouse {0:?} has no stock to take")]
    NothingToTake(String),

    #[error("failed to export movements: {0}")]
    Export(String),
}

/// What the caller should do after a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Print the text and keep reading.
    Continue(String),
    Quit,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    yard: Yard,
}

impl Session {
    pub fn new(yard: Yard) -> Self {
        Self { yard }
    }

    pub fn yard(&self) -> &Yard {
        &self.yard
    }

    /// The screen shown at startup.
    pub fn overview(&self) -> String {
        view::overview(&self.yard)
    }

    /// Parse and run one input line. Blank lines produce empty output.
    pub fn execute_line(&mut self, line: &str) -> Result<Outcome, SessionError> {
        match Command::parse(line)? {
            Some(command) => self.execute(command),
            None => Ok(Outcome::Continue(String::new())),
        }
    }

    pub fn execute(&mut self, command: Command) -> Result<Outcome, SessionError> {
        let text = match command {
            Command::Quit => return Ok(Outcome::Quit),
            Command::Help => view::HELP.to_string(),
            Command::List => view::yard_tiles(&self.yard),
            Command::Totals => view::totals_report(&self.yard.totals(), &self.yard.settings()),
            Command::History { warehouse, json } => {
                let warehouse = match &warehouse {
                    Some(name) => Some(self.yard.warehouse(name)?),
                    None => None,
                };
                if json {
                    view::history_json(&self.yard, warehouse)
                        .map_err(|e| SessionError::Export(e.to_string()))?
                } else {
                    view::history(&self.yard, warehouse)
                }
            }
            Command::Show { warehouse } => {
                let warehouse = self.yard.warehouse(&warehouse)?;
                view::warehouse_detail(warehouse, &self.yard.settings())
            }
            Command::Add { name } => {
                self.yard.add_warehouse(&name)?;
                format!("added warehouse {:?}\n\n{}", name.trim(), view::yard_tiles(&self.yard))
            }
            Command::Calc {
                length,
                width,
                thickness,
                counts,
            } => {
                let dims = Dimensions::new(length, width, thickness)?;
                view::measurement(&measure(&dims, counts)?)
            }
            Command::Store {
                warehouse,
                length,
                width,
                thickness,
                counts,
            } => {
                let dims = Dimensions::new(length, width, thickness)?;
                let stored = self.yard.store(&warehouse, &dims, counts)?;
                format!(
                    "stored {:.3} 方 of {} in {}\n\n{}",
                    stored.volume,
                    stored.specification,
                    warehouse.trim(),
                    self.detail(&warehouse)?
                )
            }
            Command::Take {
                warehouse,
                specification,
                counts,
            } => {
                if self.yard.warehouse(&warehouse)?.is_empty() {
                    return Err(SessionError::NothingToTake(warehouse.trim().to_string()));
                }
                let specification: Specification = specification.parse()?;
                let taken = self.yard.take(&warehouse, &specification, counts)?;
                format!(
                    "took {:.3} 方 of {} from {}\n\n{}",
                    taken.volume,
                    taken.specification,
                    warehouse.trim(),
                    self.detail(&warehouse)?
                )
            }
            Command::Settings(change) => self.change_settings(change)?,
        };
        Ok(Outcome::Continue(text))
    }

    fn detail(&self, warehouse: &str) -> Result<String, SessionError> {
        let warehouse = self.yard.warehouse(warehouse)?;
        Ok(view::warehouse_detail(warehouse, &self.yard.settings()))
    }

    fn change_settings(&mut self, change: SettingsChange) -> Result<String, SessionError> {
        if change.is_empty() {
            return Ok(view::settings(&self.yard.settings()));
        }
        let current = self.yard.settings();
        let updated = WarningSettings {
            threshold: change.threshold.unwrap_or(current.threshold),
            enabled: change.enabled.unwrap_or(current.enabled),
        };
        self.yard.update_settings(updated)?;
        Ok(format!("{}\n{}", view::settings(&updated), view::overview(&self.yard)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardstock_infra::seed::DEMO_STOCK;

    fn demo() -> Session {
        Session::new(Yard::seeded(WarningSettings::default(), DEMO_STOCK).unwrap())
    }

    fn text(outcome: Outcome) -> String {
        match outcome {
            Outcome::Continue(text) => text,
            Outcome::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn blank_line_does_nothing() {
        let mut session = demo();
        assert_eq!(session.execute_line("").unwrap(), Outcome::Continue(String::new()));
        assert_eq!(session.yard().journal().len(), 14);
    }

    #[test]
    fn store_reports_volume_and_refreshed_detail() {
        let mut session = Session::default();
        session.execute_line("add Bin A").unwrap();
        let out = text(session.execute_line("store Bin A 1.22 2.44 0.018 1 1 3").unwrap());
        assert!(out.starts_with("stored 0.161 方 of 1.220×2.440×0.018 in Bin A\n"));
        assert!(out.contains("== Bin A: detailed stock =="));
    }

    #[test]
    fn take_from_empty_warehouse_is_refused() {
        let mut session = Session::default();
        session.execute_line("add Bin A").unwrap();
        assert_eq!(
            session.execute_line("take Bin A 1×1×0.01 1 1 1").unwrap_err(),
            SessionError::NothingToTake("Bin A".into())
        );
    }

    #[test]
    fn take_of_unknown_spec_is_not_found() {
        let mut session = demo();
        let err = session
            .execute_line(r#"take "仓位 A" 1×1×0.05 1 1 1"#)
            .unwrap_err();
        assert!(matches!(
            err,
            SessionError::Yard(YardError::Domain(DomainError::NotFound(_)))
        ));
    }

    #[test]
    fn calc_does_not_touch_the_yard() {
        let mut session = demo();
        let out = text(session.execute_line("calc 1.22 2.44 0.018 1 1 3").unwrap());
        assert_eq!(out, "spec: 1.220×2.440×0.018\ntotal volume: 0.161 方\n");
        assert_eq!(session.yard().journal().len(), 14);
    }

    #[test]
    fn calc_rejects_bad_dimensions() {
        let mut session = demo();
        assert!(matches!(
            session.execute_line("calc 0 2.44 0.018 1 1 3").unwrap_err(),
            SessionError::Domain(DomainError::Validation(_))
        ));
    }

    #[test]
    fn settings_merge_with_current_values() {
        let mut session = demo();
        session.execute_line("settings threshold 1").unwrap();
        session.execute_line("settings off").unwrap();
        assert_eq!(
            session.yard().settings(),
            WarningSettings::new(1.0, false).unwrap()
        );

        let out = text(session.execute_line("settings").unwrap());
        assert_eq!(out, "warning threshold: 1 方\nlow-stock warnings: off\n");
    }

    #[test]
    fn invalid_threshold_is_rejected() {
        let mut session = demo();
        assert!(session.execute_line("settings threshold 0").is_err());
        assert_eq!(session.yard().settings(), WarningSettings::default());
    }

    #[test]
    fn quit_ends_the_session() {
        let mut session = demo();
        assert_eq!(session.execute_line("quit").unwrap(), Outcome::Quit);
    }
}

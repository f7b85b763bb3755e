//! `boardstock-console`
//!
//! **Responsibility:** terminal front end for the yard.
//!
//! This crate provides:
//! - A line-oriented command language (`command`)
//! - Text views of warehouses, totals and the movement journal (`view`)
//! - Horizontal bar charts with a low-stock threshold marker (`chart`)
//! - The interactive session tying them to a [`boardstock_infra::Yard`]

pub mod chart;
pub mod command;
pub mod session;
pub mod view;

pub use command::{Command, CommandError, SettingsChange};
pub use session::{Outcome, Session, SessionError};

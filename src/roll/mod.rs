//! Internet dice roll subsystem
//!
//! A roll request runs its HTTP cycle on a tokio worker; the completion
//! crosses back to the event thread through [`dispatch::RollDispatcher`] and
//! lands as a state mutation on the target piece plus a chat report.

pub mod client;
pub mod dispatch;
pub mod report;

pub use client::RollClient;
pub use dispatch::{RollDispatcher, RollOutcome, RollTicket};
pub use report::ReportFormat;

/// One dice roll request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollSpec {
    /// Free-text label carried into the report
    pub description: String,
    pub n_dice: u32,
    pub n_sides: u32,
    /// Modifier added to each die
    pub plus: i64,
    /// Report the sum instead of the individual values
    pub report_total: bool,
}

impl RollSpec {
    pub fn new(description: impl Into<String>, n_dice: u32, n_sides: u32) -> Self {
        Self {
            description: description.into(),
            n_dice,
            n_sides,
            plus: 0,
            report_total: false,
        }
    }
}

pub mod commands;
pub mod controller;
pub mod state;

pub use controller::InsightsController;
pub use state::{AnswerEntry, InsightCategory, InsightRecord, PanelState, PanelStatus};

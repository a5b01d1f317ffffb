pub mod error;
pub mod outcome;
pub mod scenario;
pub mod settings;

pub use error::ScenarioError;
pub use outcome::{RunSummary, ScenarioRecord, ScenarioStatus};
pub use scenario::{Group, Scenario, ScenarioResult};
pub use settings::Settings;

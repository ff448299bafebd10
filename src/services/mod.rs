pub mod availability;
pub mod lookup;
pub mod providers;

pub use availability::filter_platforms;
pub use lookup::{LookupOrchestrator, OutcomeReporter};

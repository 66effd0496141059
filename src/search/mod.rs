pub mod config;
pub mod growth;
pub mod optimizer;
pub mod stats;

pub use config::SearchConfig;
pub use growth::{grow, Mutation};
pub use optimizer::{optimize, Acceptance, SearchOutcome};
pub use stats::{BlockStats, SearchPhase};

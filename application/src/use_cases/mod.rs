//! Application use cases

pub mod generate_title;
pub mod run_council;

pub use generate_title::{GenerateTitleUseCase, TITLE_TIMEOUT};
pub use run_council::{RunCouncilError, RunCouncilInput, RunCouncilUseCase};

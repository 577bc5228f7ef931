//! Client-side assessment logic: the questionnaire flow controller, scoring
//! strategies, results derivation and the navigation model shared by every
//! front end.

pub mod error;
pub mod flow;
pub mod landing;
pub mod navigation;
pub mod report;
pub mod results;
pub mod scoring;

pub use error::FlowError;
pub use flow::{
    AdvanceOutcome, AssessmentFlow, Completion, CompletionOutcome, PendingNavigation,
    DEFAULT_COMPLETION_DELAY,
};
pub use navigation::{Navigator, RecordingNavigator, View};
pub use results::{derive_dashboard, mount_results, open_results, ResultsOutcome};
pub use scoring::{FixedScoring, RandomScoring, ScoringStrategy};

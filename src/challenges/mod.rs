//! Community challenges module.
//!
//! Time-boxed challenges, per-user participation records, and the join and
//! display workflows built on them.

pub mod service;
pub mod types;

pub use service::{ChallengeError, ChallengeService};
pub use types::{Challenge, ChallengePatch, ChallengeProgress, ChallengeStatus, ProgressPatch};

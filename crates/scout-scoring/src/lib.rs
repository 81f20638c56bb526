//! Heuristic scoring engines for the consumer tools.
//!
//! Every engine is a pure function of a [`scout_provider::ProviderProjection`]
//! plus an explicit context record: no network I/O, no shared state, no
//! ambient configuration. The true-price estimator is the single engine with
//! injected randomness; callers pass a seedable RNG to keep it reproducible.

pub mod allergy;
pub mod confidence;
pub mod open_status;
pub mod price;
pub mod solo;
pub mod types;
pub mod wait;

pub use allergy::allergy_safety_score;
pub use confidence::confidence_score;
pub use open_status::{evaluate_open_status, open_rank, OpenState, OpenStatus};
pub use price::{estimate_price, true_price, PriceBreakdown};
pub use solo::solo_safety_score;
pub use types::{BudgetTier, Mode, ScoreResult, ToolContext, Urgency, Vibe};
pub use wait::{predict_wait, WaitEstimate};

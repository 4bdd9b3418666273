//! End-to-end quality gate for one submission.
//!
//! ```text
//! content + tags
//!   -> RulesEngine (11 checks)
//!   -> WeightedScorer (quality score)
//!   -> InvocationDecisionEngine (call the judge?)
//!   -> SemanticJudge, under a timeout (optional)
//!   -> FinalVerdict
//! ```

pub mod gate;
pub mod types;


pub use gate::QualityGate;
pub use types::{FinalVerdict, GateOutcome};

// engine error taxonomy
//
// every variant is a broken invariant of the fuzzy engine, not an expected
// runtime condition. callers propagate them and fail loudly.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// triangle breakpoints are not ordered `left <= middle <= right`
    #[error("invalid triangle shape ({left}, {middle}, {right}): expected left <= middle <= right")]
    InvalidShape { left: f64, middle: f64, right: f64 },

    /// two sequences that must line up element-wise have different lengths
    #[error("length mismatch for {what}: expected {expected}, found {found}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// no rule in the table applies to a concrete antecedent triple
    #[error("no rule covers length={length}, complexity={complexity}, predictability={predictability}")]
    UncoveredRule {
        length: usize,
        complexity: usize,
        predictability: usize,
    },

    /// the rule table text could not be parsed
    #[error("invalid rule table: {0}")]
    InvalidRuleTable(String),

    /// the rule table defines the same antecedent twice
    #[error("rule table defines antecedent '{antecedent}' more than once")]
    ConflictingRule { antecedent: String },

    /// the aggregated output curve carries no membership at all
    #[error("cannot defuzzify: aggregated output has zero degree")]
    ZeroDegree,
}

pub mod engine;
pub mod rules;

pub use engine::{aggregate, clip, infer_strength, OutputGrades};
pub use rules::{Antecedent, Rule, RuleBase, StrengthSet, Symbol};

pub mod defuzzify;
pub mod membership;
pub mod variable;

pub use defuzzify::{centroid, defuzzify};
pub use membership::{build_triangle, grade_at, Domain, Triangle};
pub use variable::{FuzzySet, LinguisticVariable};

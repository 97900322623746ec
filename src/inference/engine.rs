// mamdani max-min inference: accumulate rule results, clip output sets,
// aggregate and defuzzify

use crate::error::EngineError;
use crate::fuzzy::defuzzify::defuzzify;
use crate::fuzzy::variable::LinguisticVariable;
use crate::inference::rules::{RuleBase, StrengthSet};

/// per-strength-set maximum of all rule results of one scoring
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OutputGrades([f64; StrengthSet::COUNT]);

impl OutputGrades {
    pub fn from_array(grades: [f64; StrengthSet::COUNT]) -> Self {
        Self(grades)
    }

    /// combine another rule result for `set` with maximum (OR)
    pub fn update(&mut self, set: StrengthSet, value: f64) {
        let slot = &mut self.0[set.index()];
        *slot = slot.max(value);
    }

    pub fn get(&self, set: StrengthSet) -> f64 {
        self.0[set.index()]
    }

    pub fn as_array(&self) -> &[f64; StrengthSet::COUNT] {
        &self.0
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }
}

/// element-wise minimum of a constant level and a membership curve
pub fn clip(level: f64, curve: &[f64]) -> Vec<f64> {
    curve.iter().map(|&g| g.min(level)).collect()
}

/// clip every output set at its accumulated grade and merge the clipped
/// curves with element-wise maximum.
pub fn aggregate(
    strength: &LinguisticVariable,
    grades: &OutputGrades,
) -> Result<Vec<f64>, EngineError> {
    if strength.set_count() != StrengthSet::COUNT {
        return Err(EngineError::LengthMismatch {
            what: "strength sets",
            expected: StrengthSet::COUNT,
            found: strength.set_count(),
        });
    }

    let mut output = vec![0.0_f64; strength.domain().len()];
    for (set, &level) in strength.sets().iter().zip(grades.as_array()) {
        if level == 0.0 {
            continue;
        }
        let clipped = clip(level, set.curve());
        for (out, g) in output.iter_mut().zip(clipped) {
            *out = out.max(g);
        }
    }
    Ok(output)
}

/// full inference pass from input grade vectors to the crisp strength
pub fn infer_strength(
    rules: &RuleBase,
    strength: &LinguisticVariable,
    length: &[f64],
    complexity: &[f64],
    predictability: &[f64],
) -> Result<f64, EngineError> {
    let grades = rules.evaluate(length, complexity, predictability)?;
    let curve = aggregate(strength, &grades)?;
    defuzzify(strength.domain(), &curve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuzzy::membership::{Domain, Triangle};

    fn strength_var() -> LinguisticVariable {
        LinguisticVariable::strength().unwrap()
    }

    #[test]
    fn update_keeps_maximum() {
        let mut out = OutputGrades::default();
        out.update(StrengthSet::Weak, 0.4);
        out.update(StrengthSet::Weak, 0.2);
        out.update(StrengthSet::Weak, 0.7);
        assert_eq!(out.get(StrengthSet::Weak), 0.7);
        assert_eq!(out.get(StrengthSet::Medium), 0.0);
    }

    #[test]
    fn clip_caps_curve() {
        assert_eq!(clip(0.5, &[0.0, 0.25, 0.75, 1.0]), vec![0.0, 0.25, 0.5, 0.5]);
    }

    #[test]
    fn aggregate_single_set_full_grade_is_the_set_curve() {
        let var = strength_var();
        let grades = OutputGrades::from_array([0.0, 0.0, 1.0, 0.0, 0.0]);
        let curve = aggregate(&var, &grades).unwrap();
        assert_eq!(curve, var.sets()[2].curve());
    }

    #[test]
    fn aggregate_takes_pointwise_max() {
        let var = strength_var();
        let grades = OutputGrades::from_array([0.3, 0.0, 0.0, 0.0, 0.6]);
        let curve = aggregate(&var, &grades).unwrap();
        // inside the very-weak plateau
        assert_eq!(curve[50], 0.3);
        // inside the very-strong plateau
        assert_eq!(curve[950], 0.6);
        // between the two sets
        assert_eq!(curve[500], 0.0);
        assert!(curve.iter().all(|&g| g <= 0.6));
    }

    #[test]
    fn aggregate_without_fired_sets_is_flat_zero() {
        let var = strength_var();
        let curve = aggregate(&var, &OutputGrades::default()).unwrap();
        assert_eq!(curve.len(), var.domain().len());
        assert!(curve.iter().all(|&g| g == 0.0));
    }

    #[test]
    fn aggregate_rejects_wrong_set_count() {
        let var = LinguisticVariable::new(
            "tiny",
            Domain::arange(0.0, 10.0, 0.1),
            &[("one", Triangle::new(0.0, 5.0, 10.0))],
        )
        .unwrap();
        assert!(matches!(
            aggregate(&var, &OutputGrades::default()),
            Err(EngineError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn infer_strength_very_short_is_very_weak() {
        let rules = RuleBase::embedded().unwrap();
        let s = infer_strength(
            &rules,
            &strength_var(),
            &[1.0, 0.0, 0.0, 0.0, 0.0],
            &[1.0, 0.0, 0.0, 0.0, 0.0],
            &[1.0, 0.0, 0.0],
        )
        .unwrap();
        assert!(s < 20.0, "got {}", s);
    }

    #[test]
    fn infer_strength_very_long_complex_unpredictable_is_very_strong() {
        let rules = RuleBase::embedded().unwrap();
        let s = infer_strength(
            &rules,
            &strength_var(),
            &[0.0, 0.0, 0.0, 0.0, 1.0],
            &[0.0, 0.0, 0.0, 0.0, 1.0],
            &[1.0, 0.0, 0.0],
        )
        .unwrap();
        assert!(s > 80.0, "got {}", s);
    }

    #[test]
    fn infer_strength_all_zero_inputs_is_zero_degree() {
        let rules = RuleBase::embedded().unwrap();
        let err = infer_strength(&rules, &strength_var(), &[0.0; 5], &[0.0; 5], &[0.0; 3])
            .unwrap_err();
        assert_eq!(err, EngineError::ZeroDegree);
    }
}

// password scoring entry point: raw metrics -> grade vectors -> inference

use std::sync::Arc;

use serde::Serialize;
use tracing::trace;

use crate::corpus::Corpus;
use crate::error::EngineError;
use crate::fuzzy::variable::LinguisticVariable;
use crate::inference::engine::infer_strength;
use crate::inference::rules::RuleBase;
use crate::metric::{calculate_complexity, calculate_length, calculate_predictability};

/// result of scoring one password
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub length: usize,
    pub complexity: f64,
    pub predictability: f64,
    /// crisp strength in 0..100
    pub strength: f64,
    pub best_match: Option<String>,
    pub length_grades: Vec<f64>,
    pub complexity_grades: Vec<f64>,
    pub predictability_grades: Vec<f64>,
}

/// fuzzy password scorer. owns the linguistic variables and the compiled
/// rule base, shares the corpus read-only.
#[derive(Debug, Clone)]
pub struct Scorer {
    corpus: Arc<Corpus>,
    length: LinguisticVariable,
    complexity: LinguisticVariable,
    predictability: LinguisticVariable,
    strength: LinguisticVariable,
    rules: RuleBase,
}

impl Scorer {
    /// scorer with the canonical variables and the embedded rule table
    pub fn new(corpus: Arc<Corpus>) -> Result<Self, EngineError> {
        Self::with_rules(corpus, RuleBase::embedded()?)
    }

    pub fn with_rules(corpus: Arc<Corpus>, rules: RuleBase) -> Result<Self, EngineError> {
        Ok(Self {
            corpus,
            length: LinguisticVariable::length()?,
            complexity: LinguisticVariable::complexity()?,
            predictability: LinguisticVariable::predictability()?,
            strength: LinguisticVariable::strength()?,
            rules,
        })
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn rules(&self) -> &RuleBase {
        &self.rules
    }

    pub fn length_variable(&self) -> &LinguisticVariable {
        &self.length
    }

    pub fn complexity_variable(&self) -> &LinguisticVariable {
        &self.complexity
    }

    pub fn predictability_variable(&self) -> &LinguisticVariable {
        &self.predictability
    }

    pub fn strength_variable(&self) -> &LinguisticVariable {
        &self.strength
    }

    /// score a password against the shared corpus
    pub fn score(&self, password: &str) -> Result<Assessment, EngineError> {
        let length = calculate_length(password);
        let complexity = calculate_complexity(password);
        let predictability = calculate_predictability(password, &self.corpus);

        let length_grades = self.length.grade_vector(length as f64)?;
        let complexity_grades = self.complexity.grade_vector(complexity)?;
        let predictability_grades = self.predictability.grade_vector(predictability.score)?;

        let strength = infer_strength(
            &self.rules,
            &self.strength,
            &length_grades,
            &complexity_grades,
            &predictability_grades,
        )?;

        trace!(
            length,
            complexity,
            predictability = predictability.score,
            strength,
            "scored password"
        );

        Ok(Assessment {
            length,
            complexity,
            predictability: predictability.score,
            strength,
            best_match: predictability.best_match,
            length_grades,
            complexity_grades,
            predictability_grades,
        })
    }
}

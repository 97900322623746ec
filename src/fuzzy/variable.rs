// linguistic variables: named fuzzy sets over one metric axis

use crate::error::EngineError;
use crate::fuzzy::membership::{build_triangle, grade_at, Domain, Triangle};

/// sample spacing shared by every canonical variable
pub const DOMAIN_STEP: f64 = 0.1;

pub const LENGTH_SETS: [(&str, Triangle); 5] = [
    ("very short", Triangle::new(2.0, 2.0, 6.0)),
    ("short", Triangle::new(4.0, 8.0, 12.0)),
    ("medium", Triangle::new(10.0, 14.0, 18.0)),
    ("long", Triangle::new(16.0, 20.0, 24.0)),
    ("very long", Triangle::new(22.0, 26.0, 26.0)),
];

pub const COMPLEXITY_SETS: [(&str, Triangle); 5] = [
    ("very simple", Triangle::new(5.0, 5.0, 173.0)),
    ("simple", Triangle::new(5.0, 173.0, 341.0)),
    ("medium", Triangle::new(173.0, 341.0, 509.0)),
    ("complex", Triangle::new(341.0, 509.0, 677.0)),
    ("very complex", Triangle::new(509.0, 677.0, 677.0)),
];

pub const PREDICTABILITY_SETS: [(&str, Triangle); 3] = [
    ("hard to predict", Triangle::new(30.0, 30.0, 50.0)),
    ("medium", Triangle::new(30.0, 50.0, 70.0)),
    ("easy to predict", Triangle::new(50.0, 70.0, 70.0)),
];

pub const STRENGTH_SETS: [(&str, Triangle); 5] = [
    ("very weak", Triangle::new(10.0, 10.0, 20.0)),
    ("weak", Triangle::new(20.0, 30.0, 40.0)),
    ("medium", Triangle::new(40.0, 50.0, 60.0)),
    ("strong", Triangle::new(60.0, 70.0, 80.0)),
    ("very strong", Triangle::new(80.0, 90.0, 90.0)),
];

/// one named fuzzy set with its discretized membership curve
#[derive(Debug, Clone)]
pub struct FuzzySet {
    pub name: String,
    pub shape: Triangle,
    curve: Vec<f64>,
}

impl FuzzySet {
    pub fn curve(&self) -> &[f64] {
        &self.curve
    }
}

/// an ordered list of fuzzy sets sharing one sampled domain
#[derive(Debug, Clone)]
pub struct LinguisticVariable {
    name: String,
    domain: Domain,
    sets: Vec<FuzzySet>,
}

impl LinguisticVariable {
    /// build every set's curve up front; curves are immutable afterwards.
    pub fn new(
        name: &str,
        domain: Domain,
        sets: &[(&str, Triangle)],
    ) -> Result<Self, EngineError> {
        let sets = sets
            .iter()
            .map(|&(set_name, shape)| {
                Ok(FuzzySet {
                    name: set_name.to_string(),
                    shape,
                    curve: build_triangle(&domain, shape)?,
                })
            })
            .collect::<Result<Vec<_>, EngineError>>()?;

        Ok(Self {
            name: name.to_string(),
            domain,
            sets,
        })
    }

    /// password length in characters, 0..27
    pub fn length() -> Result<Self, EngineError> {
        Self::new("length", Domain::arange(0.0, 27.0, DOMAIN_STEP), &LENGTH_SETS)
    }

    /// character-class complexity, 0..680
    pub fn complexity() -> Result<Self, EngineError> {
        Self::new(
            "complexity",
            Domain::arange(0.0, 680.0, DOMAIN_STEP),
            &COMPLEXITY_SETS,
        )
    }

    /// similarity to the corpus in percent, 0..100
    pub fn predictability() -> Result<Self, EngineError> {
        Self::new(
            "predictability",
            Domain::arange(0.0, 100.0, DOMAIN_STEP),
            &PREDICTABILITY_SETS,
        )
    }

    /// output variable, 0..100
    pub fn strength() -> Result<Self, EngineError> {
        Self::new(
            "strength",
            Domain::arange(0.0, 100.0, DOMAIN_STEP),
            &STRENGTH_SETS,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn sets(&self) -> &[FuzzySet] {
        &self.sets
    }

    pub fn set_count(&self) -> usize {
        self.sets.len()
    }

    pub fn set_names(&self) -> Vec<&str> {
        self.sets.iter().map(|s| s.name.as_str()).collect()
    }

    /// membership grade of `value` in every set, in declared order.
    pub fn grade_vector(&self, value: f64) -> Result<Vec<f64>, EngineError> {
        self.sets
            .iter()
            .map(|set| grade_at(&self.domain, &set.curve, value))
            .collect()
    }
}

// rule definitions, loading and the compiled rule base

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EngineError;
use crate::inference::engine::OutputGrades;

/// number of fuzzy sets on each input axis
pub const LENGTH_SET_COUNT: usize = 5;
pub const COMPLEXITY_SET_COUNT: usize = 5;
pub const PREDICTABILITY_SET_COUNT: usize = 3;

/// the embedded default rule table
const DEFAULT_RULES_TOML: &str = include_str!("../config/rules.toml");

/// conclusion of a rule: one of the five output strength sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrengthSet {
    VeryWeak,
    Weak,
    Medium,
    Strong,
    VeryStrong,
}

impl StrengthSet {
    pub const COUNT: usize = 5;

    pub const ALL: [StrengthSet; Self::COUNT] = [
        StrengthSet::VeryWeak,
        StrengthSet::Weak,
        StrengthSet::Medium,
        StrengthSet::Strong,
        StrengthSet::VeryStrong,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            StrengthSet::VeryWeak => "very-weak",
            StrengthSet::Weak => "weak",
            StrengthSet::Medium => "medium",
            StrengthSet::Strong => "strong",
            StrengthSet::VeryStrong => "very-strong",
        }
    }
}

/// one position of an antecedent: a concrete set index or a wildcard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Set(usize),
    Any,
}

impl Symbol {
    fn parse(raw: &str, count: usize, axis: &str) -> Result<Self, String> {
        let raw = raw.trim();
        if raw == "*" {
            return Ok(Symbol::Any);
        }
        let idx: usize = raw
            .parse()
            .map_err(|_| format!("invalid {} symbol '{}'", axis, raw))?;
        if idx >= count {
            return Err(format!(
                "{} set {} out of range (0..{})",
                axis,
                idx,
                count - 1
            ));
        }
        Ok(Symbol::Set(idx))
    }

    /// slot in the dense lookup table; wildcards take the slot past the last set
    fn slot(self, count: usize) -> usize {
        match self {
            Symbol::Set(i) => i,
            Symbol::Any => count,
        }
    }

    fn is_concrete(self) -> bool {
        matches!(self, Symbol::Set(_))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Set(i) => write!(f, "{}", i),
            Symbol::Any => write!(f, "*"),
        }
    }
}

/// the `(length, complexity, predictability)` premise of a rule,
/// written as `"l,c,p"` in the rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Antecedent {
    pub length: Symbol,
    pub complexity: Symbol,
    pub predictability: Symbol,
}

impl Antecedent {
    pub fn new(length: Symbol, complexity: Symbol, predictability: Symbol) -> Self {
        Self {
            length,
            complexity,
            predictability,
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        let parts: Vec<&str> = raw.split(',').collect();
        if parts.len() != 3 {
            return Err(format!(
                "antecedent '{}' must have 3 comma-separated symbols",
                raw
            ));
        }
        Ok(Self {
            length: Symbol::parse(parts[0], LENGTH_SET_COUNT, "length")?,
            complexity: Symbol::parse(parts[1], COMPLEXITY_SET_COUNT, "complexity")?,
            predictability: Symbol::parse(parts[2], PREDICTABILITY_SET_COUNT, "predictability")?,
        })
    }

    fn slot(self) -> usize {
        let l = self.length.slot(LENGTH_SET_COUNT);
        let c = self.complexity.slot(COMPLEXITY_SET_COUNT);
        let p = self.predictability.slot(PREDICTABILITY_SET_COUNT);
        (l * (COMPLEXITY_SET_COUNT + 1) + c) * (PREDICTABILITY_SET_COUNT + 1) + p
    }

    /// every antecedent that can match a concrete triple, most specific first
    fn candidates(length: usize, complexity: usize, predictability: usize) -> [Antecedent; 8] {
        use Symbol::{Any, Set};
        let (l, c, p) = (Set(length), Set(complexity), Set(predictability));
        [
            Self::new(l, c, p),
            Self::new(l, Any, p),
            Self::new(l, c, Any),
            Self::new(Any, c, p),
            Self::new(l, Any, Any),
            Self::new(Any, Any, p),
            Self::new(Any, c, Any),
            Self::new(Any, Any, Any),
        ]
    }
}

impl TryFrom<String> for Antecedent {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Antecedent> for String {
    fn from(value: Antecedent) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Antecedent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.length, self.complexity, self.predictability)
    }
}

/// a rule definition (before compilation)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub when: Antecedent,
    pub then: StrengthSet,
}

/// top-level structure for the rules TOML file
#[derive(Debug, Clone, Deserialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub rules: Vec<Rule>,
}

/// load the default rules from the embedded TOML file
pub fn load_default_rules() -> Result<Vec<Rule>, String> {
    let config: RulesConfig = toml::from_str(DEFAULT_RULES_TOML)
        .map_err(|e| format!("failed to parse embedded rules.toml: {}", e))?;
    Ok(config.rules)
}

/// load rules from a TOML string
pub fn load_rules_from_str(toml_content: &str) -> Result<Vec<Rule>, String> {
    let config: RulesConfig =
        toml::from_str(toml_content).map_err(|e| format!("failed to parse rules TOML: {}", e))?;
    Ok(config.rules)
}

/// the rule that answers one concrete antecedent triple
#[derive(Debug, Clone, Copy)]
struct Resolved {
    when: Antecedent,
    then: StrengthSet,
}

/// a rule table checked for conflicts and exhaustiveness, with every
/// concrete `(length, complexity, predictability)` triple pre-resolved
#[derive(Debug, Clone)]
pub struct RuleBase {
    rules: Vec<Rule>,
    resolved: Vec<Resolved>,
}

impl RuleBase {
    /// compile the embedded default rule table
    pub fn embedded() -> Result<Self, EngineError> {
        let rules = load_default_rules().map_err(EngineError::InvalidRuleTable)?;
        Self::compile(&rules)
    }

    /// build the lookup table. fails on duplicate antecedents and on any
    /// concrete triple that no rule covers.
    pub fn compile(rules: &[Rule]) -> Result<Self, EngineError> {
        let dense_len = (LENGTH_SET_COUNT + 1)
            * (COMPLEXITY_SET_COUNT + 1)
            * (PREDICTABILITY_SET_COUNT + 1);
        let mut table: Vec<Option<StrengthSet>> = vec![None; dense_len];

        for rule in rules {
            let slot = &mut table[rule.when.slot()];
            if slot.is_some() {
                return Err(EngineError::ConflictingRule {
                    antecedent: rule.when.to_string(),
                });
            }
            *slot = Some(rule.then);
        }

        let mut resolved =
            Vec::with_capacity(LENGTH_SET_COUNT * COMPLEXITY_SET_COUNT * PREDICTABILITY_SET_COUNT);
        for l in 0..LENGTH_SET_COUNT {
            for c in 0..COMPLEXITY_SET_COUNT {
                for p in 0..PREDICTABILITY_SET_COUNT {
                    let hit = Antecedent::candidates(l, c, p)
                        .into_iter()
                        .find_map(|when| table[when.slot()].map(|then| Resolved { when, then }))
                        .ok_or(EngineError::UncoveredRule {
                            length: l,
                            complexity: c,
                            predictability: p,
                        })?;
                    resolved.push(hit);
                }
            }
        }

        debug!(rules = rules.len(), "compiled rule base");

        Ok(Self {
            rules: rules.to_vec(),
            resolved,
        })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// the rule applied to a concrete triple of set indices
    pub fn resolve(
        &self,
        length: usize,
        complexity: usize,
        predictability: usize,
    ) -> Result<(Antecedent, StrengthSet), EngineError> {
        if length >= LENGTH_SET_COUNT
            || complexity >= COMPLEXITY_SET_COUNT
            || predictability >= PREDICTABILITY_SET_COUNT
        {
            return Err(EngineError::UncoveredRule {
                length,
                complexity,
                predictability,
            });
        }
        let idx = (length * COMPLEXITY_SET_COUNT + complexity) * PREDICTABILITY_SET_COUNT
            + predictability;
        let hit = self.resolved[idx];
        Ok((hit.when, hit.then))
    }

    /// fire every rule whose three input grades are nonzero.
    ///
    /// a rule's firing strength is the minimum (AND) of the grades on its
    /// concrete positions; wildcard positions do not take part. rules that
    /// conclude the same strength set are combined with maximum (OR).
    pub fn evaluate(
        &self,
        length: &[f64],
        complexity: &[f64],
        predictability: &[f64],
    ) -> Result<OutputGrades, EngineError> {
        check_len("length grades", LENGTH_SET_COUNT, length)?;
        check_len("complexity grades", COMPLEXITY_SET_COUNT, complexity)?;
        check_len("predictability grades", PREDICTABILITY_SET_COUNT, predictability)?;

        let mut output = OutputGrades::default();
        for (l, &gl) in length.iter().enumerate().filter(|&(_, &g)| g != 0.0) {
            for (c, &gc) in complexity.iter().enumerate().filter(|&(_, &g)| g != 0.0) {
                for (p, &gp) in predictability.iter().enumerate().filter(|&(_, &g)| g != 0.0) {
                    let (when, then) = self.resolve(l, c, p)?;

                    let mut firing = 1.0_f64;
                    if when.length.is_concrete() {
                        firing = firing.min(gl);
                    }
                    if when.complexity.is_concrete() {
                        firing = firing.min(gc);
                    }
                    if when.predictability.is_concrete() {
                        firing = firing.min(gp);
                    }

                    output.update(then, firing);
                }
            }
        }

        Ok(output)
    }
}

fn check_len(what: &'static str, expected: usize, grades: &[f64]) -> Result<(), EngineError> {
    if grades.len() != expected {
        return Err(EngineError::LengthMismatch {
            what,
            expected,
            found: grades.len(),
        });
    }
    Ok(())
}

pub mod masking;

use serde::Serialize;

use crate::scorer::{Assessment, Scorer};
use masking::mask_password;

/// metric value at which the normalized score reaches 100
pub const LENGTH_MAX: f64 = 26.0;
pub const COMPLEXITY_MAX: f64 = 677.0;
pub const PREDICTABILITY_MAX: f64 = 100.0;

/// 0..100 score of a raw metric value, saturating above `max`
pub fn normalized_score(value: f64, max: f64) -> u32 {
    if value > max {
        100
    } else {
        (value / max * 100.0).round() as u32
    }
}

/// name of the set with the highest grade. when a second set has exactly
/// the same grade the label spans both, e.g. "medium to long".
pub fn linguistic_label(grades: &[f64], names: &[&str]) -> String {
    let Some(first) = names.first() else {
        return String::new();
    };

    let mut best = 0;
    for (i, &grade) in grades.iter().enumerate().take(names.len()) {
        if grade > grades[best] {
            best = i;
        }
    }
    let Some(&max) = grades.get(best) else {
        return (*first).to_string();
    };

    let second = grades
        .iter()
        .enumerate()
        .take(names.len())
        .find(|&(i, &grade)| i != best && grade == max)
        .map(|(i, _)| i);

    match second {
        Some(i) => format!("{} to {}", names[best], names[i]),
        None => names[best].to_string(),
    }
}

/// band of a crisp strength value, after rounding
pub fn strength_label(strength: f64) -> &'static str {
    let level = strength.round();
    if level <= 20.0 {
        "very weak"
    } else if level <= 40.0 {
        "weak"
    } else if level <= 60.0 {
        "medium"
    } else if level <= 80.0 {
        "strong"
    } else {
        "very strong"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricReport {
    pub value: f64,
    pub score: u32,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrengthReport {
    pub score: u32,
    pub label: &'static str,
}

/// presentation of one scored password; the candidate is masked, the
/// corpus entry it resembles is a public list entry and stays readable
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub password: String,
    pub length: MetricReport,
    pub complexity: MetricReport,
    pub predictability: MetricReport,
    pub strength: StrengthReport,
    pub best_match: Option<String>,
    pub weak: bool,
}

impl Report {
    /// `weak` is set when a threshold is given and the strength falls below it
    pub fn new(
        password: &str,
        assessment: &Assessment,
        scorer: &Scorer,
        min_strength: Option<f64>,
    ) -> Self {
        Self {
            password: mask_password(password),
            length: metric(
                assessment.length as f64,
                LENGTH_MAX,
                &assessment.length_grades,
                &scorer.length_variable().set_names(),
            ),
            complexity: metric(
                assessment.complexity,
                COMPLEXITY_MAX,
                &assessment.complexity_grades,
                &scorer.complexity_variable().set_names(),
            ),
            predictability: metric(
                assessment.predictability,
                PREDICTABILITY_MAX,
                &assessment.predictability_grades,
                &scorer.predictability_variable().set_names(),
            ),
            strength: StrengthReport {
                score: assessment.strength.round() as u32,
                label: strength_label(assessment.strength),
            },
            best_match: assessment.best_match.clone(),
            weak: min_strength.is_some_and(|min| assessment.strength < min),
        }
    }
}

fn metric(value: f64, max: f64, grades: &[f64], names: &[&str]) -> MetricReport {
    MetricReport {
        value,
        score: normalized_score(value, max),
        label: linguistic_label(grades, names),
    }
}

/// human-readable report block
pub fn format_report(report: &Report) -> String {
    let status = if report.weak { "[WEAK]" } else { "[OK]" };
    let mut out = format!("{} {}\n", status, report.password);
    for (name, m) in [
        ("length", &report.length),
        ("complexity", &report.complexity),
        ("predictability", &report.predictability),
    ] {
        out.push_str(&format!("  {:<16}{:>3}% ({})\n", format!("{}:", name), m.score, m.label));
    }
    out.push_str(&format!(
        "  {:<16}{:>3}  ({})\n",
        "strength:", report.strength.score, report.strength.label
    ));
    if let Some(best) = &report.best_match {
        out.push_str(&format!("  {:<16}{}\n", "closest match:", best));
    }
    out
}

/// print reports to stdout, as text blocks or as one json array
pub fn print_reports(reports: &[Report], json: bool) -> Result<(), String> {
    if json {
        let text = serde_json::to_string_pretty(reports)
            .map_err(|e| format!("failed to serialize report: {}", e))?;
        println!("{}", text);
    } else {
        for report in reports {
            print!("{}", format_report(report));
        }
    }
    Ok(())
}

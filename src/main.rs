use std::io::{self, BufRead, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use rayon::prelude::*;
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fuzzypass::config::{self, ProjectConfig};
use fuzzypass::corpus::Corpus;
use fuzzypass::inference::rules::{load_rules_from_str, RuleBase};
use fuzzypass::metric::{validate_password, DEFAULT_MAX_LENGTH};
use fuzzypass::output::{self, Report};
use fuzzypass::{EngineError, Scorer};

/// parse and validate a strength threshold (0-100)
fn parse_strength(s: &str) -> Result<f64, String> {
    let n: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if !(0.0..=100.0).contains(&n) {
        return Err("strength threshold must be within 0..100".to_string());
    }
    Ok(n)
}

/// fuzzy-logic password strength scoring
#[derive(Parser, Debug)]
#[command(
    name = "fuzzypass",
    version,
    about = "fuzzy-logic password strength scoring",
    after_help = "\
exit status:
  0  every password scored at or above the threshold
  1  at least one password is weak or invalid
  2  configuration or internal error

examples:
  fuzzypass score 'Tr0ub4dor&3'
  fuzzypass --min-strength 60 batch candidates.txt
  echo 'hunter2' | fuzzypass --json score"
)]
struct Cli {
    /// use only this config file instead of discovering .fuzzypass.toml files
    #[arg(long, global = true, value_name = "FILE", env = "FUZZYPASS_CONFIG")]
    config: Option<PathBuf>,

    /// password list to compare against (one entry per line)
    #[arg(long, global = true, value_name = "FILE")]
    corpus: Option<PathBuf>,

    /// replacement rule table
    #[arg(long, global = true, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// report passwords below this strength as weak
    #[arg(long, global = true, value_name = "N", value_parser = parse_strength)]
    min_strength: Option<f64>,

    /// print results as json
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// score one password (first stdin line if omitted)
    Score { password: Option<String> },
    /// score one password per line (stdin if omitted)
    Batch { file: Option<PathBuf> },
    /// print the rule table
    Rules,
}

/// effective settings after config files and command-line overrides
#[derive(Debug)]
struct Settings {
    corpus: Option<PathBuf>,
    rules: Option<PathBuf>,
    min_strength: Option<f64>,
    max_length: usize,
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    std::process::exit(run(&cli));
}

fn run(cli: &Cli) -> i32 {
    // exit codes: 0 = all passwords ok, 1 = weak or invalid password, 2 = error
    let settings = match resolve_settings(cli) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("[ERROR] failed to load config: {}", e);
            return 2;
        }
    };

    let rules = match load_rule_base(settings.rules.as_deref()) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("[ERROR] failed to load rules: {}", e);
            return 2;
        }
    };

    if let Command::Rules = cli.command {
        return print_rules(&rules, cli.json);
    }

    let scorer = match build_scorer(&settings, rules) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            return 2;
        }
    };

    match &cli.command {
        Command::Score { password } => run_score(password.as_deref(), &scorer, &settings, cli.json),
        Command::Batch { file } => run_batch(file.as_deref(), &scorer, &settings, cli.json),
        Command::Rules => 0,
    }
}

fn resolve_settings(cli: &Cli) -> Result<Settings, String> {
    let project = match &cli.config {
        Some(path) => config::load_single_config(path)?,
        None => discover_project_config()?,
    };

    Ok(Settings {
        corpus: cli.corpus.clone().or(project.corpus.path),
        rules: cli.rules.clone().or(project.rules.path),
        min_strength: cli.min_strength.or(project.settings.min_strength),
        max_length: project.settings.max_length.unwrap_or(DEFAULT_MAX_LENGTH),
    })
}

fn discover_project_config() -> Result<ProjectConfig, String> {
    let cwd = std::env::current_dir()
        .map_err(|e| format!("cannot determine working directory: {}", e))?;
    let home = std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| cwd.clone());
    config::load_config(&cwd, &home)
}

fn load_rule_base(path: Option<&Path>) -> Result<RuleBase, String> {
    let Some(path) = path else {
        return RuleBase::embedded().map_err(|e| e.to_string());
    };
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    let rules = load_rules_from_str(&content).map_err(|e| format!("{}: {}", path.display(), e))?;
    RuleBase::compile(&rules).map_err(|e| format!("{}: {}", path.display(), e))
}

fn build_scorer(settings: &Settings, rules: RuleBase) -> Result<Scorer, String> {
    let corpus = match &settings.corpus {
        Some(path) => Corpus::load(path)?,
        None => Corpus::embedded()?,
    };
    Scorer::with_rules(Arc::new(corpus), rules).map_err(|e| e.to_string())
}

fn print_rules(rules: &RuleBase, json: bool) -> i32 {
    if json {
        match serde_json::to_string_pretty(rules.rules()) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("[ERROR] failed to serialize rules: {}", e);
                return 2;
            }
        }
        return 0;
    }

    println!("{:<10}strength", "l,c,p");
    for rule in rules.rules() {
        println!("{:<10}{}", rule.when.to_string(), rule.then.name());
    }
    0
}

fn read_first_line() -> Result<String, String> {
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| format!("failed to read stdin: {}", e))?;
    Ok(line.trim_end_matches(['\n', '\r']).to_string())
}

fn run_score(password: Option<&str>, scorer: &Scorer, settings: &Settings, json: bool) -> i32 {
    let password = match password {
        Some(p) => p.to_string(),
        None => match read_first_line() {
            Ok(p) => p,
            Err(e) => {
                eprintln!("[ERROR] {}", e);
                return 2;
            }
        },
    };

    if let Err(e) = validate_password(&password, settings.max_length) {
        eprintln!("[INVALID] {}", e);
        return 1;
    }

    let assessment = match scorer.score(&password) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            return 2;
        }
    };

    let report = Report::new(&password, &assessment, scorer, settings.min_strength);
    if let Err(e) = output::print_reports(std::slice::from_ref(&report), json) {
        eprintln!("[ERROR] {}", e);
        return 2;
    }

    if report.weak {
        1
    } else {
        0
    }
}

enum Outcome {
    Scored(Report),
    Invalid { line: usize, reason: String },
}

fn run_batch(file: Option<&Path>, scorer: &Scorer, settings: &Settings, json: bool) -> i32 {
    let input = match file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {}", path.display(), e)),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map(|_| buf)
                .map_err(|e| format!("failed to read stdin: {}", e))
        }
    };
    let input = match input {
        Ok(i) => i,
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            return 2;
        }
    };

    let lines: Vec<(usize, &str)> = input
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.is_empty())
        .collect();

    let outcomes: Result<Vec<Outcome>, EngineError> = lines
        .par_iter()
        .map(|&(line, password)| -> Result<Outcome, EngineError> {
            if let Err(reason) = validate_password(password, settings.max_length) {
                return Ok(Outcome::Invalid { line, reason });
            }
            let assessment = scorer.score(password)?;
            Ok(Outcome::Scored(Report::new(
                password,
                &assessment,
                scorer,
                settings.min_strength,
            )))
        })
        .collect();

    let outcomes = match outcomes {
        Ok(o) => o,
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            return 2;
        }
    };

    let mut reports = Vec::with_capacity(outcomes.len());
    let mut failed = false;
    for outcome in outcomes {
        match outcome {
            Outcome::Scored(report) => {
                failed |= report.weak;
                reports.push(report);
            }
            Outcome::Invalid { line, reason } => {
                warn!(line, "skipping invalid password");
                eprintln!("[INVALID] line {}: {}", line, reason);
                failed = true;
            }
        }
    }

    if let Err(e) = output::print_reports(&reports, json) {
        eprintln!("[ERROR] {}", e);
        return 2;
    }

    if failed {
        1
    } else {
        0
    }
}

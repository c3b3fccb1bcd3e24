// src/extractors/stats.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

// --- Regex Patterns for Statistical Reporting (Lazy Static) ---
// Digits are ASCII only: [0-9], never Unicode `\d`.

// p = 0.03, P<0.001, p > 0.05. Leading "0." is required: "p < .05" and 1e-5 forms are not matched.
static P_VALUE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bp ?[<>=] ?0\.[0-9]+").expect("Failed to compile P_VALUE_RE")
});

// 95% CI [1.10, 2.50], 90% CI [-.3, .8]. Bracketed pair only, no "(1.2 to 2.3)" prose.
static CONFIDENCE_INTERVAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b[0-9]{{2,3}}% ?CI ?\[ ?{d} ?, ?{d} ?\]",
        d = SIGNED_DECIMAL
    ))
    .expect("Failed to compile CONFIDENCE_INTERVAL_RE")
});

// N = 150. Capital N only; lower-case "n = 12" usually reports a subgroup.
static SAMPLE_SIZE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bN ?= ?[0-9]+").expect("Failed to compile SAMPLE_SIZE_RE")
});

// Cohen's d = 0.5, η² = .06, r = -0.21. Bare "r" also catches unrelated variables named r.
static EFFECT_SIZE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?:Cohen['’]s d|η²|\br) ?= ?{}", SIGNED_DECIMAL))
        .expect("Failed to compile EFFECT_SIZE_RE")
});

// Optional sign, then "1", "1.25" or ".25". Shared by intervals and effect sizes.
const SIGNED_DECIMAL: &str = r"[-+]?(?:[0-9]+(?:\.[0-9]+)?|\.[0-9]+)";

// --- Data Structures ---

/// The four statistical-reporting categories pulled from section text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    PValue,
    ConfidenceInterval,
    SampleSize,
    EffectSize,
}

impl Metric {
    /// All metrics, in output key order.
    pub const ALL: [Metric; 4] = [
        Metric::PValue,
        Metric::ConfidenceInterval,
        Metric::SampleSize,
        Metric::EffectSize,
    ];

    /// Key used for this metric in extraction output.
    pub fn key(self) -> &'static str {
        match self {
            Metric::PValue => "p_values",
            Metric::ConfidenceInterval => "confidence_intervals",
            Metric::SampleSize => "sample_sizes",
            Metric::EffectSize => "effect_sizes",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Metric::PValue => &P_VALUE_RE,
            Metric::ConfidenceInterval => &CONFIDENCE_INTERVAL_RE,
            Metric::SampleSize => &SAMPLE_SIZE_RE,
            Metric::EffectSize => &EFFECT_SIZE_RE,
        }
    }

    /// Every non-overlapping match of this metric, left to right.
    pub fn find_all(self, text: &str) -> Vec<String> {
        self.pattern()
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Matched literals for one section. All four keys are always serialized,
/// empty metrics as empty arrays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsReport {
    pub p_values: Vec<String>,
    pub confidence_intervals: Vec<String>,
    pub sample_sizes: Vec<String>,
    pub effect_sizes: Vec<String>,
}

impl StatisticsReport {
    pub fn get(&self, metric: Metric) -> &[String] {
        match metric {
            Metric::PValue => &self.p_values,
            Metric::ConfidenceInterval => &self.confidence_intervals,
            Metric::SampleSize => &self.sample_sizes,
            Metric::EffectSize => &self.effect_sizes,
        }
    }

    fn slot(&mut self, metric: Metric) -> &mut Vec<String> {
        match metric {
            Metric::PValue => &mut self.p_values,
            Metric::ConfidenceInterval => &mut self.confidence_intervals,
            Metric::SampleSize => &mut self.sample_sizes,
            Metric::EffectSize => &mut self.effect_sizes,
        }
    }

    pub fn total(&self) -> usize {
        Metric::ALL.iter().map(|m| self.get(*m).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// A single match with its byte span in the searched text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatMatch {
    pub metric: Metric,
    pub start: usize,
    pub end: usize,
    pub text: String,
}

/// Applies every metric matcher to a section's text.
///
/// Matchers are independent of each other; each reports its matches in order
/// of appearance with duplicates kept.
pub fn extract(section_text: &str) -> StatisticsReport {
    let mut report = StatisticsReport::default();
    for metric in Metric::ALL {
        *report.slot(metric) = metric.find_all(section_text);
    }
    tracing::trace!(
        "Extracted {} statistics from {} bytes of text",
        report.total(),
        section_text.len()
    );
    report
}

/// All matches of all metrics with their spans, ordered by start offset.
pub fn find_matches(text: &str) -> Vec<StatMatch> {
    let mut matches: Vec<StatMatch> = Metric::ALL
        .iter()
        .flat_map(|&metric| {
            metric.pattern().find_iter(text).map(move |m| StatMatch {
                metric,
                start: m.start(),
                end: m.end(),
                text: m.as_str().to_string(),
            })
        })
        .collect();
    matches.sort_by_key(|m| (m.start, m.end));
    matches
}

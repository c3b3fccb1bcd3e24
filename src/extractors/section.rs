// src/extractors/section.rs

// --- Imports ---
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

// --- Constants ---
/// Section name used for lines that precede the first recognized heading.
pub const DEFAULT_SECTION: &str = "UNLABELED";

/// Heading words recognized as section boundaries (matched case-insensitively).
pub const HEADING_VOCABULARY: [&str; 9] = [
    "ABSTRACT",
    "INTRODUCTION",
    "METHODS",
    "METHOD",
    "RESULTS",
    "RESULT",
    "DISCUSSION",
    "CONCLUSION",
    "REFERENCES",
];

// --- Regex Patterns (Lazy Static) ---
// Whole-line heading: optional outline marker ("II.", "3)", "iv."), then exactly one vocabulary word.
// Lines that merely mention a heading word inside a sentence never match.
static HEADING_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    let words = HEADING_VOCABULARY.join("|");
    Regex::new(&format!(r"(?i)^(?:(?:[IVXLC]+|[0-9]+)[.)]\s*)?({})$", words))
        .expect("Failed to compile HEADING_LINE_RE")
});

// --- Data Structures ---

/// One contiguous run of lines under a single heading, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub lines: Vec<String>,
    /// False for the leading run collected before any heading was seen.
    pub headed: bool,
}

impl Section {
    fn open(name: &str, headed: bool) -> Self {
        Self { name: name.to_string(), lines: Vec::new(), headed }
    }

    /// The section's lines joined by single spaces.
    pub fn content(&self) -> String {
        self.lines.join(" ")
    }
}

/// Returns the upper-cased vocabulary word if `line` is a section heading.
pub fn detect_heading(line: &str) -> Option<String> {
    HEADING_LINE_RE
        .captures(line.trim())
        .and_then(|caps| caps.get(1))
        .map(|word| word.as_str().to_uppercase())
}

// --- Main Sectionizer Structure ---
#[derive(Debug, Clone)]
pub struct Sectionizer {
    default_section: String,
}

impl Default for Sectionizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sectionizer {
    pub fn new() -> Self {
        Self { default_section: DEFAULT_SECTION.to_string() }
    }

    /// Uses `name` (upper-cased) for text before the first heading.
    /// A blank name falls back to [`DEFAULT_SECTION`].
    pub fn with_default_section(name: &str) -> Self {
        let name = name.trim();
        if name.is_empty() {
            return Self::new();
        }
        Self { default_section: name.to_uppercase() }
    }

    pub fn default_section(&self) -> &str {
        &self.default_section
    }

    /// Single linear pass turning lines into ordered runs of (heading, lines).
    ///
    /// Repeated headings produce separate runs here; merging happens in [`Self::segment`].
    /// The leading default run is only kept when it holds at least one line.
    pub fn fold_lines<'a, I>(&self, lines: I) -> Vec<Section>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut finished: Vec<Section> = Vec::new();
        let mut current = Section::open(&self.default_section, false);

        for (line_no, raw_line) in lines.into_iter().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }

            match detect_heading(line) {
                Some(name) => {
                    tracing::debug!("Detected heading '{}' at line {}", name, line_no + 1);
                    let previous = std::mem::replace(&mut current, Section::open(&name, true));
                    if previous.headed || !previous.lines.is_empty() {
                        finished.push(previous);
                    }
                }
                None => current.lines.push(line.to_string()),
            }
        }

        if current.headed || !current.lines.is_empty() {
            finished.push(current);
        }
        finished
    }

    /// Partitions text into a mapping of section name to joined section content,
    /// keyed in order of first appearance.
    ///
    /// Content of a repeated heading is appended to the earlier buffer with a
    /// single space. Text without any recognized heading comes back whole
    /// under the default section.
    pub fn segment(&self, text: &str) -> IndexMap<String, String> {
        self.segment_with_status(text).0
    }

    /// Like [`Self::segment`], also reporting whether any heading was recognized.
    pub fn segment_with_status(&self, text: &str) -> (IndexMap<String, String>, bool) {
        let mut sections: IndexMap<String, String> = IndexMap::new();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return (sections, false);
        }

        let runs = self.fold_lines(trimmed.lines());
        if !runs.iter().any(|run| run.headed) {
            tracing::debug!(
                "No headings recognized; keeping whole text under '{}'",
                self.default_section
            );
            sections.insert(self.default_section.clone(), trimmed.to_string());
            return (sections, false);
        }

        for run in runs {
            let content = run.content();
            tracing::trace!("Finalized section '{}' ({} lines)", run.name, run.lines.len());
            let buffer = sections.entry(run.name).or_default();
            if !buffer.is_empty() && !content.is_empty() {
                buffer.push(' ');
            }
            buffer.push_str(&content);
        }

        tracing::debug!("Segmented text into {} sections", sections.len());
        (sections, true)
    }
}

/// Segments text with the default [`Sectionizer`].
pub fn segment(text: &str) -> IndexMap<String, String> {
    Sectionizer::new().segment(text)
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_detect_heading_whole_line_only() {
        assert_eq!(detect_heading("METHODS"), Some("METHODS".to_string()));
        assert_eq!(detect_heading("  results "), Some("RESULTS".to_string()));
        assert_eq!(detect_heading("Method"), Some("METHOD".to_string()));
        assert_eq!(detect_heading("The methods used were standard."), None);
        assert_eq!(detect_heading("Results and Discussion"), None);
        assert_eq!(detect_heading(""), None);
    }

    #[test]
    fn test_detect_heading_with_outline_marker() {
        assert_eq!(detect_heading("II. Methods"), Some("METHODS".to_string()));
        assert_eq!(detect_heading("3) Results"), Some("RESULTS".to_string()));
        assert_eq!(detect_heading("iv.Discussion"), Some("DISCUSSION".to_string()));
        assert_eq!(detect_heading("4 Conclusion"), None, "marker needs '.' or ')'");
        assert_eq!(detect_heading("A. References"), None);
    }

    #[test]
    fn test_every_vocabulary_word_is_a_heading() {
        for word in HEADING_VOCABULARY {
            assert_eq!(detect_heading(&word.to_lowercase()).as_deref(), Some(word));
        }
    }

    #[test]
    fn test_segment_basic_document() {
        let text = "INTRODUCTION\nBackground text.\nMore background.\nMETHODS\nN = 30 participants.";
        let sections = segment(text);
        let names: Vec<&str> = sections.keys().map(String::as_str).collect();
        assert_eq!(names, ["INTRODUCTION", "METHODS"]);
        assert_eq!(sections["INTRODUCTION"], "Background text. More background.");
        assert_eq!(sections["METHODS"], "N = 30 participants.");
    }

    #[test]
    fn test_preamble_goes_to_default_section() {
        let sections = segment("A Study of Things\nJ. Doe\nABSTRACT\nWe study things.");
        let names: Vec<&str> = sections.keys().map(String::as_str).collect();
        assert_eq!(names, [DEFAULT_SECTION, "ABSTRACT"]);
        assert_eq!(sections[DEFAULT_SECTION], "A Study of Things J. Doe");
    }

    #[test]
    fn test_repeated_heading_appends() {
        let text = "RESULTS\nFirst block.\nDISCUSSION\nTalk.\nResults\nSecond block.";
        let sections = segment(text);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections["RESULTS"], "First block. Second block.");
        assert_eq!(sections.get_index(0).map(|(k, _)| k.as_str()), Some("RESULTS"));
    }

    #[test]
    fn test_heading_without_content_is_kept_empty() {
        let sections = segment("ABSTRACT\nSummary.\nREFERENCES");
        assert_eq!(sections["REFERENCES"], "");
    }

    #[test]
    fn test_no_headings_returns_whole_text() {
        let text = "  Just a paragraph.\nAnd another line.  ";
        let sections = segment(text);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[DEFAULT_SECTION], "Just a paragraph.\nAnd another line.");
    }

    #[test]
    fn test_empty_text_has_no_sections() {
        assert!(segment("").is_empty());
        assert!(segment(" \n ").is_empty());
    }

    #[test]
    fn test_segment_with_status_reports_headings() {
        let sectionizer = Sectionizer::with_default_section("introduction");
        let (sections, headed) = sectionizer.segment_with_status("INTRODUCTION\nWe found p = 0.01.");
        assert!(headed);
        assert_eq!(sections.len(), 1);

        let (sections, headed) = sectionizer.segment_with_status("Just text.");
        assert!(!headed);
        assert_eq!(sections["INTRODUCTION"], "Just text.");

        assert!(!sectionizer.segment_with_status("").1);
    }

    #[test]
    fn test_outline_marker_needs_ascii_digits() {
        assert_eq!(detect_heading("٣. Results"), None);
        assert_eq!(detect_heading("12. Results"), Some("RESULTS".to_string()));
    }

    #[test]
    fn test_custom_default_section() {
        let sectionizer = Sectionizer::with_default_section("introduction");
        assert_eq!(sectionizer.default_section(), "INTRODUCTION");
        let sections = sectionizer.segment("Opening words.\nIntroduction\nMore words.");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections["INTRODUCTION"], "Opening words. More words.");

        assert_eq!(Sectionizer::with_default_section("  ").default_section(), DEFAULT_SECTION);
    }

    #[test]
    fn test_fold_lines_keeps_runs_in_order() {
        let runs = Sectionizer::new().fold_lines(["METHODS", "a", "RESULTS", "b", "METHODS", "c"]);
        let names: Vec<&str> = runs.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["METHODS", "RESULTS", "METHODS"]);
        assert_eq!(runs[2].lines, vec!["c".to_string()]);
        assert!(runs.iter().all(|r| r.headed));
    }

    fn line_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("METHODS".to_string()),
            Just("Results".to_string()),
            Just("II. Discussion".to_string()),
            "[w-z]{1,6}( [w-z]{1,6}){0,3}",
        ]
    }

    proptest! {
        #[test]
        fn prop_every_body_line_lands_in_exactly_one_section(
            lines in prop::collection::vec(line_strategy(), 0..20)
        ) {
            let text = lines.join("\n");
            let sections = segment(&text);

            let mut expected: Vec<&str> = lines
                .iter()
                .filter(|l| detect_heading(l).is_none())
                .flat_map(|l| l.split_whitespace())
                .collect();
            let mut actual: Vec<&str> = sections
                .values()
                .flat_map(|v| v.split_whitespace())
                .collect();
            expected.sort_unstable();
            actual.sort_unstable();
            prop_assert_eq!(actual, expected);
        }

        #[test]
        fn prop_unrepeated_headings_preserve_line_order(
            body in prop::collection::vec("[w-z]{1,6}", 0..6),
            tail in prop::collection::vec("[w-z]{1,6}", 0..6),
        ) {
            let mut lines: Vec<String> = body.clone();
            lines.push("RESULTS".to_string());
            lines.extend(tail.iter().cloned());
            let sections = segment(&lines.join("\n"));

            let joined: Vec<&str> = sections.values().filter(|v| !v.is_empty()).map(String::as_str).collect();
            let expected: Vec<String> = body.iter().chain(tail.iter()).cloned().collect();
            prop_assert_eq!(joined.join(" "), expected.join(" "));
        }
    }
}

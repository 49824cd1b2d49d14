//! Process-wide immutable lexicons: the predefined persona table, the
//! action-verb table, heading patterns and constraint extractors. Loaded
//! once and shared by reference; nothing here is mutable at runtime.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::persona::{JobType, PersonaCategory};

pub struct PersonaSpec {
    pub category: PersonaCategory,
    /// Phrases that identify the role string, checked as substrings of the
    /// normalized role and by token overlap.
    pub aliases: &'static [&'static str],
    /// Base keyword set seeded into the profile on a category match.
    pub keywords: &'static [&'static str],
    /// Focus-area terms used by the semantic score, distinct from literal
    /// keyword matching.
    pub focus_areas: &'static [&'static str],
}

pub static PERSONA_TABLE: &[PersonaSpec] = &[
    PersonaSpec {
        category: PersonaCategory::Travel,
        aliases: &["travel planner", "trip planner", "travel agent", "tour guide", "tourist"],
        keywords: &[
            "hotel", "restaurant", "itinerary", "transport", "budget", "beach", "coast",
            "city", "travel", "plan", "friends", "day trip", "accommodation", "sightseeing",
            "tour", "flight", "train", "booking", "reservation", "nightlife", "packing",
        ],
        focus_areas: &[
            "cities", "coastal", "beach", "cuisine", "dining", "nightlife", "entertainment",
            "packing", "accommodation", "budget", "activities",
        ],
    },
    PersonaSpec {
        category: PersonaCategory::Hr,
        aliases: &["hr professional", "hr manager", "human resources", "recruiter", "people operations"],
        keywords: &[
            "form", "fillable", "signature", "compliance", "onboarding", "field", "checkbox",
            "dropdown", "required", "document", "approval", "electronic", "sign", "pdf",
            "employee", "new hire", "paperwork", "tax form", "contract", "workflow",
        ],
        focus_areas: &["forms", "fillable", "conversion", "signature", "onboarding", "compliance"],
    },
    PersonaSpec {
        category: PersonaCategory::Food,
        aliases: &["food contractor", "caterer", "catering contractor", "chef", "cook"],
        keywords: &[
            "recipe", "vegetarian", "buffet", "ingredients", "preparation", "gluten-free",
            "menu", "dish", "cooking", "serving", "allergy", "dietary", "vegan", "meal",
            "course", "appetizer", "main course", "dessert", "salad", "soup",
        ],
        focus_areas: &["vegetarian", "buffet", "dinner", "lunch", "breakfast", "sides", "mains", "ingredients"],
    },
    PersonaSpec {
        category: PersonaCategory::Researcher,
        aliases: &["researcher", "research analyst", "scientist", "research assistant", "phd"],
        keywords: &[
            "research", "study", "methodology", "data", "analysis", "results", "findings",
            "literature", "hypothesis", "experiment", "conclusion", "review", "citation",
            "dataset", "evidence", "benchmark",
        ],
        focus_areas: &["methodology", "results", "findings", "literature", "datasets", "benchmarks"],
    },
    PersonaSpec {
        category: PersonaCategory::Student,
        aliases: &["student", "undergraduate", "graduate student", "learner", "pupil"],
        keywords: &[
            "exam", "study", "concept", "definition", "example", "chapter", "summary",
            "practice", "notes", "key", "revision", "quiz", "lecture", "assignment",
            "textbook", "exercise",
        ],
        focus_areas: &["concepts", "definitions", "examples", "exercises", "summary", "fundamentals"],
    },
    PersonaSpec {
        category: PersonaCategory::Investment,
        aliases: &["investment analyst", "financial analyst", "investor", "portfolio manager", "equity analyst"],
        keywords: &[
            "revenue", "profit", "growth", "market", "investment", "risk", "portfolio",
            "earnings", "margin", "trend", "forecast", "valuation", "dividend", "capital",
            "performance", "financials",
        ],
        focus_areas: &["revenue", "trends", "growth", "risk", "outlook", "financials"],
    },
];

/// Verb lexicon driving job-type classification. Declaration order breaks
/// ties between equally frequent verb categories.
pub static ACTION_VERBS: &[(&str, JobType)] = &[
    ("plan", JobType::Planning),
    ("organize", JobType::Planning),
    ("arrange", JobType::Planning),
    ("schedule", JobType::Planning),
    ("prepare", JobType::Planning),
    ("book", JobType::Planning),
    ("analyze", JobType::Analysis),
    ("evaluate", JobType::Analysis),
    ("assess", JobType::Analysis),
    ("compare", JobType::Analysis),
    ("review", JobType::Analysis),
    ("identify", JobType::Analysis),
    ("create", JobType::Creation),
    ("build", JobType::Creation),
    ("design", JobType::Creation),
    ("develop", JobType::Creation),
    ("write", JobType::Creation),
    ("make", JobType::Creation),
    ("learn", JobType::Learning),
    ("study", JobType::Learning),
    ("understand", JobType::Learning),
    ("practice", JobType::Learning),
    ("revise", JobType::Learning),
    ("research", JobType::Research),
    ("investigate", JobType::Research),
    ("explore", JobType::Research),
    ("survey", JobType::Research),
    ("summarize", JobType::Research),
    ("manage", JobType::Management),
    ("coordinate", JobType::Management),
    ("oversee", JobType::Management),
    ("administer", JobType::Management),
    ("supervise", JobType::Management),
];

/// Terms associated with each job type, folded into the semantic score
/// alongside the persona focus areas.
pub fn job_type_terms(job_type: JobType) -> &'static [&'static str] {
    match job_type {
        JobType::Planning => &["plan", "guide", "tips", "options", "schedule", "itinerary"],
        JobType::Analysis => &["analysis", "comparison", "overview", "breakdown", "evaluation"],
        JobType::Creation => &["steps", "instructions", "template", "procedure", "setup"],
        JobType::Learning => &["introduction", "basics", "concepts", "examples", "glossary"],
        JobType::Research => &["methodology", "results", "findings", "references", "data"],
        JobType::Management => &["process", "policy", "workflow", "checklist", "roles"],
        JobType::Unclassified => &[],
    }
}

/// Scope qualifiers treated as constraint keywords when present in the task.
pub static SCOPE_QUALIFIERS: &[&str] = &[
    "group", "corporate", "college", "friends", "family", "budget", "luxury", "vegetarian",
    "vegan", "gluten-free", "beginner", "advanced", "professional", "team", "individual",
];

/// Heading-style patterns, tried against single trimmed lines. The paired
/// number is the heading level implied by the pattern alone.
pub static HEADING_PATTERNS: Lazy<Vec<(Regex, u8)>> = Lazy::new(|| {
    vec![
        // "Chapter 3", "Section 2: ...", "Part 1"
        (Regex::new(r"^(?:Chapter|Section|Part)\s+\d+\b.*$").unwrap(), 1),
        // "2. Title", "3.1 Subtitle", "4.2.1 Detail"
        (Regex::new(r"^\d+(\.\d+)*\.?\s+\S.*$").unwrap(), 2),
        // "PACKING TIPS", all caps with optional trailing colon
        (Regex::new(r"^[A-Z][A-Z\s]{3,}:?$").unwrap(), 1),
        // "Budget Accommodations", short Title Case run
        (Regex::new(r"^(?:[A-Z][a-z']+\s+){0,6}[A-Z][a-z']+:?$").unwrap(), 2),
    ]
});

pub static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d+(?:[.,]\d+)?\b").unwrap());

pub static DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b\d+[-\s]*(?:day|days|week|weeks|month|months|hour|hours|night|nights|minute|minutes)\b")
        .unwrap()
});

/// Heading level implied by a numbered pattern like "3.1.2": one level per
/// dotted component, capped at 3.
pub fn numbered_heading_level(line: &str) -> Option<u8> {
    let prefix: String = line
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if prefix.is_empty() || !prefix.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return None;
    }
    // A bare number ("2026", a page number) is not a heading.
    if !line[prefix.len()..].chars().any(|c| c.is_alphabetic()) {
        return None;
    }
    let depth = prefix.trim_end_matches('.').split('.').count() as u8;
    Some(depth.min(3))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_persona_has_aliases_and_keywords() {
        for spec in PERSONA_TABLE {
            assert!(!spec.aliases.is_empty());
            assert!(!spec.keywords.is_empty());
            assert!(!spec.focus_areas.is_empty());
        }
    }

    #[test]
    fn heading_patterns_match_expected_shapes() {
        let matches = |line: &str| HEADING_PATTERNS.iter().any(|(re, _)| re.is_match(line));
        assert!(matches("Chapter 3"));
        assert!(matches("2.1 Scoring Model"));
        assert!(matches("PACKING TIPS"));
        assert!(matches("Budget Accommodations"));
        assert!(!matches("the quick brown fox jumps over the lazy dog"));
    }

    #[test]
    fn numbered_levels_follow_dot_depth() {
        assert_eq!(numbered_heading_level("2. Overview"), Some(1));
        assert_eq!(numbered_heading_level("3.1 Detail"), Some(2));
        assert_eq!(numbered_heading_level("4.2.1.9 Deep"), Some(3));
        assert_eq!(numbered_heading_level("Overview"), None);
        assert_eq!(numbered_heading_level("2026"), None);
    }

    #[test]
    fn duration_phrases_are_recognized() {
        assert!(DURATION_RE.is_match("a trip of 4 days"));
        assert!(DURATION_RE.is_match("two sessions of 90 minutes"));
        assert!(!DURATION_RE.is_match("no durations here"));
    }
}

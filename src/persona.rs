//! Persona/job context builder: turns a role string and a task string into
//! an immutable weighted-keyword profile shared by the scorer and refiner.
//!
//! Weighting contract: every keyword starts at 1.0 and multipliers compose
//! multiplicatively, never additively: x2.0 when the keyword occurs in
//! both role and task, x1.5 for recognized action verbs, x1.3 for keywords
//! that also appear in the focus-area set.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::lexicon::{self, PersonaSpec};
use crate::text;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonaCategory {
    Travel,
    Hr,
    Food,
    Researcher,
    Student,
    Investment,
    Generic,
}

/// Coarse task classification derived from action-verb analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobType {
    Planning,
    Analysis,
    Creation,
    Learning,
    Research,
    Management,
    Unclassified,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersonaProfile {
    pub category: PersonaCategory,
    /// Keyword → composed weight. `BTreeMap` keeps iteration deterministic.
    pub keywords: BTreeMap<String, f64>,
    pub focus_areas: BTreeSet<String>,
    pub job_type: JobType,
    /// Task verbs recognized by the lexicon, in their base form.
    pub action_verbs: BTreeSet<String>,
}

/// Resolves a role string against the predefined persona table.
///
/// A category matches when one of its alias phrases occurs verbatim in the
/// normalized role, or (the documented fallback threshold) when at least
/// 60% of an alias's tokens appear (stem-folded) among the role tokens.
/// Below that the caller takes the generic inference path.
pub fn resolve_persona(role: &str) -> Option<&'static PersonaSpec> {
    let role_norm = text::normalize(role);
    for spec in lexicon::PERSONA_TABLE {
        if spec.aliases.iter().any(|alias| role_norm.contains(alias)) {
            return Some(spec);
        }
    }

    let role_stems = text::stem_set(role);
    for spec in lexicon::PERSONA_TABLE {
        for alias in spec.aliases {
            let alias_tokens: Vec<&str> = alias.split_whitespace().collect();
            let hits = alias_tokens
                .iter()
                .filter(|t| role_stems.contains(&text::stem(t)))
                .count();
            if hits as f64 / alias_tokens.len() as f64 >= 0.6 {
                return Some(spec);
            }
        }
    }
    None
}

impl PersonaProfile {
    /// Builds the profile for one run. Deterministic and total: the same
    /// (role, task) pair always yields an identical profile, and an
    /// unmatched role falls back to a generic profile instead of failing.
    pub fn build(role: &str, task: &str) -> Self {
        let role_norm = text::normalize(role);
        let task_norm = text::normalize(task);
        let role_stems = text::stem_set(role);
        let task_stems = text::stem_set(task);

        let spec = resolve_persona(role);
        let category = spec.map_or(PersonaCategory::Generic, |s| s.category);

        let (job_type, action_verbs) = classify_job(&task_stems);

        let focus_areas: BTreeSet<String> = match spec {
            Some(s) => s.focus_areas.iter().map(|f| f.to_string()).collect(),
            // Generic profiles are seeded only from the role's own tokens.
            None => text::tokenize(role).into_iter().collect(),
        };
        let focus_stems: BTreeSet<String> = focus_areas
            .iter()
            .flat_map(|f| f.split_whitespace().map(text::stem))
            .collect();

        let mut candidates: BTreeSet<String> = BTreeSet::new();
        if let Some(s) = spec {
            candidates.extend(s.keywords.iter().map(|k| k.to_string()));
        }
        candidates.extend(text::tokenize(role));
        candidates.extend(text::tokenize(task));
        candidates.extend(action_verbs.iter().cloned());

        // Constraint-like tokens: quantities, durations, scope qualifiers.
        for m in lexicon::NUMBER_RE.find_iter(&task_norm) {
            candidates.insert(m.as_str().to_string());
        }
        for m in lexicon::DURATION_RE.find_iter(task) {
            candidates.insert(text::normalize(m.as_str()));
        }
        for q in lexicon::SCOPE_QUALIFIERS {
            if task_norm.contains(q) {
                candidates.insert((*q).to_string());
            }
        }

        let verb_stems: BTreeSet<String> =
            action_verbs.iter().map(|v| text::stem(v)).collect();

        let mut keywords = BTreeMap::new();
        for kw in candidates {
            let in_role = text::contains_term(&role_norm, &role_stems, &kw);
            let in_task = text::contains_term(&task_norm, &task_stems, &kw);
            let mut weight = 1.0;
            if in_role && in_task {
                weight *= 2.0;
            }
            if verb_stems.contains(&text::stem(&kw)) {
                weight *= 1.5;
            }
            if focus_areas.contains(&kw) || focus_stems.contains(&text::stem(&kw)) {
                weight *= 1.3;
            }
            keywords.insert(kw, weight);
        }

        PersonaProfile {
            category,
            keywords,
            focus_areas,
            job_type,
            action_verbs,
        }
    }

    /// Maximum achievable keyword score before normalization.
    pub fn total_weight(&self) -> f64 {
        self.keywords.values().sum()
    }
}

/// Counts lexicon verb hits in the task; the dominant category wins, ties
/// broken by lexicon declaration order. No hits at all → Unclassified.
fn classify_job(task_stems: &HashSet<String>) -> (JobType, BTreeSet<String>) {
    let mut verbs = BTreeSet::new();
    let mut counts: Vec<(JobType, usize)> = Vec::new();
    for (verb, job_type) in lexicon::ACTION_VERBS {
        if task_stems.contains(&text::stem(verb)) {
            verbs.insert((*verb).to_string());
            match counts.iter_mut().find(|(t, _)| t == job_type) {
                Some((_, c)) => *c += 1,
                None => counts.push((*job_type, 1)),
            }
        }
    }

    let mut best = (JobType::Unclassified, 0usize);
    for (job_type, count) in counts {
        if count > best.1 {
            best = (job_type, count);
        }
    }
    (best.0, verbs)
}

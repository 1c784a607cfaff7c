//! Per-category scorers
//!
//! Every scorer is a pure function of the scoring context: same resume, JD,
//! and settings always produce the same score. The fixed dispatch table at
//! the bottom defines the category order used by the engine.

use crate::config::ScoringConfig;
use crate::processing::matcher::KeywordMatch;
use crate::processing::requirements::{JdProfile, Priority, RequirementExtractor, RequirementKeyword};
use crate::processing::resume::ResumeProfile;
use crate::scoring::category::{CategoryKey, CategoryResult};
use strsim::jaro_winkler;

/// Everything a scorer may look at. Matches are index-aligned with the JD
/// requirement list.
pub struct ScoringContext<'a> {
    pub resume: &'a ResumeProfile,
    pub jd: &'a JdProfile,
    pub matches: &'a [KeywordMatch],
    pub red_flags: &'a [String],
    pub config: &'a ScoringConfig,
    pub strict: bool,
}

impl<'a> ScoringContext<'a> {
    fn matches_in(&self, category: CategoryKey) -> Vec<(&RequirementKeyword, &KeywordMatch)> {
        self.jd
            .requirements
            .iter()
            .zip(self.matches.iter())
            .filter(|(req, _)| req.category == category)
            .collect()
    }
}

pub trait CategoryScorer: Sync {
    fn key(&self) -> CategoryKey;
    fn score(&self, ctx: &ScoringContext) -> CategoryResult;
}

/// Coverage of matched keywords, with must-haves weighted 70/30 over
/// nice-to-haves. When a priority tier is empty its weight shifts to the
/// other tier; a category with no requirements at all is neutral (100).
fn keyword_coverage(ctx: &ScoringContext, category: CategoryKey) -> CategoryResult {
    let pairs = ctx.matches_in(category);
    if pairs.is_empty() {
        return CategoryResult::new(category, 100.0)
            .with_detail("keywords_required", 0)
            .with_detail("note", "no keywords extracted for this category");
    }

    let coverage = |priority: Priority| -> Option<f64> {
        let tier: Vec<_> = pairs.iter().filter(|(r, _)| r.priority == priority).collect();
        if tier.is_empty() {
            return None;
        }
        let hit = tier.iter().filter(|(_, m)| m.matched).count();
        Some(hit as f64 / tier.len() as f64)
    };

    let score = match (coverage(Priority::MustHave), coverage(Priority::NiceToHave)) {
        (Some(must), Some(nice)) => (0.7 * must + 0.3 * nice) * 100.0,
        (Some(must), None) => must * 100.0,
        (None, Some(nice)) => nice * 100.0,
        (None, None) => 100.0,
    };

    let matched: Vec<String> = pairs
        .iter()
        .filter(|(_, m)| m.matched)
        .map(|(_, m)| m.term.clone())
        .collect();
    let missing: Vec<String> = pairs
        .iter()
        .filter(|(_, m)| !m.matched)
        .map(|(_, m)| m.term.clone())
        .collect();
    let evidence: Vec<String> = pairs
        .iter()
        .filter(|(_, m)| m.matched && !m.evidence.is_empty())
        .map(|(_, m)| m.evidence.clone())
        .collect();

    CategoryResult::new(category, score)
        .with_detail("keywords_required", pairs.len())
        .with_detail("keywords_matched", matched)
        .with_detail("keywords_missing", missing)
        .with_evidence(evidence, ctx.config.max_evidence)
}

pub struct KeywordSkillsScorer;

impl CategoryScorer for KeywordSkillsScorer {
    fn key(&self) -> CategoryKey {
        CategoryKey::KeywordSkills
    }

    fn score(&self, ctx: &ScoringContext) -> CategoryResult {
        keyword_coverage(ctx, CategoryKey::KeywordSkills)
    }
}

pub struct ToolingStackScorer;

impl CategoryScorer for ToolingStackScorer {
    fn key(&self) -> CategoryKey {
        CategoryKey::ToolingStackMatch
    }

    fn score(&self, ctx: &ScoringContext) -> CategoryResult {
        keyword_coverage(ctx, CategoryKey::ToolingStackMatch)
    }
}

/// How much of the JD's tech vocabulary shows up inside each work
/// experience, weighted so recent roles count more than old ones.
pub struct ExperienceRelevanceScorer;

impl ExperienceRelevanceScorer {
    fn decay(years_ago: i32) -> f64 {
        if years_ago <= 3 {
            1.0
        } else if years_ago <= 7 {
            0.7
        } else {
            0.4
        }
    }
}

impl CategoryScorer for ExperienceRelevanceScorer {
    fn key(&self) -> CategoryKey {
        CategoryKey::ExperienceRelevance
    }

    fn score(&self, ctx: &ScoringContext) -> CategoryResult {
        if ctx.resume.experiences.is_empty() {
            return CategoryResult::new(self.key(), 0.0)
                .with_detail("note", "no dated work experience found");
        }

        let jd_terms: Vec<&str> = ctx
            .jd
            .requirements
            .iter()
            .filter(|r| {
                matches!(
                    r.category,
                    CategoryKey::KeywordSkills | CategoryKey::ToolingStackMatch
                )
            })
            .map(|r| r.term.as_str())
            .collect();
        if jd_terms.is_empty() {
            return CategoryResult::new(self.key(), 50.0)
                .with_detail("note", "JD lists no technical terms to compare against");
        }

        let mut weighted_sum = 0.0;
        let mut evidence = Vec::new();
        for exp in &ctx.resume.experiences {
            let weight = Self::decay(exp.recency(ctx.resume.now_year));
            let hits: Vec<&&str> = jd_terms
                .iter()
                .filter(|t| RequirementExtractor::contains_word(&exp.description, t))
                .collect();
            let overlap = hits.len() as f64 / jd_terms.len() as f64;
            weighted_sum += weight * overlap;
            if !hits.is_empty() {
                evidence.push(format!(
                    "{} ({}-{}): {}",
                    exp.title,
                    exp.start_year,
                    if exp.ongoing {
                        "present".to_string()
                    } else {
                        exp.end_year.to_string()
                    },
                    hits.iter().map(|t| **t).collect::<Vec<_>>().join(", ")
                ));
            }
        }

        // Dividing by the role count keeps the decay an absolute penalty:
        // the same overlap in an old role scores less than in a recent one.
        let score = 100.0 * weighted_sum / ctx.resume.experiences.len() as f64;
        CategoryResult::new(self.key(), score)
            .with_detail("experiences_considered", ctx.resume.experiences.len())
            .with_detail("jd_terms_compared", jd_terms.len())
            .with_evidence(evidence, ctx.config.max_evidence)
    }
}

/// Three-rung ladder against the JD's target title: a held title that
/// contains it (or sits above the fuzzy threshold) is a direct hit, a held
/// title sharing one of the JD's role keywords is an adjacent role, and
/// anything else is a different line of work.
pub struct RoleMatchScorer;

const ROLE_DIRECT: f64 = 95.0;
const ROLE_ADJACENT: f64 = 70.0;
const ROLE_UNRELATED: f64 = 20.0;
const TITLE_SIMILARITY_THRESHOLD: f64 = 0.85;

impl CategoryScorer for RoleMatchScorer {
    fn key(&self) -> CategoryKey {
        CategoryKey::RoleMatch
    }

    fn score(&self, ctx: &ScoringContext) -> CategoryResult {
        if ctx.jd.target_title.is_empty() {
            return CategoryResult::new(self.key(), 50.0)
                .with_detail("note", "JD has no discernible title");
        }
        if ctx.resume.experiences.is_empty() {
            return CategoryResult::new(self.key(), 0.0)
                .with_detail("note", "no held titles to compare");
        }

        let target = &ctx.jd.target_title;
        let mut best_similarity = 0.0;
        let mut best_title = String::new();
        let mut adjacent_title: Option<String> = None;
        for exp in &ctx.resume.experiences {
            let held = exp.title.to_lowercase();
            let similarity = if held.contains(target.as_str()) || target.contains(&held) {
                1.0
            } else {
                jaro_winkler(&held, target)
            };
            if similarity > best_similarity {
                best_similarity = similarity;
                best_title = exp.title.clone();
            }
            if adjacent_title.is_none()
                && ctx.jd.role_keywords.iter().any(|k| {
                    RequirementExtractor::contains_word(&held, k)
                })
            {
                adjacent_title = Some(exp.title.clone());
            }
        }

        let (score, reason) = if best_similarity >= TITLE_SIMILARITY_THRESHOLD {
            (ROLE_DIRECT, format!("held title matches: {}", best_title))
        } else if let Some(title) = adjacent_title {
            best_title = title;
            (
                ROLE_ADJACENT,
                format!("adjacent role: {}", best_title),
            )
        } else {
            (
                ROLE_UNRELATED,
                format!("no related title held (closest: {})", best_title),
            )
        };

        CategoryResult::new(self.key(), score)
            .with_detail("target_title", target.clone())
            .with_detail("closest_held_title", best_title)
            .with_evidence(vec![reason], ctx.config.max_evidence)
    }
}

/// Saturating years comparison: meeting the stated requirement earns the
/// full score, falling short decays linearly. Exceeding it earns no bonus.
pub struct SeniorityMatchScorer;

impl CategoryScorer for SeniorityMatchScorer {
    fn key(&self) -> CategoryKey {
        CategoryKey::SeniorityMatch
    }

    fn score(&self, ctx: &ScoringContext) -> CategoryResult {
        let Some(required) = ctx.jd.required_years else {
            return CategoryResult::new(self.key(), 50.0)
                .with_detail("note", "JD states no experience requirement");
        };

        let candidate = ctx.resume.total_years;
        let score = if candidate >= required as f64 {
            100.0
        } else if required == 0 {
            100.0
        } else {
            100.0 * candidate / required as f64
        };

        CategoryResult::new(self.key(), score)
            .with_detail("required_years", required)
            .with_detail("candidate_years", (candidate * 10.0).round() / 10.0)
    }
}

pub struct EducationMatchScorer;

impl CategoryScorer for EducationMatchScorer {
    fn key(&self) -> CategoryKey {
        CategoryKey::EducationMatch
    }

    fn score(&self, ctx: &ScoringContext) -> CategoryResult {
        if ctx.jd.required_degrees.is_empty() {
            return CategoryResult::new(self.key(), 75.0)
                .with_detail("note", "JD states no education requirement");
        }
        if ctx.resume.education.is_empty() {
            return CategoryResult::new(self.key(), 30.0)
                .with_detail("required", ctx.jd.required_degrees.clone())
                .with_detail("note", "no education section found");
        }

        let credentials: Vec<String> = ctx
            .resume
            .education
            .iter()
            .map(|e| e.credential.to_lowercase())
            .collect();
        let matched: Vec<&String> = ctx
            .jd
            .required_degrees
            .iter()
            .filter(|d| credentials.iter().any(|c| c.contains(d.as_str())))
            .collect();

        // Fraction of the JD's credential terms the resume covers.
        let score = 100.0 * matched.len() as f64 / ctx.jd.required_degrees.len() as f64;
        CategoryResult::new(self.key(), score)
            .with_detail("required", ctx.jd.required_degrees.clone())
            .with_detail(
                "matched",
                matched.iter().map(|d| d.to_string()).collect::<Vec<_>>(),
            )
            .with_detail("held", credentials)
    }
}

/// Whether the matched must-have skills were used recently, not just listed
/// somewhere on the resume.
pub struct RecencyMatchScorer;

impl CategoryScorer for RecencyMatchScorer {
    fn key(&self) -> CategoryKey {
        CategoryKey::RecencyMatch
    }

    fn score(&self, ctx: &ScoringContext) -> CategoryResult {
        let matched_musts: Vec<&KeywordMatch> = ctx
            .jd
            .requirements
            .iter()
            .zip(ctx.matches.iter())
            .filter(|(req, _)| {
                req.priority == Priority::MustHave
                    && matches!(
                        req.category,
                        CategoryKey::KeywordSkills | CategoryKey::ToolingStackMatch
                    )
            })
            .map(|(_, m)| m)
            .collect();

        if matched_musts.is_empty() {
            return CategoryResult::new(self.key(), 50.0)
                .with_detail("note", "JD lists no must-have skills");
        }
        if matched_musts.iter().all(|m| !m.matched) {
            return CategoryResult::new(self.key(), 0.0)
                .with_detail("note", "no must-have skills matched anywhere");
        }

        let window = ctx.config.recent_window_years;
        let recent_text: String = ctx
            .resume
            .experiences
            .iter()
            .filter(|e| e.recency(ctx.resume.now_year) <= window)
            .map(|e| format!("{} {}", e.title, e.description))
            .collect::<Vec<_>>()
            .join(" ");

        let hits: Vec<&&KeywordMatch> = matched_musts
            .iter()
            .filter(|m| m.matched)
            .filter(|m| RequirementExtractor::contains_word(&recent_text, &m.term))
            .collect();
        let matched_count = matched_musts.iter().filter(|m| m.matched).count();
        let score = 100.0 * hits.len() as f64 / matched_count as f64;

        CategoryResult::new(self.key(), score)
            .with_detail("recent_window_years", window)
            .with_detail(
                "recent_skills",
                hits.iter().map(|m| m.term.clone()).collect::<Vec<_>>(),
            )
    }
}

/// Starts from a perfect score and subtracts a fixed penalty per detected
/// flag. Strict mode raises the penalty.
pub struct RedFlagsScorer;

impl CategoryScorer for RedFlagsScorer {
    fn key(&self) -> CategoryKey {
        CategoryKey::RedFlags
    }

    fn score(&self, ctx: &ScoringContext) -> CategoryResult {
        let penalty = ctx.config.flag_penalty_for(ctx.strict);
        let score = 100.0 - penalty * ctx.red_flags.len() as f64;

        CategoryResult::new(self.key(), score)
            .with_detail("flags_detected", ctx.red_flags.len())
            .with_detail("penalty_per_flag", penalty)
            .with_evidence(ctx.red_flags.to_vec(), usize::MAX)
    }
}

/// Category evaluation order. Iteration over this table is the only way the
/// engine invokes scorers, so output ordering never depends on map iteration.
pub static SCORERS: [&dyn CategoryScorer; 8] = [
    &KeywordSkillsScorer,
    &ExperienceRelevanceScorer,
    &RoleMatchScorer,
    &SeniorityMatchScorer,
    &EducationMatchScorer,
    &ToolingStackScorer,
    &RecencyMatchScorer,
    &RedFlagsScorer,
];

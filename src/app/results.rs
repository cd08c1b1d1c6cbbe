//! Display model for a finished analysis

use super::animation::ScoreAnimation;
use crate::constants::{NONE_IDENTIFIED, NO_MISSING_SKILLS};
use crate::types::AnalysisResult;
use chrono::{DateTime, Local};
use std::time::Instant;

/// Skill chips, or a single placeholder when there is nothing to show
#[derive(Debug, Clone, PartialEq)]
pub enum ChipList {
    Chips(Vec<String>),
    Placeholder(&'static str),
}

/// Everything the results view paints. Built once per display; the score
/// animations start the moment it is created.
#[derive(Debug, Clone)]
pub struct ResultsView {
    pub match_score: ScoreAnimation,
    pub ats_score: ScoreAnimation,
    pub matched_skills: ChipList,
    pub missing_skills: ChipList,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub improvements: Vec<String>,
    pub reasoning: String,
    pub received_at: DateTime<Local>,
}

fn list_or_placeholder(items: Vec<String>) -> Vec<String> {
    if items.is_empty() {
        vec![NONE_IDENTIFIED.to_string()]
    } else {
        items
    }
}

impl ResultsView {
    pub fn new(result: AnalysisResult) -> Self {
        Self::new_at(result, Instant::now())
    }

    pub fn new_at(result: AnalysisResult, now: Instant) -> Self {
        let missing_skills = if result.missing_skills.is_empty() {
            ChipList::Placeholder(NO_MISSING_SKILLS)
        } else {
            ChipList::Chips(result.missing_skills)
        };
        Self {
            match_score: ScoreAnimation::starting_at(result.match_score, now),
            ats_score: ScoreAnimation::starting_at(result.ats_score, now),
            matched_skills: ChipList::Chips(result.matched_skills),
            missing_skills,
            strengths: list_or_placeholder(result.strengths),
            weaknesses: list_or_placeholder(result.weaknesses),
            improvements: list_or_placeholder(result.improvements),
            reasoning: result.reasoning,
            received_at: Local::now(),
        }
    }

    /// Whether either ring still needs frames
    pub fn is_animating(&self, now: Instant) -> bool {
        !self.match_score.frame(now).done || !self.ats_score.frame(now).done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn result() -> AnalysisResult {
        AnalysisResult {
            match_score: 84,
            ats_score: 41,
            matched_skills: vec!["Rust".into(), "Tokio".into(), "<b>SQL</b>".into()],
            missing_skills: vec!["Kubernetes".into()],
            strengths: vec!["Ownership of services".into()],
            weaknesses: Vec::new(),
            improvements: vec!["Quantify impact".into(), "Add links".into()],
            reasoning: "Strong <i>backend</i> profile.".into(),
        }
    }

    #[test]
    fn keeps_order_and_text_verbatim() {
        let view = ResultsView::new(result());
        assert_eq!(
            view.matched_skills,
            ChipList::Chips(vec!["Rust".into(), "Tokio".into(), "<b>SQL</b>".into()])
        );
        assert_eq!(view.missing_skills, ChipList::Chips(vec!["Kubernetes".into()]));
        assert_eq!(view.improvements, vec!["Quantify impact", "Add links"]);
        assert_eq!(view.reasoning, "Strong <i>backend</i> profile.");
    }

    #[test]
    fn empty_missing_skills_shows_placeholder() {
        let mut r = result();
        r.missing_skills.clear();
        let view = ResultsView::new(r);
        assert_eq!(view.missing_skills, ChipList::Placeholder("No major skills missing!"));
    }

    #[test]
    fn empty_lists_show_none_identified() {
        let view = ResultsView::new(result());
        assert_eq!(view.weaknesses, vec!["None identified"]);
        assert_eq!(view.strengths, vec!["Ownership of services"]);
    }

    #[test]
    fn empty_matched_skills_stay_empty() {
        let mut r = result();
        r.matched_skills.clear();
        let view = ResultsView::new(r);
        assert_eq!(view.matched_skills, ChipList::Chips(Vec::new()));
    }

    #[test]
    fn both_scores_animate_from_the_same_start() {
        let now = Instant::now();
        let view = ResultsView::new_at(result(), now);
        assert_eq!(view.match_score.target(), 84);
        assert_eq!(view.ats_score.target(), 41);
        assert!(view.is_animating(now));
        assert!(!view.is_animating(now + Duration::from_millis(1500)));
    }
}

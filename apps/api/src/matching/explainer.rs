use crate::matching::profile::JobRequirement;
use crate::matching::scorer::ScoreBreakdown;

/// Renders the one-line detail shown next to each recommendation.
///
/// Output depends only on the breakdown and the job: same inputs, same text.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchExplainer;

impl MatchExplainer {
    pub fn explain(&self, breakdown: &ScoreBreakdown, job: &JobRequirement) -> String {
        if job.required.is_empty() {
            return "No required skills configured for this job".to_string();
        }

        let summary = format!(
            "Matches {} of {} required skills",
            breakdown.matched.len(),
            job.required.len()
        );

        if breakdown.missing.is_empty() {
            return summary;
        }

        // SkillSet iterates in lexical order
        let missing: Vec<&str> = breakdown.missing.iter().map(|k| k.as_str()).collect();
        format!("{summary}; missing: {}", missing.join(", "))
    }
}

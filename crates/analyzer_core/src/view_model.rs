use crate::Notification;

#[derive(Debug, Clone, PartialEq)]
pub struct AppViewModel {
    pub screen: Screen,
    pub notification: Option<Notification>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Form(FormView),
    Result(ResultView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub file_name: Option<String>,
    pub job_description: String,
    pub in_flight: bool,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub match_percentage: f64,
    /// Percentage as displayed, rounded to the nearest integer.
    pub rounded_percentage: i64,
    pub category: ScoreCategory,
    pub missing_keywords: Vec<String>,
    pub improvement_summary: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    Excellent,
    Good,
    Poor,
}

impl ScoreTier {
    pub fn as_str(self) -> &'static str {
        match self {
            ScoreTier::Excellent => "excellent",
            ScoreTier::Good => "good",
            ScoreTier::Poor => "poor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreCategory {
    pub tier: ScoreTier,
    pub label: &'static str,
}

/// Buckets a match percentage: `>= 80` excellent, `>= 60` good, otherwise poor.
///
/// NaN compares false against both thresholds and lands in `Poor`.
pub fn categorize(match_percentage: f64) -> ScoreCategory {
    if match_percentage >= 80.0 {
        ScoreCategory {
            tier: ScoreTier::Excellent,
            label: "Excellent match!",
        }
    } else if match_percentage >= 60.0 {
        ScoreCategory {
            tier: ScoreTier::Good,
            label: "Good match with room for improvement",
        }
    } else {
        ScoreCategory {
            tier: ScoreTier::Poor,
            label: "Significant gaps detected",
        }
    }
}

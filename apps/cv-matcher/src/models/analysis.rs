use serde::{Deserialize, Serialize};

/// Percentage scores (0–100) describing how well a résumé fits a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub overall_score: f64,
    pub skills_match: f64,
    pub experience_match: f64,
    pub education_match: f64,
    pub keywords_match: f64,
}

impl MatchScore {
    /// Labelled scores in display order.
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("Overall", self.overall_score),
            ("Skills", self.skills_match),
            ("Experience", self.experience_match),
            ("Education", self.education_match),
            ("Keywords", self.keywords_match),
        ]
    }

    /// Returns the label of the first score that is not a finite value in 0–100.
    pub fn first_out_of_range(&self) -> Option<(&'static str, f64)> {
        self.entries()
            .into_iter()
            .find(|(_, value)| !value.is_finite() || !(0.0..=100.0).contains(value))
    }
}

/// Qualitative feedback on the résumé's presentation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormattingAdvice {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Result of one `analyze_cv` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvAnalysis {
    pub match_score: MatchScore,
    pub formatting_advice: FormattingAdvice,
    pub summary: String,
    pub recommendation: String,
}

/// Display bucket for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreColor {
    Green,
    Yellow,
    Orange,
    Red,
}

impl ScoreColor {
    /// Buckets: ≥80 green, 60–79.x yellow, 40–59.x orange, below 40 (or NaN) red.
    pub fn for_score(score: f64) -> Self {
        if score >= 80.0 {
            ScoreColor::Green
        } else if score >= 60.0 {
            ScoreColor::Yellow
        } else if score >= 40.0 {
            ScoreColor::Orange
        } else {
            ScoreColor::Red
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreColor::Green => "green",
            ScoreColor::Yellow => "yellow",
            ScoreColor::Orange => "orange",
            ScoreColor::Red => "red",
        }
    }
}

impl std::fmt::Display for ScoreColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

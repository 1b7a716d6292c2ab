pub mod analysis;

pub use analysis::{CvAnalysis, FormattingAdvice, MatchScore, ScoreColor};

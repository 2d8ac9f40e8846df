use serde::{Deserialize, Serialize};

/// Perceptual audio quality, independent of what was said.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityAssessment {
    pub quality_score: f32,
    pub noise_score: f32,
    /// `quality_score - noise_score`; negative when the clip reads as closer to "noisy".
    pub quality_confidence: f32,
}

impl QualityAssessment {
    pub fn from_scores(quality_score: f32, noise_score: f32) -> Self {
        let quality_score = quality_score.clamp(-1.0, 1.0);
        let noise_score = noise_score.clamp(-1.0, 1.0);
        Self {
            quality_score,
            noise_score,
            quality_confidence: quality_score - noise_score,
        }
    }
}

//! Tracker configuration.

use crate::error::{Result, TrackerError};

/// Weights of the four association signals. They must sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchWeights {
    pub horizontal: f32,
    pub vertical: f32,
    pub iou: f32,
    pub size: f32,
}

impl Default for MatchWeights {
    fn default() -> Self {
        // Lateral position is the steadiest cue on the floor plane; vertical
        // position swings with most exercise motions.
        Self {
            horizontal: 0.35,
            vertical: 0.15,
            iou: 0.25,
            size: 0.25,
        }
    }
}

impl MatchWeights {
    pub fn sum(&self) -> f32 {
        self.horizontal + self.vertical + self.iou + self.size
    }
}

/// How scored candidate pairs are turned into assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssignmentStrategy {
    /// Best-first greedy walk over candidates sorted by score.
    #[default]
    Greedy,
    /// Maximum total score via the Jonker-Volgenant solver.
    Optimal,
}

/// Configuration for the [`PersonTracker`](crate::PersonTracker).
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    pub weights: MatchWeights,
    /// Fraction of the frame width at which the horizontal score reaches 0.
    pub horizontal_gate_ratio: f32,
    /// Fraction of the frame height at which the vertical score reaches 0.
    pub vertical_gate_ratio: f32,
    /// Pairs scoring below this are never matched.
    pub min_match_score: f32,
    /// EMA factor for the smoothed center.
    pub smoothing_alpha: f32,
    /// Missing frames tolerated before an unselected identity is retired.
    pub max_missing: u32,
    /// Missing frames tolerated before the selected identity is retired.
    pub selected_max_missing: u32,
    pub assignment: AssignmentStrategy,
    /// Select the only identity when exactly one exists and none is selected.
    pub auto_select_single: bool,
    /// Also report live identities that were not matched this frame, with
    /// their last box and zero confidence.
    pub emit_unmatched: bool,
    pub label_prefix: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            weights: MatchWeights::default(),
            horizontal_gate_ratio: 0.5,
            vertical_gate_ratio: 0.5,
            min_match_score: 0.35,
            smoothing_alpha: 0.4,
            max_missing: 45,
            selected_max_missing: 300,
            assignment: AssignmentStrategy::Greedy,
            auto_select_single: false,
            emit_unmatched: false,
            label_prefix: "Person".to_string(),
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<()> {
        let w = &self.weights;
        if [w.horizontal, w.vertical, w.iou, w.size]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(TrackerError::InvalidConfig(format!(
                "match weights must be finite and non-negative, got {w:?}"
            )));
        }
        if (w.sum() - 1.0).abs() > 1e-3 {
            return Err(TrackerError::InvalidConfig(format!(
                "match weights must sum to 1, got {}",
                w.sum()
            )));
        }
        if !(self.horizontal_gate_ratio > 0.0 && self.vertical_gate_ratio > 0.0) {
            return Err(TrackerError::InvalidConfig(
                "gate ratios must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_match_score) {
            return Err(TrackerError::InvalidConfig(format!(
                "min_match_score must be in [0, 1], got {}",
                self.min_match_score
            )));
        }
        if !(self.smoothing_alpha > 0.0 && self.smoothing_alpha <= 1.0) {
            return Err(TrackerError::InvalidConfig(format!(
                "smoothing_alpha must be in (0, 1], got {}",
                self.smoothing_alpha
            )));
        }
        Ok(())
    }
}

/// Frame dimensions in pixels. Both are guaranteed non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSize {
    width: u32,
    height: u32,
}

impl FrameSize {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(TrackerError::InvalidFrameSize { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TrackerConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.weights.sum() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_unbalanced_weights() {
        let mut config = TrackerConfig::default();
        config.weights.vertical = 0.5;
        assert!(matches!(
            config.validate(),
            Err(TrackerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_bad_alpha() {
        let config = TrackerConfig {
            smoothing_alpha: 0.0,
            ..TrackerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_frame_size_rejects_zero() {
        assert_eq!(
            FrameSize::new(0, 480),
            Err(TrackerError::InvalidFrameSize {
                width: 0,
                height: 480
            })
        );
        assert!(FrameSize::new(640, 480).is_ok());
    }
}

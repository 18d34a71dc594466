// Decision Engine
// Maps the max-similarity gap between the two prompt polarities into a
// prediction and a bounded confidence.

use crate::models::Prediction;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AnalysisMode {
    Image,
    Text,
}

impl AnalysisMode {
    pub fn from_str(val: &str) -> Option<Self> {
        match val.trim().to_lowercase().as_str() {
            "image" => Some(Self::Image),
            "text" => Some(Self::Text),
            _ => None,
        }
    }

    pub fn policy(self) -> DecisionPolicy {
        match self {
            AnalysisMode::Image => IMAGE_POLICY,
            AnalysisMode::Text => TEXT_POLICY,
        }
    }
}

/// Threshold and confidence-scaling constants for one analysis mode.
///
/// These are inherited heuristics, not calibrated against ground truth.
/// The caps keep decided-band confidence bounded; the deadband is
/// symmetric around zero with strict comparisons at its edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionPolicy {
    /// Half-width of the uncertain band around diff = 0.
    pub deadband: f64,
    /// Confidence floor once a side wins.
    pub decided_base: f64,
    /// Confidence gained per unit of |diff| on a decided outcome.
    pub decided_scale: f64,
    /// Upper bound for decided-outcome confidence.
    pub confidence_cap: f64,
    /// Confidence floor inside the deadband.
    pub uncertain_base: f64,
    /// Confidence gained per unit of |diff| inside the deadband.
    pub uncertain_scale: f64,
}

pub const IMAGE_POLICY: DecisionPolicy = DecisionPolicy {
    deadband: 0.05,
    decided_base: 50.0,
    decided_scale: 200.0,
    confidence_cap: 85.0,
    uncertain_base: 30.0,
    uncertain_scale: 100.0,
};

pub const TEXT_POLICY: DecisionPolicy = DecisionPolicy {
    deadband: 0.03,
    decided_base: 45.0,
    decided_scale: 300.0,
    confidence_cap: 80.0,
    uncertain_base: 25.0,
    uncertain_scale: 150.0,
};

/// Pure function of `diff`: same input always yields the same prediction
/// and confidence. The sign of `diff` picks the winning polarity, its
/// magnitude the confidence.
pub fn decide(policy: &DecisionPolicy, diff: f64) -> (Prediction, f64) {
    if diff > policy.deadband {
        let confidence = (policy.decided_base + diff * policy.decided_scale)
            .min(policy.confidence_cap);
        (Prediction::AiGenerated, confidence)
    } else if diff < -policy.deadband {
        let confidence = (policy.decided_base + diff.abs() * policy.decided_scale)
            .min(policy.confidence_cap);
        (Prediction::HumanGenerated, confidence)
    } else {
        let confidence = policy.uncertain_base + diff.abs() * policy.uncertain_scale;
        (Prediction::Uncertain, confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_scenarios() {
        let (p, c) = decide(&IMAGE_POLICY, 0.10);
        assert_eq!(p, Prediction::AiGenerated);
        assert!((c - 70.0).abs() < 1e-9);

        let (p, c) = decide(&IMAGE_POLICY, -0.20);
        assert_eq!(p, Prediction::HumanGenerated);
        assert!((c - 85.0).abs() < 1e-9); // 50 + 40 capped at 85

        let (p, c) = decide(&IMAGE_POLICY, 0.02);
        assert_eq!(p, Prediction::Uncertain);
        assert!((c - 32.0).abs() < 1e-9);
    }

    #[test]
    fn test_text_scenarios() {
        let (p, c) = decide(&TEXT_POLICY, 0.04);
        assert_eq!(p, Prediction::AiGenerated);
        assert!((c - 57.0).abs() < 1e-9);

        let (p, c) = decide(&TEXT_POLICY, -0.04);
        assert_eq!(p, Prediction::HumanGenerated);
        assert!((c - 57.0).abs() < 1e-9);
    }

    #[test]
    fn test_deadband_edges_are_uncertain() {
        // Strict comparisons: exactly at the threshold stays uncertain.
        let (p, _) = decide(&IMAGE_POLICY, 0.05);
        assert_eq!(p, Prediction::Uncertain);
        let (p, _) = decide(&IMAGE_POLICY, -0.05);
        assert_eq!(p, Prediction::Uncertain);
        let (p, _) = decide(&TEXT_POLICY, 0.03);
        assert_eq!(p, Prediction::Uncertain);
        let (p, _) = decide(&TEXT_POLICY, -0.03);
        assert_eq!(p, Prediction::Uncertain);
    }

    #[test]
    fn test_just_past_deadband_decides() {
        let (p, _) = decide(&IMAGE_POLICY, 0.0501);
        assert_eq!(p, Prediction::AiGenerated);
        let (p, _) = decide(&TEXT_POLICY, -0.0301);
        assert_eq!(p, Prediction::HumanGenerated);
    }

    #[test]
    fn test_confidence_caps() {
        for diff in [0.2, 0.5, 1.0, 2.0] {
            let (_, c) = decide(&IMAGE_POLICY, diff);
            assert!(c <= 85.0);
            let (_, c) = decide(&TEXT_POLICY, diff);
            assert!(c <= 80.0);
            let (_, c) = decide(&IMAGE_POLICY, -diff);
            assert!(c <= 85.0);
        }
    }

    #[test]
    fn test_decide_is_deterministic() {
        for i in -60..=60 {
            let diff = i as f64 / 100.0;
            let first = decide(&IMAGE_POLICY, diff);
            let second = decide(&IMAGE_POLICY, diff);
            assert_eq!(first.0, second.0);
            assert_eq!(first.1, second.1);
        }
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!(AnalysisMode::from_str("image"), Some(AnalysisMode::Image));
        assert_eq!(AnalysisMode::from_str(" TEXT "), Some(AnalysisMode::Text));
        assert_eq!(AnalysisMode::from_str("video"), None);
    }

    #[test]
    fn test_mode_policy_mapping() {
        assert_eq!(AnalysisMode::Image.policy(), IMAGE_POLICY);
        assert_eq!(AnalysisMode::Text.policy(), TEXT_POLICY);
    }
}

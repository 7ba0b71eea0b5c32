use serde::{Deserialize, Serialize};

use super::FraudIndicator;

/// Discrete fraud-risk tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    None,
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub const fn from_indicator_count(count: usize) -> Self {
        match count {
            0 => RiskTier::None,
            1 => RiskTier::Low,
            2 => RiskTier::Medium,
            _ => RiskTier::High,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RiskTier::None => "No Fraud Detected",
            RiskTier::Low => "Low Risk of Fraud",
            RiskTier::Medium => "Medium Risk of Fraud",
            RiskTier::High => "High Risk of Fraud",
        }
    }

    /// Presentation color token. Owned here so label and color never disagree.
    pub const fn color_hint(self) -> &'static str {
        match self {
            RiskTier::None => "green",
            RiskTier::Low => "yellow",
            RiskTier::Medium => "amber",
            RiskTier::High => "red",
        }
    }
}

/// Classification outcome with the trail of rules that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskVerdict {
    pub tier: RiskTier,
    pub label: String,
    pub color_hint: String,
    pub override_triggered: bool,
    pub indicators: Vec<FraudIndicator>,
}

impl RiskVerdict {
    pub(crate) fn overridden() -> Self {
        Self::with_tier(RiskTier::High, true, Vec::new())
    }

    pub(crate) fn from_indicators(indicators: Vec<FraudIndicator>) -> Self {
        let tier = RiskTier::from_indicator_count(indicators.len());
        Self::with_tier(tier, false, indicators)
    }

    fn with_tier(
        tier: RiskTier,
        override_triggered: bool,
        indicators: Vec<FraudIndicator>,
    ) -> Self {
        Self {
            tier,
            label: tier.label().to_string(),
            color_hint: tier.color_hint().to_string(),
            override_triggered,
            indicators,
        }
    }

    pub fn summary(&self) -> String {
        if self.override_triggered {
            return format!("{}: reported income far exceeds the estimate", self.label);
        }
        if self.indicators.is_empty() {
            return self.label.clone();
        }
        let names: Vec<&str> = self
            .indicators
            .iter()
            .map(|indicator| indicator.code())
            .collect();
        format!("{} ({})", self.label, names.join(", "))
    }
}

//! Input entities: poll samples, historical baselines, analyst
//! adjustments, and scripted external factors.

use serde::{Deserialize, Serialize};

/// Compact entity code — a party acronym or candidate list identifier.
///
/// `Ord` follows the underlying string, which is what every
/// deterministic tie-break in the engine relies on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Create an entity id from any string-like code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The raw code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl From<String> for EntityId {
    fn from(code: String) -> Self {
        Self(code)
    }
}

/// One polled vote-share reading for an entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollSample {
    pub entity: EntityId,
    /// Vote share in [0, 1].
    pub share: f64,
    /// Polling institute or publication label.
    pub source: String,
}

/// A prior election's result for one entity, used as baseline.
///
/// Shares for a given year and scope sum to at most 1; the remainder is
/// the "others" residual the engine tracks separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalResult {
    pub entity: EntityId,
    /// Vote share in [0, 1].
    pub share: f64,
    pub year: i32,
}

/// Analyst override for one entity, applied additively after blending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustmentSpec {
    pub entity: EntityId,
    /// Signed share delta in [-1, 1].
    pub delta: f64,
    /// Free-text justification recorded by the analyst.
    pub rationale: String,
}

/// Direction of a scripted event's effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    /// Sign applied to the factor magnitude.
    pub fn signum(self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }
}

/// Expected persistence class of an external factor's effect.
///
/// The magnitude retained by each class is a configured policy
/// (`FactorConfig`), not a hidden constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactDuration {
    ShortTerm,
    MediumTerm,
    LongTerm,
}

impl ImpactDuration {
    /// All duration classes.
    pub const ALL: &'static [ImpactDuration] =
        &[Self::ShortTerm, Self::MediumTerm, Self::LongTerm];

    pub fn name(&self) -> &'static str {
        match self {
            Self::ShortTerm => "short_term",
            Self::MediumTerm => "medium_term",
            Self::LongTerm => "long_term",
        }
    }
}

impl std::fmt::Display for ImpactDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A scripted event effect on a set of entities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalFactor {
    pub description: String,
    pub polarity: Polarity,
    /// Effect magnitude in [0, 1], before duration scaling.
    pub magnitude: f64,
    pub duration: ImpactDuration,
    /// Entities the event touches; ids outside the request universe are
    /// ignored.
    pub affected: Vec<EntityId>,
}

impl ExternalFactor {
    /// Signed effect on one affected entity's share, given the retention
    /// factor of this factor's duration class.
    pub fn signed_effect(&self, retention: f64) -> f64 {
        self.polarity.signum() * self.magnitude * retention
    }
}

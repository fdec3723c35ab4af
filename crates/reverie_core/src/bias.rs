//! Bias profile: persistent interpretive leanings as bounded scalars.
//!
//! The distortion overlay only ever recognizes four traits, so the open
//! string-keyed map of earlier designs is a closed enum here; unknown names
//! are rejected when the profile is configured, not silently dropped.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The recognized bias traits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiasKind {
    Paranoia,
    Hope,
    SelfDoubt,
    Nostalgia,
}

/// Error returned when a bias name fails to parse at configuration time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown bias '{0}', expected one of: paranoia, hope, self_doubt, nostalgia")]
pub struct BiasParseError(pub String);

impl BiasKind {
    pub const ALL: [BiasKind; 4] = [
        BiasKind::Paranoia,
        BiasKind::Hope,
        BiasKind::SelfDoubt,
        BiasKind::Nostalgia,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BiasKind::Paranoia => "paranoia",
            BiasKind::Hope => "hope",
            BiasKind::SelfDoubt => "self_doubt",
            BiasKind::Nostalgia => "nostalgia",
        }
    }

    fn index(self) -> usize {
        match self {
            BiasKind::Paranoia => 0,
            BiasKind::Hope => 1,
            BiasKind::SelfDoubt => 2,
            BiasKind::Nostalgia => 3,
        }
    }
}

impl fmt::Display for BiasKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BiasKind {
    type Err = BiasParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let lowered = raw.trim().to_lowercase();
        BiasKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.label() == lowered)
            .ok_or_else(|| BiasParseError(raw.to_string()))
    }
}

/// Per-trait strengths, each clamped to [-1.0, 1.0].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasProfile {
    strengths: [f32; 4],
}

impl Default for BiasProfile {
    fn default() -> Self {
        // Small positive leanings: paranoia, hope, self_doubt, nostalgia.
        Self {
            strengths: [0.1, 0.2, 0.15, 0.1],
        }
    }
}

impl BiasProfile {
    pub fn strength(&self, kind: BiasKind) -> f32 {
        self.strengths[kind.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (BiasKind, f32)> + '_ {
        BiasKind::ALL
            .iter()
            .map(move |&kind| (kind, self.strength(kind)))
    }

    /// Apply an additive delta, re-clamping to [-1.0, 1.0]. Non-finite
    /// deltas are ignored rather than poisoning the profile.
    pub fn adjust(&mut self, kind: BiasKind, delta: f32) {
        let next = self.strengths[kind.index()] + delta;
        if next.is_finite() {
            self.strengths[kind.index()] = next.clamp(-1.0, 1.0);
        }
    }

    pub fn adjust_all(&mut self, deltas: &[(BiasKind, f32)]) {
        for &(kind, delta) in deltas {
            self.adjust(kind, delta);
        }
    }

    /// The trait with the largest absolute strength. Exact ties break toward
    /// declaration order (paranoia, hope, self_doubt, nostalgia).
    pub fn strongest(&self) -> BiasKind {
        let mut best = BiasKind::Paranoia;
        for kind in BiasKind::ALL {
            if self.strength(kind).abs() > self.strength(best).abs() {
                best = kind;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recognized_names() {
        assert_eq!(BiasKind::from_str("paranoia"), Ok(BiasKind::Paranoia));
        assert_eq!(BiasKind::from_str("self_doubt"), Ok(BiasKind::SelfDoubt));
        assert_eq!(BiasKind::from_str(" Hope "), Ok(BiasKind::Hope));
    }

    #[test]
    fn test_parse_rejects_unknown_names() {
        let err = BiasKind::from_str("optimism").unwrap_err();
        assert!(err.to_string().contains("optimism"));
    }

    #[test]
    fn test_default_profile_values() {
        let profile = BiasProfile::default();
        assert_eq!(profile.strength(BiasKind::Paranoia), 0.1);
        assert_eq!(profile.strength(BiasKind::Hope), 0.2);
        assert_eq!(profile.strength(BiasKind::SelfDoubt), 0.15);
        assert_eq!(profile.strength(BiasKind::Nostalgia), 0.1);
    }

    #[test]
    fn test_adjust_clamps_both_ends() {
        let mut profile = BiasProfile::default();
        profile.adjust(BiasKind::Paranoia, 100.0);
        assert_eq!(profile.strength(BiasKind::Paranoia), 1.0);
        profile.adjust(BiasKind::Paranoia, -100.0);
        assert_eq!(profile.strength(BiasKind::Paranoia), -1.0);
    }

    #[test]
    fn test_adjust_ignores_non_finite_delta() {
        let mut profile = BiasProfile::default();
        profile.adjust(BiasKind::Hope, f32::NAN);
        assert_eq!(profile.strength(BiasKind::Hope), 0.2);
        profile.adjust(BiasKind::Hope, f32::INFINITY);
        assert_eq!(profile.strength(BiasKind::Hope), 0.2);
    }

    #[test]
    fn test_strongest_uses_absolute_strength() {
        let mut profile = BiasProfile::default();
        assert_eq!(profile.strongest(), BiasKind::Hope);
        profile.adjust(BiasKind::Nostalgia, -1.0);
        assert_eq!(profile.strongest(), BiasKind::Nostalgia);
    }

    #[test]
    fn test_strongest_tie_breaks_by_declaration_order() {
        let mut profile = BiasProfile::default();
        // Flatten everything to the same magnitude.
        profile.adjust(BiasKind::Paranoia, 0.1);
        profile.adjust(BiasKind::SelfDoubt, 0.05);
        profile.adjust(BiasKind::Nostalgia, 0.1);
        assert_eq!(profile.strongest(), BiasKind::Paranoia);
    }
}

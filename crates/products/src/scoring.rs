//! Composite product scoring.
//!
//! Four sub-scores in `[0, 100]` are combined with fixed weights into a single
//! integer `total_score`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use winnerlens_core::{DomainError, DomainResult, ValueObject};

/// A single sub-score, guaranteed to lie in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Score(Decimal);

impl Score {
    pub fn new(value: Decimal) -> DomainResult<Self> {
        if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
            return Err(DomainError::validation(format!(
                "score must be between 0 and 100 (got {value})"
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Score {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Score> for Decimal {
    fn from(value: Score) -> Self {
        value.0
    }
}

impl ValueObject for Score {}

/// Fixed weights of the composite score. They sum to exactly 1.00.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreWeights {
    pub demand: Decimal,
    pub competition: Decimal,
    pub margin: Decimal,
    pub operability: Decimal,
}

impl ScoreWeights {
    pub fn standard() -> Self {
        Self {
            demand: Decimal::new(30, 2),
            competition: Decimal::new(25, 2),
            margin: Decimal::new(25, 2),
            operability: Decimal::new(20, 2),
        }
    }

    pub fn sum(&self) -> Decimal {
        self.demand + self.competition + self.margin + self.operability
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::standard()
    }
}

/// The four sub-scores of a product. Any of them may still be unscored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubScores {
    #[serde(default, rename = "demandScore")]
    pub demand: Option<Score>,
    #[serde(default, rename = "competitionScore")]
    pub competition: Option<Score>,
    #[serde(default, rename = "marginScore")]
    pub margin: Option<Score>,
    #[serde(default, rename = "operabilityScore")]
    pub operability: Option<Score>,
}

impl SubScores {
    /// Overlay `newer` on top of `self`: supplied scores replace stored ones.
    pub fn merged_with(self, newer: SubScores) -> SubScores {
        SubScores {
            demand: newer.demand.or(self.demand),
            competition: newer.competition.or(self.competition),
            margin: newer.margin.or(self.margin),
            operability: newer.operability.or(self.operability),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.demand.is_none()
            && self.competition.is_none()
            && self.margin.is_none()
            && self.operability.is_none()
    }

    pub fn total(&self) -> u8 {
        compute_total_score(self.demand, self.competition, self.margin, self.operability)
    }
}

/// Weighted composite score, rounded half-up to an integer.
///
/// An absent sub-score counts as a measured zero.
pub fn compute_total_score(
    demand: Option<Score>,
    competition: Option<Score>,
    margin: Option<Score>,
    operability: Option<Score>,
) -> u8 {
    weighted_total(&ScoreWeights::standard(), demand, competition, margin, operability)
}

fn weighted_total(
    weights: &ScoreWeights,
    demand: Option<Score>,
    competition: Option<Score>,
    margin: Option<Score>,
    operability: Option<Score>,
) -> u8 {
    let value = |s: Option<Score>| s.map(|s| s.value()).unwrap_or(Decimal::ZERO);

    let sum = value(demand) * weights.demand
        + value(competition) * weights.competition
        + value(margin) * weights.margin
        + value(operability) * weights.operability;

    // Scores are in [0, 100] and weights sum to 1, so the rounded sum fits in u8.
    sum.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u8()
        .unwrap_or(u8::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: i64) -> Option<Score> {
        Some(Score::new(Decimal::from(v)).unwrap())
    }

    #[test]
    fn standard_weights_sum_to_one() {
        assert_eq!(ScoreWeights::standard().sum(), Decimal::ONE);
    }

    #[test]
    fn weighted_sum_rounds_half_up() {
        // 24 + 15 + 17.5 + 10 = 66.5
        assert_eq!(compute_total_score(s(80), s(60), s(70), s(50)), 67);
    }

    #[test]
    fn all_absent_is_zero() {
        assert_eq!(compute_total_score(None, None, None, None), 0);
    }

    #[test]
    fn absent_scores_count_as_zero() {
        // Only demand is scored: 100 * 0.30 = 30.
        assert_eq!(compute_total_score(s(100), None, None, None), 30);
    }

    #[test]
    fn perfect_scores_total_one_hundred() {
        assert_eq!(compute_total_score(s(100), s(100), s(100), s(100)), 100);
    }

    #[test]
    fn fractional_scores_are_supported() {
        let half = Some(Score::new("50.5".parse().unwrap()).unwrap());
        // 50.5 * 1.00 = 50.5 -> 51
        assert_eq!(compute_total_score(half, half, half, half), 51);
    }

    #[test]
    fn score_rejects_out_of_range() {
        assert!(Score::new(Decimal::from(-1)).is_err());
        assert!(Score::new(Decimal::from(101)).is_err());
        assert!(Score::new(Decimal::ZERO).is_ok());
        assert!(Score::new(Decimal::ONE_HUNDRED).is_ok());
    }

    #[test]
    fn score_deserialization_validates_range() {
        let ok: Score = serde_json::from_str("42").unwrap();
        assert_eq!(ok.value(), Decimal::from(42));
        assert!(serde_json::from_str::<Score>("150").is_err());
    }

    #[test]
    fn merge_keeps_stored_scores_that_were_not_supplied() {
        let stored = SubScores {
            demand: s(80),
            competition: s(60),
            ..SubScores::default()
        };
        let update = SubScores {
            competition: s(90),
            operability: s(40),
            ..SubScores::default()
        };

        let merged = stored.merged_with(update);
        assert_eq!(merged.demand, s(80));
        assert_eq!(merged.competition, s(90));
        assert_eq!(merged.margin, None);
        assert_eq!(merged.operability, s(40));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn score() -> impl Strategy<Value = Option<Score>> {
            proptest::option::of((0i64..=10_000).prop_map(|v| Score::new(Decimal::new(v, 2)).unwrap()))
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: the composite score is always within [0, 100].
            #[test]
            fn total_is_bounded(d in score(), c in score(), m in score(), o in score()) {
                let total = compute_total_score(d, c, m, o);
                prop_assert!(total <= 100);
            }

            /// Property: raising any sub-score never lowers the total.
            #[test]
            fn total_is_monotonic(d in score(), c in score(), m in score(), o in score()) {
                let base = compute_total_score(d, c, m, o);
                let max = Score::new(Decimal::ONE_HUNDRED).ok();
                prop_assert!(compute_total_score(max, c, m, o) >= base);
                prop_assert!(compute_total_score(d, max, m, o) >= base);
                prop_assert!(compute_total_score(d, c, max, o) >= base);
                prop_assert!(compute_total_score(d, c, m, max) >= base);
            }
        }
    }
}

//! Margin calculation.
//!
//! Prices, costs and margins are `Decimal` so repeated updates never drift the
//! way binary floating point would.

use rust_decimal::{Decimal, RoundingStrategy};

use winnerlens_core::{DomainError, DomainResult};

/// Number of decimal places a margin percentage is stored with.
pub const MARGIN_SCALE: u32 = 2;

/// Round to two decimal places, half away from zero.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MARGIN_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Compute the margin percentage for a price/cost pair.
///
/// - `price <= 0` is a precondition violation (`InvalidArgument`), checked first.
/// - An `explicit` margin always wins and is returned unchanged.
/// - Without a cost there is nothing to derive, so the result is `None`.
/// - Otherwise `round2((price - cost) / price * 100)`.
pub fn compute_margin(
    price: Decimal,
    cost: Option<Decimal>,
    explicit: Option<Decimal>,
) -> DomainResult<Option<Decimal>> {
    if price <= Decimal::ZERO {
        return Err(DomainError::invalid_argument(format!(
            "price must be positive to compute a margin (got {price})"
        )));
    }

    if explicit.is_some() {
        return Ok(explicit);
    }

    let Some(cost) = cost else {
        return Ok(None);
    };

    let overflow = || DomainError::invalid_argument("margin computation overflowed");
    let ratio = price
        .checked_sub(cost)
        .and_then(|profit| profit.checked_div(price))
        .ok_or_else(overflow)?;
    let percent = ratio.checked_mul(Decimal::ONE_HUNDRED).ok_or_else(overflow)?;

    Ok(Some(round2(percent)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn margin_for_typical_listing() {
        let margin = compute_margin(d("20000"), Some(d("15000")), None).unwrap();
        assert_eq!(margin, Some(d("25.00")));
    }

    #[test]
    fn margin_is_rounded_to_two_places() {
        // (3 - 2) / 3 * 100 = 33.333...
        let margin = compute_margin(d("3"), Some(d("2")), None).unwrap();
        assert_eq!(margin, Some(d("33.33")));

        // (3 - 1) / 3 * 100 = 66.666...
        let margin = compute_margin(d("3"), Some(d("1")), None).unwrap();
        assert_eq!(margin, Some(d("66.67")));
    }

    #[test]
    fn round2_breaks_ties_away_from_zero() {
        assert_eq!(round2(d("12.345")), d("12.35"));
        assert_eq!(round2(d("-12.345")), d("-12.35"));
        assert_eq!(round2(d("12.344")), d("12.34"));
    }

    #[test]
    fn explicit_margin_is_preserved() {
        let margin = compute_margin(d("20000"), Some(d("15000")), Some(d("40"))).unwrap();
        assert_eq!(margin, Some(d("40")));
    }

    #[test]
    fn missing_cost_yields_no_margin() {
        assert_eq!(compute_margin(d("100"), None, None).unwrap(), None);
    }

    #[test]
    fn zero_price_is_invalid_argument() {
        let err = compute_margin(d("0"), Some(d("10")), None).unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }

    #[test]
    fn negative_price_is_invalid_argument() {
        let err = compute_margin(d("-5"), Some(d("1")), None).unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }

    #[test]
    fn non_positive_price_fails_even_with_explicit_margin() {
        let err = compute_margin(Decimal::ZERO, None, Some(d("10"))).unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: margin matches the closed-form formula and stays in (0, 100).
            #[test]
            fn margin_matches_formula(
                price_minor in 2i64..10_000_000,
                cost_ratio in 1u32..1000,
            ) {
                let price = Decimal::new(price_minor, 2);
                let cost_minor = (price_minor * cost_ratio as i64 / 1000).max(1);
                prop_assume!(cost_minor < price_minor);
                let cost = Decimal::new(cost_minor, 2);

                let margin = compute_margin(price, Some(cost), None).unwrap().unwrap();
                let expected = round2((price - cost) / price * Decimal::ONE_HUNDRED);

                prop_assert_eq!(margin, expected);
                prop_assert!(margin >= Decimal::ZERO);
                prop_assert!(margin <= Decimal::ONE_HUNDRED);
                prop_assert!(margin.scale() <= MARGIN_SCALE);
            }

            /// Property: an explicit margin is never overwritten.
            #[test]
            fn explicit_margin_wins(
                price_minor in 1i64..10_000_000,
                cost_minor in 1i64..10_000_000,
                explicit in 0i64..=10_000,
            ) {
                let explicit = Decimal::new(explicit, 2);
                let margin = compute_margin(
                    Decimal::new(price_minor, 2),
                    Some(Decimal::new(cost_minor, 2)),
                    Some(explicit),
                ).unwrap();
                prop_assert_eq!(margin, Some(explicit));
            }
        }
    }
}

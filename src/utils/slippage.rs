use crate::consts::BPS_DENOMINATOR;
use crate::models::{QuoteError, SwapQuoteRequest, SwapQuoteResult};

/// Lowest output still acceptable under `max_slippage_bps`.
///
/// `quoted * (10000 - bps) / 10000`, truncated. The quotient is split so the
/// product never overflows `u128`.
pub fn compute_min_amount_out(quoted_amount_out: u128, max_slippage_bps: u16) -> Result<u128, QuoteError> {
    if max_slippage_bps > BPS_DENOMINATOR {
        return Err(QuoteError::InvalidParameters(format!(
            "max slippage must be at most {} bps, got {}",
            BPS_DENOMINATOR, max_slippage_bps
        )));
    }
    let denominator = u128::from(BPS_DENOMINATOR);
    let kept = u128::from(BPS_DENOMINATOR - max_slippage_bps);

    let whole = quoted_amount_out / denominator;
    let rest = quoted_amount_out % denominator;
    Ok(whole * kept + rest * kept / denominator)
}

/// Deviation of `amount_out` from the pre-trade linear price, in percent.
pub fn compute_price_impact(
    amount_in: u128,
    amount_out: u128,
    reserve_in: u128,
    reserve_out: u128,
) -> Result<f64, QuoteError> {
    if reserve_in == 0 {
        return Err(QuoteError::DivisionByZero("input reserve is empty".to_string()));
    }
    let expected_out = amount_in as f64 * reserve_out as f64 / reserve_in as f64;
    if expected_out == 0.0 {
        return Err(QuoteError::DivisionByZero("expected output is zero".to_string()));
    }

    Ok((expected_out - amount_out as f64).abs() / expected_out * 100.0)
}

pub fn quote(request: &SwapQuoteRequest, amount_out: u128) -> Result<SwapQuoteResult, QuoteError> {
    let min_amount_out = compute_min_amount_out(amount_out, request.max_slippage_bps)?;
    let price_impact_pct = compute_price_impact(
        request.amount_in,
        amount_out,
        request.reserve_in,
        request.reserve_out,
    )?;

    Ok(SwapQuoteResult {
        amount_out,
        min_amount_out,
        price_impact_pct,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_min_amount_out() {
        assert_eq!(compute_min_amount_out(1000, 0).unwrap(), 1000);
        assert_eq!(compute_min_amount_out(1000, 10_000).unwrap(), 0);
        assert_eq!(compute_min_amount_out(1000, 100).unwrap(), 990);
        // 999 * 0.995 = 994.005
        assert_eq!(compute_min_amount_out(999, 50).unwrap(), 994);
        assert_eq!(compute_min_amount_out(0, 300).unwrap(), 0);
    }

    #[test]
    fn test_min_amount_out_rejects_bps_above_denominator() {
        assert!(matches!(
            compute_min_amount_out(1000, 10_001),
            Err(QuoteError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_min_amount_out_does_not_overflow() {
        assert_eq!(compute_min_amount_out(u128::MAX, 0).unwrap(), u128::MAX);
        let min = compute_min_amount_out(u128::MAX, 1).unwrap();
        assert!(min < u128::MAX);
        assert_eq!(min, u128::MAX / 10_000 * 9_999 + (u128::MAX % 10_000) * 9_999 / 10_000);
    }

    #[test]
    fn test_price_impact() {
        // linear expectation: 100 * 1000 / 1000 = 100, got 90
        let impact = compute_price_impact(100, 90, 1_000, 1_000).unwrap();
        assert!((impact - 10.0).abs() < 1e-9);

        let exact = compute_price_impact(100, 100, 1_000, 1_000).unwrap();
        assert_eq!(exact, 0.0);
    }

    #[test]
    fn test_price_impact_undefined() {
        assert!(matches!(
            compute_price_impact(100, 90, 0, 1_000),
            Err(QuoteError::DivisionByZero(_))
        ));
        assert!(matches!(
            compute_price_impact(0, 0, 1_000, 1_000),
            Err(QuoteError::DivisionByZero(_))
        ));
        assert!(matches!(
            compute_price_impact(100, 0, 1_000, 0),
            Err(QuoteError::DivisionByZero(_))
        ));
    }

    #[test]
    fn test_quote_combines_both() {
        let request = SwapQuoteRequest {
            amount_in: 1_000,
            reserve_in: 25_000_000,
            reserve_out: 1_000_000,
            max_slippage_bps: 100,
        };
        let result = quote(&request, 39).unwrap();
        assert_eq!(result.amount_out, 39);
        assert_eq!(result.min_amount_out, 38);
        // expected 40, got 39
        assert!((result.price_impact_pct - 2.5).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_min_never_exceeds_quote(quoted in any::<u128>(), bps in 0u16..=10_000) {
            let min = compute_min_amount_out(quoted, bps).unwrap();
            prop_assert!(min <= quoted);
        }

        #[test]
        fn prop_min_matches_naive_formula(quoted in 0u128..=u64::MAX as u128, bps in 0u16..=10_000) {
            let naive = quoted * u128::from(10_000 - bps) / 10_000;
            prop_assert_eq!(compute_min_amount_out(quoted, bps).unwrap(), naive);
        }

        #[test]
        fn prop_price_impact_non_negative(
            amount_in in 1u128..=u64::MAX as u128,
            amount_out in any::<u64>(),
            reserve_in in 1u128..=u64::MAX as u128,
            reserve_out in 1u128..=u64::MAX as u128,
        ) {
            let impact = compute_price_impact(amount_in, u128::from(amount_out), reserve_in, reserve_out).unwrap();
            prop_assert!(impact >= 0.0);
        }
    }
}

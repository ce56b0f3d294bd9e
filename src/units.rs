use {
    crate::error::{Error, Result},
    alloy_primitives::U256,
};

/// Token amounts default to 18 decimals when neither the contract nor the
/// config says otherwise.
pub const DEFAULT_DECIMALS: u8 = 18;

// U256 can hold up to 10^77, so 10^decimals overflows beyond this.
const MAX_DECIMALS: u8 = 77;

fn scale(decimals: u8) -> Result<U256> {
    if decimals > MAX_DECIMALS {
        return Err(Error::InvalidAmount(format!(
            "unsupported decimals: {decimals}"
        )));
    }
    Ok(U256::from(10u8).pow(U256::from(decimals)))
}

/// Render a raw on-chain integer amount as a decimal string.
///
/// Trailing fractional zeros are trimmed, but whole numbers keep a single
/// zero after the point: `1500000` at 6 decimals is `"1.5"`, `2 * 10^18` at
/// 18 decimals is `"2.0"`.
pub fn format_units(amount: U256, decimals: u8) -> Result<String> {
    if decimals == 0 {
        return Ok(format!("{amount}.0"));
    }
    let scale = scale(decimals)?;
    let whole = amount / scale;
    let frac = amount % scale;
    if frac.is_zero() {
        return Ok(format!("{whole}.0"));
    }
    let frac = frac.to_string();
    let frac = format!("{frac:0>width$}", width = decimals as usize);
    Ok(format!("{whole}.{}", frac.trim_end_matches('0')))
}

/// Parse a human decimal amount ("10.5") into its raw on-chain integer.
///
/// Rejects malformed input, more fractional digits than the token carries,
/// and amounts that are not strictly positive.
pub fn parse_units(amount: &str, decimals: u8) -> Result<U256> {
    let amount = amount.trim();
    let invalid = || Error::InvalidAmount(amount.to_string());

    let (whole, frac) = match amount.split_once('.') {
        Some((w, f)) => (w, f),
        None => (amount, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(invalid());
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    if frac.len() > decimals as usize {
        return Err(Error::InvalidAmount(format!(
            "{amount} has more than {decimals} decimal places"
        )));
    }

    let scale = scale(decimals)?;
    let whole: U256 = if whole.is_empty() {
        U256::ZERO
    } else {
        whole.parse().map_err(|_| invalid())?
    };
    let frac_scale = U256::from(10u8).pow(U256::from(decimals as usize - frac.len()));
    let frac: U256 = if frac.is_empty() {
        U256::ZERO
    } else {
        frac.parse::<U256>().map_err(|_| invalid())? * frac_scale
    };

    let raw = whole
        .checked_mul(scale)
        .and_then(|w| w.checked_add(frac))
        .ok_or_else(invalid)?;
    if raw.is_zero() {
        return Err(Error::InvalidAmount(format!("{amount} is not positive")));
    }
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use {super::*, rstest::rstest};

    #[rstest]
    #[case(1_500_000u64, 6, "1.5")]
    #[case(2_000_000_000_000_000_000u64, 18, "2.0")]
    #[case(1_000_000u64, 6, "1.0")]
    #[case(1u64, 6, "0.000001")]
    #[case(0u64, 18, "0.0")]
    #[case(1_234_567u64, 6, "1.234567")]
    #[case(42u64, 0, "42.0")]
    fn format_cases(#[case] raw: u64, #[case] decimals: u8, #[case] expected: &str) {
        assert_eq!(format_units(U256::from(raw), decimals).unwrap(), expected);
    }

    #[test]
    fn format_rejects_absurd_decimals() {
        assert!(format_units(U256::from(1u64), 200).is_err());
    }

    #[rstest]
    #[case("1.5", 6, 1_500_000u64)]
    #[case("10.5", 18, 10_500_000_000_000_000_000u64)]
    #[case("2", 6, 2_000_000u64)]
    #[case(".5", 6, 500_000u64)]
    #[case("7.", 6, 7_000_000u64)]
    fn parse_cases(#[case] input: &str, #[case] decimals: u8, #[case] expected: u64) {
        assert_eq!(parse_units(input, decimals).unwrap(), U256::from(expected));
    }

    #[rstest]
    #[case("")]
    #[case(".")]
    #[case("-1")]
    #[case("1.2.3")]
    #[case("abc")]
    #[case("0")]
    #[case("0.0")]
    #[case("1.1234567")] // more digits than the token's 6 decimals
    fn parse_rejects(#[case] input: &str) {
        assert!(
            matches!(parse_units(input, 6), Err(Error::InvalidAmount(_))),
            "expected rejection for {input:?}"
        );
    }

    #[test]
    fn format_parse_agree() {
        let raw = parse_units("123.456", 9).unwrap();
        assert_eq!(format_units(raw, 9).unwrap(), "123.456");
    }
}

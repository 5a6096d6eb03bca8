use crate::consts::SATS_PER_BTC;

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

pub fn format_sats(sats: u128) -> String {
    let unit = if sats == 1 { "sat" } else { "sats" };
    format!("{} {}", group_thousands(&sats.to_string()), unit)
}

/// Always 8 decimal places, e.g. "0.00001234 BTC".
pub fn format_btc(sats: u128) -> String {
    format!(
        "{}.{:08} BTC",
        group_thousands(&(sats / SATS_PER_BTC).to_string()),
        sats % SATS_PER_BTC
    )
}

/// Renders base units with `decimals` places, trailing zeros trimmed.
pub fn format_token_amount(amount: u128, decimals: u8) -> String {
    if decimals == 0 {
        return group_thousands(&amount.to_string());
    }
    let scale = match 10u128.checked_pow(u32::from(decimals)) {
        Some(scale) => scale,
        None => return group_thousands(&amount.to_string()),
    };
    let whole = group_thousands(&(amount / scale).to_string());
    let fraction = format!("{:0width$}", amount % scale, width = usize::from(decimals));
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        whole
    } else {
        format!("{}.{}", whole, fraction)
    }
}

pub fn format_percent(pct: f64) -> String {
    format!("{:.2}%", pct)
}

/// Sats-per-token price; small prices keep significant digits.
pub fn format_price_sats(price: f64) -> String {
    if price >= 1.0 {
        format!("{:.2} sats", price)
    } else {
        format!("{:.6} sats", price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }

    #[test]
    fn test_format_sats_and_btc() {
        assert_eq!(format_sats(1), "1 sat");
        assert_eq!(format_sats(100_000_000), "100,000,000 sats");
        assert_eq!(format_btc(1_234), "0.00001234 BTC");
        assert_eq!(format_btc(100_000_000), "1.00000000 BTC");
        assert_eq!(format_btc(2_100_000_000_000_000), "21,000,000.00000000 BTC");
    }

    #[test]
    fn test_format_token_amount() {
        assert_eq!(format_token_amount(1_000_000, 0), "1,000,000");
        assert_eq!(format_token_amount(1_000_500, 3), "1,000.5");
        assert_eq!(format_token_amount(1_000_000, 6), "1");
        assert_eq!(format_token_amount(5, 8), "0.00000005");
        assert_eq!(format_token_amount(u128::MAX, 40), group_thousands(&u128::MAX.to_string()));
    }

    #[test]
    fn test_format_percent_and_price() {
        assert_eq!(format_percent(2.5), "2.50%");
        assert_eq!(format_percent(0.0), "0.00%");
        assert_eq!(format_price_sats(625.0), "625.00 sats");
        assert_eq!(format_price_sats(0.025), "0.025000 sats");
    }
}

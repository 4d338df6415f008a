//! Compact price labels

/// Formats a coin amount with a `k`/`m`/`b` suffix
///
/// Amounts of a thousand or more are scaled and shown with two decimals;
/// smaller amounts are printed as-is.
///
/// # Example
///
/// ```
/// use auction_scout::format_price;
///
/// assert_eq!(format_price(500_000.0), "500.00k");
/// assert_eq!(format_price(1_666_000.0), "1.67m");
/// assert_eq!(format_price(999.0), "999");
/// ```
pub fn format_price(price: f64) -> String {
    if price >= 1_000_000_000.0 {
        format!("{}b", two_decimals(price / 1_000_000_000.0))
    } else if price >= 1_000_000.0 {
        format!("{}m", two_decimals(price / 1_000_000.0))
    } else if price >= 1_000.0 {
        format!("{}k", two_decimals(price / 1_000.0))
    } else {
        price.to_string()
    }
}

/// Rounds to two decimals, sending exact halfway values up
///
/// `{:.2}` rounds exact ties to even. The only values exactly halfway
/// between two hundredths are odd multiples of 1/8, and `value * 8.0` is
/// exact, so those are detected and nudged up before formatting.
fn two_decimals(value: f64) -> String {
    let eighths = value * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 == 1.0 {
        format!("{:.2}", value + 0.001)
    } else {
        format!("{:.2}", value)
    }
}

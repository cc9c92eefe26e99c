use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds half away from zero to two places, the way amounts are printed.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `1700` -> `"1,700.00"`
pub fn format_amount(value: Decimal) -> String {
    let fixed = format!("{:.2}", round_money(value));
    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));
    format!("{}{}.{}", sign, group_thousands(int_part), frac_part)
}

/// Shortest plain rendering: `6300.00` -> `"6300"`, `12.50` -> `"12.5"`.
pub fn format_amount_plain(value: Decimal) -> String {
    round_money(value).normalize().to_string()
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

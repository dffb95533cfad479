/// Format a whole-Rupiah amount the way the storefront renders it:
/// "Rp" prefix, dot thousands grouping, no decimal digits.
pub fn format_rupiah(amount: i64) -> String {
    let negative = amount < 0;
    let digits = amount.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    if negative {
        format!("-Rp {}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}

/// Parse a displayed Rupiah string back to a number by keeping only the
/// digits. Empty or symbol-only input parses to 0.
pub fn parse_rupiah(input: &str) -> i64 {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

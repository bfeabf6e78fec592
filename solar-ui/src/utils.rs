use rust_decimal::Decimal;
use tracing::warn;

/// Normalizes user-entered amounts: trims whitespace and strips the `$`
/// currency sign and comma thousands separators.
fn normalize_amount(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',' && *c != ' ')
        .collect()
}

/// Parses a dollar amount or plain number from form input.
///
/// Empty input is zero. Invalid input also degrades to zero (logged at
/// warn level) so a stray keystroke never takes the worksheet down.
pub fn parse_money(s: &str) -> Decimal {
    let normalized = normalize_amount(s);
    if normalized.is_empty() {
        return Decimal::ZERO;
    }
    normalized.parse().unwrap_or_else(|e| {
        warn!(input = %s, "invalid amount treated as zero: {e}");
        Decimal::ZERO
    })
}

/// Parses an optional amount: `None` for empty or invalid input.
///
/// Used by the optional extra cost rows, where an unfilled field must
/// contribute nothing rather than zero-but-filled.
pub fn parse_optional_money(s: &str) -> Option<Decimal> {
    let normalized = normalize_amount(s);
    if normalized.is_empty() {
        return None;
    }
    match normalized.parse() {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(input = %s, "invalid optional amount ignored: {e}");
            None
        }
    }
}

/// Parses a whole-number count (e.g. additional panels). Empty or invalid
/// input degrades to zero.
pub fn parse_count(s: &str) -> u32 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0;
    }
    trimmed.parse().unwrap_or_else(|e| {
        warn!(input = %s, "invalid count treated as zero: {e}");
        0
    })
}

/// Form-field text for a stored amount: zero renders as an empty field,
/// matching how the worksheets treat blank input.
pub fn blank_if_zero(value: Decimal) -> String {
    if value == Decimal::ZERO {
        String::new()
    } else {
        value.to_string()
    }
}

/// Truncates a label to `max` characters with a trailing ellipsis, for
/// the fixed-width worksheet rows.
pub fn truncate_label(
    text: &str,
    max: usize,
) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max - 1).collect();
        format!("{cut}…")
    }
}

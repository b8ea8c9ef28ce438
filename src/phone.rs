//! Saudi mobile number normalization.
//!
//! The canonical form doubles as the key the verification code is
//! correlated with, so normalization is deterministic and total: a number
//! either reduces to `+9665` + 8 digits or it is rejected outright.

/// Normalize a Saudi mobile number to its canonical `+9665XXXXXXXX` form.
///
/// Accepted shapes (after stripping whitespace and `- ( ) .`):
/// `05XXXXXXXX`, `5XXXXXXXX`, `+9665XXXXXXXX`, `9665XXXXXXXX`.
/// Grammar: optional `+` (only together with the country code), optional
/// `966`, optional `0`, mandatory `5`, exactly 8 digits.
pub fn normalize_phone(raw: &str) -> Result<String, String> {
    let v: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')' | '.'))
        .collect();

    if v.is_empty() {
        return Err("phone number is empty".into());
    }

    let rest = if let Some(r) = v.strip_prefix("+966") {
        r
    } else if let Some(r) = v.strip_prefix("966") {
        r
    } else if v.starts_with('+') {
        // A plus is only valid in front of the country code.
        return Err(format!("not a Saudi mobile number: {}", raw.trim()));
    } else {
        &v
    };

    let rest = rest.strip_prefix('0').unwrap_or(rest);
    let digits = rest
        .strip_prefix('5')
        .ok_or_else(|| format!("not a Saudi mobile number: {}", raw.trim()))?;

    if digits.len() == 8 && digits.chars().all(|c| c.is_ascii_digit()) {
        Ok(format!("+9665{}", digits))
    } else {
        Err(format!("not a Saudi mobile number: {}", raw.trim()))
    }
}

/// Display form for the verification screen: `+966 5X XXXX XXX`.
///
/// Anything that is not a canonical number is returned unchanged.
pub fn mask_phone(phone_e164: &str) -> String {
    let Some(rest) = phone_e164.strip_prefix("+9665") else {
        return phone_e164.to_string();
    };
    if rest.len() != 8 || !rest.chars().all(|c| c.is_ascii_digit()) {
        return phone_e164.to_string();
    }
    format!(
        "+966 5{} {}{} {}",
        &rest[..1],
        &rest[1..3],
        &rest[3..5],
        &rest[5..8]
    )
}

//! XSD canonical lexical forms for numeric literals.
//!
//! Applied when the `canonicalize` parser option is set. All rewriting is
//! done by string manipulation so arbitrary-precision lexical forms survive
//! without rounding.

/// Canonical xsd:integer form: no `+`, no leading zeros, `-0` becomes `0`.
pub(crate) fn integer(lexeme: &str) -> String {
    let (negative, digits) = split_sign(lexeme);
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return "0".to_string();
    }
    if negative {
        format!("-{digits}")
    } else {
        digits.to_string()
    }
}

/// Canonical xsd:decimal form: no `+`, no redundant zeros, at least one
/// digit on each side of the point.
pub(crate) fn decimal(lexeme: &str) -> String {
    let (negative, rest) = split_sign(lexeme);
    let (int_part, frac_part) = match rest.find('.') {
        Some(i) => (&rest[..i], &rest[i + 1..]),
        None => (rest, ""),
    };

    let int_part = int_part.trim_start_matches('0');
    let int_part = if int_part.is_empty() { "0" } else { int_part };
    let frac_part = frac_part.trim_end_matches('0');
    let frac_part = if frac_part.is_empty() { "0" } else { frac_part };

    if negative && !(int_part == "0" && frac_part == "0") {
        format!("-{int_part}.{frac_part}")
    } else {
        format!("{int_part}.{frac_part}")
    }
}

/// Canonical xsd:double form: a single non-zero leading digit, at least one
/// fractional digit, and an explicit exponent (`1.23E2`).
pub(crate) fn double(lexeme: &str) -> String {
    let (negative, rest) = split_sign(lexeme);

    let (mantissa, exponent) = match rest.find(['e', 'E']) {
        Some(i) => (&rest[..i], &rest[i + 1..]),
        None => (rest, "0"),
    };
    let Ok(exponent) = exponent.parse::<i64>() else {
        // exponent beyond i64 digits; keep the author's form
        return lexeme.to_string();
    };

    let (int_part, frac_part) = match mantissa.find('.') {
        Some(i) => (&mantissa[..i], &mantissa[i + 1..]),
        None => (mantissa, ""),
    };
    let digits = format!("{int_part}{frac_part}");

    match digits.find(|c| c != '0') {
        // zero mantissa: canonical zero, sign dropped
        None => "0.0E0".to_string(),
        Some(first) => {
            // the point moves to sit after the first significant digit
            let adjusted = exponent + int_part.len() as i64 - first as i64 - 1;
            let significand = digits[first..].trim_end_matches('0');
            let lead = &significand[..1];
            let tail = if significand.len() > 1 {
                &significand[1..]
            } else {
                "0"
            };
            let sign = if negative { "-" } else { "" };
            format!("{sign}{lead}.{tail}E{adjusted}")
        }
    }
}

fn split_sign(lexeme: &str) -> (bool, &str) {
    match lexeme.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, lexeme.strip_prefix('+').unwrap_or(lexeme)),
    }
}

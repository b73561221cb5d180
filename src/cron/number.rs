// Numeric coercion with the semantics of a JavaScript unary `+`.
//
// Field parameters are kept as strings; coercion only decides whether a
// string "looks numeric" and what its canonical decimal form is.

/// Coerce `raw` to a number. Returns `None` where `+raw` would be `NaN`.
pub fn coerce(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return Some(0.0);
    }
    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
                return None;
            }
            return u128::from_str_radix(digits, radix).ok().map(|n| n as f64);
        }
    }
    // `f64::from_str` also accepts "inf"/"nan"; restrict to decimal literals.
    let decimal = s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !decimal || !s.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse::<f64>().ok()
}

/// Render a number the way `String(n)` does for the values fields carry.
pub fn to_canonical(n: f64) -> String {
    if n.is_nan() {
        return "NaN".into();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity".into() } else { "-Infinity".into() };
    }
    if n == 0.0 {
        return "0".into();
    }
    let abs = n.abs();
    if (1e-6..1e21).contains(&abs) {
        return format!("{n}");
    }
    let s = format!("{n:e}");
    match s.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => s,
    }
}

/// `String(+raw)` when `+raw` is a number, otherwise `None`.
pub fn normalize(raw: &str) -> Option<String> {
    coerce(raw).map(to_canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_follows_unary_plus() {
        assert_eq!(coerce("15"), Some(15.0));
        assert_eq!(coerce(" 07 "), Some(7.0));
        assert_eq!(coerce(""), Some(0.0));
        assert_eq!(coerce("0x1F"), Some(31.0));
        assert_eq!(coerce("1e2"), Some(100.0));
        assert_eq!(coerce("-3"), Some(-3.0));
        assert_eq!(coerce("abc"), None);
        assert_eq!(coerce("MON"), None);
        assert_eq!(coerce("inf"), None);
        assert_eq!(coerce("NaN"), None);
        assert_eq!(coerce("1e"), None);
        assert_eq!(coerce("0x"), None);
    }

    #[test]
    fn canonical_strings_drop_padding_and_fractions_of_zero() {
        assert_eq!(to_canonical(7.0), "7");
        assert_eq!(to_canonical(-0.0), "0");
        assert_eq!(to_canonical(1.5), "1.5");
        assert_eq!(to_canonical(1e21), "1e+21");
        assert_eq!(normalize("007").as_deref(), Some("7"));
        assert_eq!(normalize("SUN"), None);
    }
}

//! Human-readable number rendering for badges and CLI output.
//!
//! Values scale into `[1, 1000)` with a lowercase SI prefix (`1234` ->
//! `1.2k`), excess decimals truncated rather than rounded and trailing
//! zeros trimmed. Stats files keep exact integers; this is presentation
//! only.

/// Render `value` with an SI prefix and at most `decimals` fractional
/// digits: `0` -> "0", `12000` -> "12k", `1234` -> "1.2k", `-1234` ->
/// "-1.2k".
pub fn si_number(value: i64, decimals: usize) -> String {
    let (scaled, prefix) = compute_si(value as f64);
    format!("{}{}", ftoa_with_digits(scaled, decimals), prefix)
}

/// Scale `input` into `[1, 1000)` (sign preserved) and pick the matching SI
/// prefix.
fn compute_si(input: f64) -> (f64, &'static str) {
    if input == 0.0 {
        return (0.0, "");
    }
    let mag = input.abs();
    let mut exponent = (mag.log10().floor() / 3.0).floor() * 3.0;
    let mut value = mag / 10f64.powf(exponent);

    // log10 of an exact power of ten can land a hair below the integer,
    // leaving value at 1000.0; carry into the next prefix so this never
    // prints "1000k".
    if value == 1000.0 {
        exponent += 3.0;
        value = mag / 10f64.powf(exponent);
    }

    (value.copysign(input), si_prefix(exponent as i32))
}

fn si_prefix(exponent: i32) -> &'static str {
    match exponent {
        3 => "k",
        6 => "M",
        9 => "G",
        12 => "T",
        15 => "P",
        18 => "E",
        _ => "",
    }
}

/// Fixed-point rendering with at most `digits` decimals, truncating rather
/// than rounding, and no trailing zeros.
fn ftoa_with_digits(num: f64, digits: usize) -> String {
    let formatted = format!("{num:.6}");
    strip_trailing_zeros(strip_trailing_digits(&formatted, digits)).to_string()
}

fn strip_trailing_digits(s: &str, digits: usize) -> &str {
    if let Some(dot) = s.find('.') {
        if digits == 0 {
            return &s[..dot];
        }
        let end = dot + 1 + digits;
        if end < s.len() {
            return &s[..end];
        }
    }
    s
}

fn strip_trailing_zeros(s: &str) -> &str {
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.')
}

/// Fixed-point with `,` between thousands, e.g. `1234567.891` at 2 → `1,234,567.89`.
pub fn group_thousands(value: f64, decimals: usize) -> String {
    let plain = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (plain.as_str(), None),
    };

    let digits = int_part.as_bytes();
    let mut out = String::with_capacity(plain.len() + digits.len() / 3 + 1);
    // "-0" is not worth printing
    if value.is_sign_negative() && plain.bytes().any(|b| b != b'0' && b != b'.') {
        out.push('-');
    }
    for (i, &b) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(b as char);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups() {
        assert_eq!(group_thousands(0.0, 0), "0");
        assert_eq!(group_thousands(999.0, 0), "999");
        assert_eq!(group_thousands(1000.0, 0), "1,000");
        assert_eq!(group_thousands(1234567.891, 2), "1,234,567.89");
        assert_eq!(group_thousands(12742.0, 0), "12,742");
        assert_eq!(group_thousands(-45678.5, 1), "-45,678.5");
        assert_eq!(group_thousands(0.00001, 4), "0.0000");
        assert_eq!(group_thousands(-0.00001, 2), "0.00");
    }

    #[test]
    fn huge_values_stay_positional() {
        assert_eq!(
            group_thousands(2f64.powi(80), 0),
            "1,208,925,819,614,629,174,706,176"
        );
    }
}

/// Format a unit count with thousands separators: 12,345
pub fn units(val: i64) -> String {
    let digits = val.unsigned_abs().to_string();

    let mut with_commas = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if val < 0 {
        format!("-{with_commas}")
    } else {
        with_commas
    }
}

pub fn pct(val: f64) -> String {
    format!("{val:.1}%")
}

/// Fixed-width text bar for a share of 0–100.
pub fn bar(share: f64, width: usize) -> String {
    let filled = ((share.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    "\u{2588}".repeat(filled.min(width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_formatting() {
        assert_eq!(units(0), "0");
        assert_eq!(units(999), "999");
        assert_eq!(units(1234), "1,234");
        assert_eq!(units(1000000), "1,000,000");
        assert_eq!(units(-2), "-2");
        assert_eq!(units(-12345), "-12,345");
    }

    #[test]
    fn test_pct_formatting() {
        assert_eq!(pct(80.0), "80.0%");
        assert_eq!(pct(33.333), "33.3%");
    }

    #[test]
    fn test_bar() {
        assert_eq!(bar(50.0, 10).chars().count(), 5);
        assert_eq!(bar(150.0, 10).chars().count(), 10);
        assert!(bar(-5.0, 10).is_empty());
    }
}

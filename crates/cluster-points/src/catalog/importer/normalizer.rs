pub(crate) fn normalize_cell(value: &str) -> String {
    value.replace('\u{a0}', " ").trim().to_string()
}

pub(crate) fn is_placeholder(value: &str) -> bool {
    value == "-" || value.eq_ignore_ascii_case("none")
}

/// Cut-off cell to points. Thousands separators are stripped; blanks, dashes and junk read as 0.
pub(crate) fn parse_cutoff(value: &str) -> f64 {
    let cleaned = normalize_cell(value).replace(',', "");
    if cleaned.is_empty() || cleaned == "-" {
        return 0.0;
    }
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|cutoff| cutoff.is_finite())
        .unwrap_or(0.0)
}

/// A cluster cell opens a new course only when it holds a positive whole number.
pub(crate) fn parse_cluster(value: &str) -> Option<u32> {
    let parsed = value.parse::<f64>().ok()?;
    if parsed.is_finite() && parsed.fract() == 0.0 && parsed > 0.0 && parsed <= u32::MAX as f64 {
        Some(parsed as u32)
    } else {
        None
    }
}

#[cfg(test)]
pub(crate) fn normalize_for_tests(value: &str) -> String {
    normalize_cell(value)
}

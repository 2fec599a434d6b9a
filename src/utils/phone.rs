use regex::Regex;

/// Carrier/area codes recognized for Somaliland (63-70) and Somalia
/// (61, 62, 90-99) subscribers. Numbers outside these ranges are rejected
/// even when the length would otherwise fit.
const CARRIER_CODE_PATTERN: &str = r"(6[1-9]|70|9[0-9])";

fn clean_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '+')
        .collect()
}

/// Validate a Somaliland/Somalia phone number.
///
/// Accepted forms after stripping whitespace, hyphens and `+`:
/// `252` + carrier code + 6 digits, `0` + carrier code + 6 digits, or the
/// bare carrier code + 6 digits.
pub fn validate_somali_phone(phone: &str) -> bool {
    let cleaned = clean_phone(phone);
    let pattern = format!(r"^(252|0)?{CARRIER_CODE_PATTERN}\d{{6}}$");
    Regex::new(&pattern).unwrap().is_match(&cleaned)
}

/// Normalize a phone number to the canonical `+252` form.
pub fn normalize_somali_phone(phone: &str) -> String {
    let cleaned = clean_phone(phone);

    if cleaned.starts_with("252") {
        format!("+{cleaned}")
    } else if let Some(rest) = cleaned.strip_prefix('0') {
        format!("+252{rest}")
    } else {
        format!("+252{cleaned}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_somali_phone_accepted_forms() {
        // leading zero national form
        assert!(validate_somali_phone("0631234567"));
        // country-code form
        assert!(validate_somali_phone("252631234567"));
        // bare carrier form
        assert!(validate_somali_phone("631234567"));
        // formatting characters are stripped before matching
        assert!(validate_somali_phone("+252 63 123 45 67"));
        assert!(validate_somali_phone("063-123-4567"));
        assert!(validate_somali_phone("63 1111111"));
    }

    #[test]
    fn test_validate_somali_phone_all_carrier_codes() {
        let codes = [
            "61", "62", "63", "64", "65", "66", "67", "68", "69", "70", "90", "91", "92", "93",
            "94", "95", "96", "97", "98", "99",
        ];
        for code in codes {
            assert!(validate_somali_phone(&format!("0{code}123456")), "0{code}");
            assert!(
                validate_somali_phone(&format!("252{code}123456")),
                "252{code}"
            );
            assert!(validate_somali_phone(&format!("{code}123456")), "{code}");
        }
    }

    #[test]
    fn test_validate_somali_phone_rejected() {
        // too short
        assert!(!validate_somali_phone("12345"));
        // unrecognized carrier codes
        assert!(!validate_somali_phone("0601234567"));
        assert!(!validate_somali_phone("0711234567"));
        assert!(!validate_somali_phone("0891234567"));
        // wrong subscriber length
        assert!(!validate_somali_phone("06312345"));
        assert!(!validate_somali_phone("06312345678"));
        // wrong country code
        assert!(!validate_somali_phone("+254631234567"));
        // non-digits left after stripping
        assert!(!validate_somali_phone("063123456a"));
        assert!(!validate_somali_phone(""));
    }

    #[test]
    fn test_normalize_somali_phone() {
        assert_eq!(normalize_somali_phone("0631234567"), "+252631234567");
        assert_eq!(normalize_somali_phone("252631234567"), "+252631234567");
        assert_eq!(normalize_somali_phone("631234567"), "+252631234567");
        assert_eq!(normalize_somali_phone("+252 63 123 45 67"), "+252631234567");
        assert_eq!(normalize_somali_phone("063-123-4567"), "+252631234567");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["0631234567", "252901234567", "64 1111111"] {
            let once = normalize_somali_phone(raw);
            assert_eq!(normalize_somali_phone(&once), once);
        }
    }
}

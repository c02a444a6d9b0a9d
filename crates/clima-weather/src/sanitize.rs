//! City-name sanitization: the only gate between untrusted search input and
//! URL building / cache keys.

/// Maximum length of a city name, in characters.
const MAX_CITY_LEN: usize = 100;

/// Trim whitespace, strip characters that could leak into markup or URLs
/// (`<`, `>`, `"`, `'`), and cap the length at 100 characters.
///
/// Total and idempotent; an empty result is valid and it is the caller's
/// job to reject empty city names before going to the network.
pub fn sanitize_city(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '"' | '\''))
        .take(MAX_CITY_LEN)
        .collect();
    // Stripping quotes or truncating can expose new edge whitespace
    cleaned.trim().to_string()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(sanitize_city("  Madrid  "), "Madrid");
        assert_eq!(sanitize_city("\tBuenos Aires\n"), "Buenos Aires");
    }

    #[test]
    fn test_strips_dangerous_characters() {
        assert_eq!(sanitize_city("<script>Madrid</script>"), "scriptMadrid/script");
        assert_eq!(sanitize_city("Mad\"ri'd"), "Madrid");
        let out = sanitize_city("a<b>c\"d'e");
        for c in ['<', '>', '"', '\''] {
            assert!(!out.contains(c));
        }
    }

    #[test]
    fn test_truncates_to_100_chars() {
        let long: String = "ñ".repeat(250);
        let out = sanitize_city(&long);
        assert_eq!(out.chars().count(), 100);
    }

    #[test]
    fn test_idempotent() {
        let long = "x".repeat(300);
        for input in ["  <Mé'xico>  ", "Valparaíso", "", "   ", "  ' Madrid '  ", &long] {
            let once = sanitize_city(input);
            assert_eq!(sanitize_city(&once), once);
        }
    }

    #[test]
    fn test_empty_input_is_valid() {
        assert_eq!(sanitize_city(""), "");
        assert_eq!(sanitize_city("  \"'  "), "");
    }
}

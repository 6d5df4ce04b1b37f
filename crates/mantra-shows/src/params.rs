//! Raw `GET /api/shows` query parameters and their lenient parsing.

use std::sync::LazyLock;

use mantra_core::{SortOrder, DEFAULT_RADIUS_MILES};
use regex::Regex;

static ZIP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{5}$").expect("valid regex"));

/// Query string exactly as received. Every field is optional and unparsed.
#[derive(Debug, Clone, Default)]
pub struct ShowsParams {
    pub zip: Option<String>,
    pub radius: Option<String>,
    pub page: Option<String>,
    pub q: Option<String>,
    pub sort: Option<String>,
}

impl ShowsParams {
    /// Builds parameters from decoded query pairs. The first value of a
    /// repeated key wins and unknown keys are ignored.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "zip" => &mut params.zip,
                "radius" => &mut params.radius,
                "page" => &mut params.page,
                "q" => &mut params.q,
                "sort" => &mut params.sort,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        params
    }

    /// Trimmed search keyword. Blank counts as absent.
    #[must_use]
    pub fn keyword(&self) -> Option<String> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(ToOwned::to_owned)
    }

    /// The zip, when it is exactly five ASCII digits.
    #[must_use]
    pub fn valid_zip(&self) -> Option<&str> {
        self.zip.as_deref().filter(|z| is_valid_zip(z))
    }

    #[must_use]
    pub fn radius_miles(&self) -> u32 {
        parse_or(self.radius.as_deref(), DEFAULT_RADIUS_MILES)
    }

    /// 0-indexed page number.
    #[must_use]
    pub fn page_index(&self) -> u32 {
        parse_or(self.page.as_deref(), 0)
    }

    #[must_use]
    pub fn sort_order(&self) -> SortOrder {
        SortOrder::from_param(self.sort.as_deref())
    }
}

/// `true` for exactly five ASCII digits.
#[must_use]
pub fn is_valid_zip(zip: &str) -> bool {
    ZIP_RE.is_match(zip)
}

fn parse_or(raw: Option<&str>, default: u32) -> u32 {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> ShowsParams {
        ShowsParams::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn zip_must_be_exactly_five_digits() {
        assert!(is_valid_zip("94102"));
        assert!(is_valid_zip("00000"));
        assert!(!is_valid_zip("9410"));
        assert!(!is_valid_zip("941023"));
        assert!(!is_valid_zip("94102-1234"));
        assert!(!is_valid_zip(" 94102"));
        assert!(!is_valid_zip("abcde"));
        assert!(!is_valid_zip(""));
        assert!(!is_valid_zip("９４１０２"));
    }

    #[test]
    fn defaults_apply_when_absent() {
        let p = ShowsParams::default();
        assert_eq!(p.radius_miles(), 50);
        assert_eq!(p.page_index(), 0);
        assert_eq!(p.sort_order(), SortOrder::DateAsc);
        assert_eq!(p.keyword(), None);
        assert_eq!(p.valid_zip(), None);
    }

    #[test]
    fn unparseable_numbers_fall_back_to_defaults() {
        let p = params(&[("radius", "far"), ("page", "-1")]);
        assert_eq!(p.radius_miles(), 50);
        assert_eq!(p.page_index(), 0);
    }

    #[test]
    fn numbers_parse_when_well_formed() {
        let p = params(&[("radius", "25"), ("page", " 3 ")]);
        assert_eq!(p.radius_miles(), 25);
        assert_eq!(p.page_index(), 3);
    }

    #[test]
    fn keyword_is_trimmed_and_blank_is_absent() {
        assert_eq!(params(&[("q", "  Slayer ")]).keyword().as_deref(), Some("Slayer"));
        assert_eq!(params(&[("q", "   ")]).keyword(), None);
    }

    #[test]
    fn sort_goes_through_allow_list() {
        assert_eq!(params(&[("sort", "name")]).sort_order(), SortOrder::NameAsc);
        assert_eq!(
            params(&[("sort", "venue.name,asc")]).sort_order(),
            SortOrder::DateAsc
        );
    }

    #[test]
    fn repeated_keys_keep_the_first_value() {
        let p = params(&[("zip", "94102"), ("zip", "10001"), ("radius", "25"), ("radius", "5")]);
        assert_eq!(p.valid_zip(), Some("94102"));
        assert_eq!(p.radius_miles(), 25);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let p = params(&[("utm_source", "x"), ("q", "Converge")]);
        assert_eq!(p.keyword().as_deref(), Some("Converge"));
        assert_eq!(p.zip, None);
    }
}

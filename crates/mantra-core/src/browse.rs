//! Client-side browsing over a [`ShowsResponse`](crate::ShowsResponse): genre filtering, day
//! grouping, display formatting, and pagination state.
//!
//! Nothing here talks to the network. The counts shown to users always come
//! from the locally filtered list, never from `ShowsResponse::total`.

use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use std::str::FromStr;

use chrono::NaiveDate;

use crate::shows::Show;

/// Genre chips offered above the results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GenreFilter {
    #[default]
    All,
    Metal,
    Rock,
    Alternative,
    Punk,
    Pop,
    HipHop,
    RnB,
    Country,
    Edm,
    Latin,
    Jazz,
    Classical,
}

impl GenreFilter {
    pub const ALL: [GenreFilter; 13] = [
        GenreFilter::All,
        GenreFilter::Metal,
        GenreFilter::Rock,
        GenreFilter::Alternative,
        GenreFilter::Punk,
        GenreFilter::Pop,
        GenreFilter::HipHop,
        GenreFilter::RnB,
        GenreFilter::Country,
        GenreFilter::Edm,
        GenreFilter::Latin,
        GenreFilter::Jazz,
        GenreFilter::Classical,
    ];

    #[must_use]
    pub fn value(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Metal => "metal",
            Self::Rock => "rock",
            Self::Alternative => "alternative",
            Self::Punk => "punk",
            Self::Pop => "pop",
            Self::HipHop => "hip-hop",
            Self::RnB => "r&b",
            Self::Country => "country",
            Self::Edm => "edm",
            Self::Latin => "latin",
            Self::Jazz => "jazz",
            Self::Classical => "classical",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Metal => "Metal / Hard Rock",
            Self::Rock => "Rock",
            Self::Alternative => "Alternative",
            Self::Punk => "Punk",
            Self::Pop => "Pop",
            Self::HipHop => "Hip-Hop",
            Self::RnB => "R&B",
            Self::Country => "Country",
            Self::Edm => "EDM",
            Self::Latin => "Latin",
            Self::Jazz => "Jazz",
            Self::Classical => "Classical",
        }
    }

    /// Lowercase substrings that select a show's genre. Empty for `All`.
    #[must_use]
    pub fn needles(self) -> &'static [&'static str] {
        match self {
            Self::All => &[],
            Self::Metal => &["metal", "hard rock"],
            Self::Rock => &["rock"],
            Self::Alternative => &["alternative", "indie"],
            Self::Punk => &["punk"],
            Self::Pop => &["pop"],
            Self::HipHop => &["hip-hop", "rap"],
            Self::RnB => &["r&b", "soul"],
            Self::Country => &["country"],
            Self::Edm => &["electro", "dance", "edm", "house", "techno", "trance"],
            Self::Latin => &["latin", "reggaeton"],
            Self::Jazz => &["jazz"],
            Self::Classical => &["classical", "symphony", "opera"],
        }
    }

    #[must_use]
    pub fn matches(self, genre: &str) -> bool {
        if self == Self::All {
            return true;
        }
        let genre = genre.to_lowercase();
        self.needles().iter().any(|needle| genre.contains(needle))
    }
}

impl fmt::Display for GenreFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for GenreFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|g| g.value() == wanted)
            .ok_or_else(|| format!("unknown genre filter '{s}'"))
    }
}

/// How grouped results are laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    List,
    Calendar,
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "list" => Ok(Self::List),
            "calendar" => Ok(Self::Calendar),
            other => Err(format!("unknown view mode '{other}'")),
        }
    }
}

#[must_use]
pub fn filter_by_genre(shows: &[Show], filter: GenreFilter) -> Vec<Show> {
    shows
        .iter()
        .filter(|s| filter.matches(&s.genre))
        .cloned()
        .collect()
}

/// Groups shows by `date`. Keys iterate in ascending date order; shows keep
/// their input order within a day.
#[must_use]
pub fn group_by_date(shows: &[Show]) -> BTreeMap<String, Vec<Show>> {
    let mut groups: BTreeMap<String, Vec<Show>> = BTreeMap::new();
    for show in shows {
        groups
            .entry(show.date.clone())
            .or_default()
            .push(show.clone());
    }
    groups
}

fn format_amount(amount: f64) -> String {
    if amount.fract().abs() < f64::EPSILON {
        format!("{amount:.0}")
    } else {
        amount.to_string()
    }
}

/// Renders a price range for display.
///
/// ```
/// use mantra_core::browse::format_price;
/// assert_eq!(format_price(Some(25.0), Some(75.0)), "$25\u{2013}$75");
/// assert_eq!(format_price(None, None), "");
/// ```
#[must_use]
pub fn format_price(min: Option<f64>, max: Option<f64>) -> String {
    match (min, max) {
        (None, None) => String::new(),
        (Some(min), None) => format!("${}", format_amount(min)),
        (None, Some(max)) => format!("${}", format_amount(max)),
        (Some(min), Some(max)) if (min - max).abs() < f64::EPSILON => {
            format!("${}", format_amount(min))
        }
        (Some(min), Some(max)) => {
            format!("${}\u{2013}${}", format_amount(min), format_amount(max))
        }
    }
}

/// `"19:30"` becomes `"7:30 PM"`. Unparseable input is returned unchanged.
#[must_use]
pub fn format_show_time(time: Option<&str>) -> String {
    let Some(time) = time else {
        return String::new();
    };
    let mut parts = time.splitn(3, ':');
    let (Some(hour), Some(minute)) = (parts.next(), parts.next()) else {
        return time.to_owned();
    };
    let Ok(hour) = hour.parse::<u32>() else {
        return time.to_owned();
    };
    let meridiem = if hour >= 12 { "PM" } else { "AM" };
    let h12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{h12}:{minute} {meridiem}")
}

/// `"2026-03-14"` becomes `"Sat, Mar 14"`. Unparseable input is returned unchanged.
#[must_use]
pub fn format_show_date(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_or_else(|_| date.to_owned(), |d| d.format("%a, %b %-d").to_string())
}

/// Headline above the results, e.g. `"12 Punk shows within 50 mi of 94102"`.
///
/// `count` must be the length of the locally filtered list.
#[must_use]
pub fn results_summary(
    count: usize,
    filter: GenreFilter,
    keyword: Option<&str>,
    radius: u32,
    zip: &str,
) -> String {
    let mut out = count.to_string();
    if filter != GenreFilter::All {
        out.push(' ');
        out.push_str(filter.label());
    }
    out.push_str(" shows");
    if keyword.is_none_or(str::is_empty) && !zip.is_empty() {
        let _ = write!(out, " within {radius} mi of {zip}");
    }
    out
}

/// Previous/next state for the 0-indexed page echoed by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub page: u32,
    pub total_pages: u32,
}

impl Pager {
    #[must_use]
    pub fn new(page: u32, total_pages: u32) -> Self {
        Self {
            page,
            total_pages: total_pages.max(1),
        }
    }

    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.total_pages
    }

    /// Pagination controls are only shown when there is more than one page.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.total_pages > 1
    }

    #[must_use]
    pub fn label(&self) -> String {
        format!("Page {} of {}", u64::from(self.page) + 1, self.total_pages)
    }
}

#[cfg(test)]
#[path = "browse_test.rs"]
mod tests;

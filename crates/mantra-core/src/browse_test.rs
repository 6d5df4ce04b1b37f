use super::*;

fn make_show(id: &str, date: &str, genre: &str) -> Show {
    Show {
        id: id.to_owned(),
        name: format!("Show {id}"),
        date: date.to_owned(),
        time: Some("20:00".to_owned()),
        venue: "The Fillmore".to_owned(),
        city: "San Francisco".to_owned(),
        state: "CA".to_owned(),
        distance: Some(2),
        artists: vec![],
        genre: genre.to_owned(),
        ticket_url: format!("https://aff.example/?u={id}"),
        image: None,
        price_min: None,
        price_max: None,
    }
}

// -----------------------------------------------------------------------
// format_price
// -----------------------------------------------------------------------

#[test]
fn format_price_equal_bounds_shows_single_value() {
    assert_eq!(format_price(Some(25.0), Some(25.0)), "$25");
}

#[test]
fn format_price_min_only() {
    assert_eq!(format_price(Some(25.0), None), "$25");
}

#[test]
fn format_price_max_only() {
    assert_eq!(format_price(None, Some(40.0)), "$40");
}

#[test]
fn format_price_range_uses_en_dash() {
    assert_eq!(format_price(Some(25.0), Some(75.0)), "$25\u{2013}$75");
}

#[test]
fn format_price_keeps_cents() {
    assert_eq!(format_price(Some(29.5), Some(89.95)), "$29.5\u{2013}$89.95");
}

#[test]
fn format_price_both_missing_is_empty() {
    assert_eq!(format_price(None, None), "");
}

// -----------------------------------------------------------------------
// time / date formatting
// -----------------------------------------------------------------------

#[test]
fn format_show_time_converts_to_twelve_hour() {
    assert_eq!(format_show_time(Some("19:30")), "7:30 PM");
    assert_eq!(format_show_time(Some("00:15")), "12:15 AM");
    assert_eq!(format_show_time(Some("12:00")), "12:00 PM");
    assert_eq!(format_show_time(Some("09:05:00")), "9:05 AM");
}

#[test]
fn format_show_time_handles_missing_and_garbage() {
    assert_eq!(format_show_time(None), "");
    assert_eq!(format_show_time(Some("TBA")), "TBA");
}

#[test]
fn format_show_date_uses_short_weekday() {
    assert_eq!(format_show_date("2026-03-14"), "Sat, Mar 14");
    assert_eq!(format_show_date("not-a-date"), "not-a-date");
}

// -----------------------------------------------------------------------
// genre filtering
// -----------------------------------------------------------------------

#[test]
fn all_filter_keeps_everything() {
    let shows = vec![
        make_show("1", "2026-03-14", "Metal"),
        make_show("2", "2026-03-14", "Country"),
    ];
    assert_eq!(filter_by_genre(&shows, GenreFilter::All).len(), 2);
}

#[test]
fn metal_filter_matches_hard_rock_case_insensitively() {
    let shows = vec![
        make_show("1", "2026-03-14", "Thrash Metal"),
        make_show("2", "2026-03-14", "Hard Rock"),
        make_show("3", "2026-03-14", "Pop"),
    ];
    let filtered = filter_by_genre(&shows, GenreFilter::Metal);
    let ids: Vec<_> = filtered.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
}

#[test]
fn edm_filter_matches_any_needle() {
    assert!(GenreFilter::Edm.matches("Dance/Electronic"));
    assert!(GenreFilter::Edm.matches("Techno"));
    assert!(!GenreFilter::Edm.matches("Jazz"));
}

#[test]
fn genre_filter_parses_from_value() {
    assert_eq!("hip-hop".parse::<GenreFilter>(), Ok(GenreFilter::HipHop));
    assert_eq!("R&B".parse::<GenreFilter>(), Ok(GenreFilter::RnB));
    assert!("grunge".parse::<GenreFilter>().is_err());
}

#[test]
fn view_mode_parses() {
    assert_eq!("calendar".parse::<ViewMode>(), Ok(ViewMode::Calendar));
    assert_eq!("List".parse::<ViewMode>(), Ok(ViewMode::List));
    assert!("grid".parse::<ViewMode>().is_err());
}

// -----------------------------------------------------------------------
// grouping, summary, pager
// -----------------------------------------------------------------------

#[test]
fn group_by_date_sorts_days_and_preserves_order_within_day() {
    let shows = vec![
        make_show("late", "2026-04-02", "Rock"),
        make_show("a", "2026-03-14", "Rock"),
        make_show("b", "2026-03-14", "Rock"),
    ];
    let grouped = group_by_date(&shows);
    let days: Vec<_> = grouped.keys().cloned().collect();
    assert_eq!(days, vec!["2026-03-14", "2026-04-02"]);
    let first_day: Vec<_> = grouped["2026-03-14"].iter().map(|s| s.id.as_str()).collect();
    assert_eq!(first_day, vec!["a", "b"]);
}

#[test]
fn results_summary_counts_local_list_and_mentions_location() {
    assert_eq!(
        results_summary(12, GenreFilter::Punk, None, 50, "94102"),
        "12 Punk shows within 50 mi of 94102"
    );
}

#[test]
fn results_summary_omits_location_for_keyword_search() {
    assert_eq!(
        results_summary(3, GenreFilter::All, Some("slayer"), 500, "94102"),
        "3 shows"
    );
}

#[test]
fn pager_bounds() {
    let first = Pager::new(0, 3);
    assert!(!first.has_prev());
    assert!(first.has_next());
    assert_eq!(first.label(), "Page 1 of 3");

    let last = Pager::new(2, 3);
    assert!(last.has_prev());
    assert!(!last.has_next());

    let single = Pager::new(0, 0);
    assert!(!single.is_visible());
    assert_eq!(single.total_pages, 1);
}

#[test]
fn pager_handles_maximum_page_index() {
    let pager = Pager::new(u32::MAX, 3);
    assert!(pager.has_prev());
    assert!(!pager.has_next());
    assert_eq!(pager.label(), "Page 4294967296 of 3");

    let unbounded = Pager::new(u32::MAX - 1, u32::MAX);
    assert!(!unbounded.has_next());
}

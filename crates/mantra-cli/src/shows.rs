//! `shows` command: fetch from the running server and render in the terminal.

use std::fmt::Write as _;
use std::time::Duration;

use anyhow::Context;
use mantra_core::browse::{
    filter_by_genre, format_price, format_show_date, format_show_time, group_by_date,
    results_summary, GenreFilter, Pager, ViewMode,
};
use mantra_core::{AppConfig, FilePreferenceStore, Preferences, Show, ShowsResponse};
use mantra_shows::is_valid_zip;
use serde::Deserialize;

use crate::ShowsArgs;

const NO_RESULTS: &str = "No shows found\nTry a larger radius, different zip, or broader search.";

/// One request to `GET /api/shows`, after defaults and saved preferences
/// have been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ShowsRequest {
    pub zip: Option<String>,
    pub radius: u32,
    pub page: u32,
    pub sort: String,
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl ShowsRequest {
    /// Explicit flags win over saved preferences. Keyword searches sort by
    /// relevance unless `--sort` says otherwise.
    pub(crate) fn resolve(args: &ShowsArgs, saved: &Preferences) -> anyhow::Result<Self> {
        let query = args
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(ToOwned::to_owned);
        let zip = args
            .zip
            .clone()
            .or_else(|| saved.zip.clone())
            .filter(|z| !z.is_empty());

        if query.is_none() && !zip.as_deref().is_some_and(is_valid_zip) {
            anyhow::bail!("Enter a valid 5-digit zip code (--zip)");
        }

        let default_sort = if query.is_some() { "relevance" } else { "date" };
        Ok(Self {
            zip,
            radius: args.radius.unwrap_or(saved.radius),
            page: args.page,
            sort: args.sort.clone().unwrap_or_else(|| default_sort.to_owned()),
            query,
        })
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("radius", self.radius.to_string()),
            ("page", self.page.to_string()),
            ("sort", self.sort.clone()),
        ];
        if let Some(zip) = &self.zip {
            pairs.push(("zip", zip.clone()));
        }
        if let Some(q) = &self.query {
            pairs.push(("q", q.clone()));
        }
        pairs
    }
}

pub(crate) async fn run_shows(config: &AppConfig, args: &ShowsArgs) -> anyhow::Result<()> {
    let mut store = FilePreferenceStore::open(&config.prefs_path)?;
    let saved = Preferences::load(&store);
    let request = ShowsRequest::resolve(args, &saved)?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .user_agent(&config.user_agent)
        .build()?;
    let response = fetch_shows(&client, &config.api_base, &request).await?;

    if let Some(zip) = &request.zip {
        Preferences::save(&mut store, zip, request.radius)?;
        tracing::debug!(zip = %zip, radius = request.radius, "saved location preferences");
    }

    print!("{}", render(&response, args.genre, args.view));
    Ok(())
}

pub(crate) async fn fetch_shows(
    client: &reqwest::Client,
    api_base: &str,
    request: &ShowsRequest,
) -> anyhow::Result<ShowsResponse> {
    let url = format!("{}/api/shows", api_base.trim_end_matches('/'));
    let response = client
        .get(&url)
        .query(&request.query_pairs())
        .send()
        .await
        .with_context(|| format!("could not reach {url}"))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map_or_else(|_| "unexpected response".to_owned(), |b| b.error);
        anyhow::bail!("Couldn't load shows ({}): {message}", status.as_u16());
    }

    response
        .json::<ShowsResponse>()
        .await
        .context("malformed shows response")
}

/// Renders one fetched page: summary line, grouped shows, pager.
pub(crate) fn render(response: &ShowsResponse, genre: GenreFilter, view: ViewMode) -> String {
    let filtered = filter_by_genre(&response.shows, genre);
    let mut lines = vec![results_summary(
        filtered.len(),
        genre,
        response.keyword.as_deref(),
        response.radius,
        &response.zip,
    )];

    if filtered.is_empty() {
        lines.push(String::new());
        lines.push(NO_RESULTS.to_owned());
    }

    for (date, shows) in group_by_date(&filtered) {
        lines.push(String::new());
        match view {
            ViewMode::List => {
                lines.push(format_show_date(&date).to_uppercase());
                for show in &shows {
                    lines.extend(list_entry(show));
                }
            }
            ViewMode::Calendar => {
                let plural = if shows.len() == 1 { "" } else { "s" };
                lines.push(format!(
                    "{} ({} show{plural})",
                    format_show_date(&date),
                    shows.len()
                ));
                for show in &shows {
                    lines.push(calendar_entry(show));
                }
            }
        }
    }

    let pager = Pager::new(response.page, response.total_pages);
    if pager.is_visible() {
        lines.push(String::new());
        let mut nav = pager.label();
        if pager.has_prev() {
            let _ = write!(nav, "  [prev: --page {}]", pager.page - 1);
        }
        if pager.has_next() {
            let _ = write!(nav, "  [next: --page {}]", pager.page.saturating_add(1));
        }
        lines.push(nav);
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn location(show: &Show) -> String {
    let place = [show.city.as_str(), show.state.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    let mut out = show.venue.clone();
    if !place.is_empty() {
        out.push_str(" · ");
        out.push_str(&place);
    }
    if let Some(miles) = show.distance {
        let _ = write!(out, " · {miles} mi");
    }
    out
}

fn show_time(show: &Show) -> String {
    let time = format_show_time(show.time.as_deref());
    if time.is_empty() {
        "TBA".to_owned()
    } else {
        time
    }
}

fn list_entry(show: &Show) -> Vec<String> {
    let mut details = format!("{} · {}", show_time(show), show.genre);
    let price = format_price(show.price_min, show.price_max);
    if !price.is_empty() {
        details.push_str(" · ");
        details.push_str(&price);
    }

    let mut entry = vec![format!("  {}", show.name)];
    if show.artists.len() > 1 {
        entry.push(format!("    with {}", show.artists[1..].join(", ")));
    }
    entry.push(format!("    {}", location(show)));
    entry.push(format!("    {details}"));
    entry.push(format!("    {}", show.ticket_url));
    entry
}

fn calendar_entry(show: &Show) -> String {
    let mut line = format!("  {:>8}  {}  ({})", show_time(show), show.name, location(show));
    let price = format_price(show.price_min, show.price_max);
    if !price.is_empty() {
        line.push_str("  ");
        line.push_str(&price);
    }
    line
}

use once_cell::sync::Lazy;
use rand::Rng;
use rand::seq::SliceRandom;
use regex::Regex;

use crate::error::{AppError, Result};

static LOC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<loc>\s*(.*?)\s*</loc>").expect("Failed to compile loc pattern")
});

static LASTMOD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<lastmod>\s*(.*?)\s*</lastmod>").expect("Failed to compile lastmod pattern")
});

// Permalinks like https://blog.example/2023/04/17/some-slug/
static URL_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/(\d{4})/(\d{2})/(\d{2})/").expect("Failed to compile URL date pattern")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    #[default]
    Random,
    Latest,
}

/// Pulls candidate post URLs out of sitemap text.
///
/// `<lastmod>` values are attached only when there is exactly one per
/// `<loc>`; otherwise every entry is left undated.
pub fn parse_sitemap(xml: &str) -> Vec<SitemapEntry> {
    let locs: Vec<&str> = LOC_RE
        .captures_iter(xml)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect();
    let lastmods: Vec<&str> = LASTMOD_RE
        .captures_iter(xml)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect();

    let paired = !lastmods.is_empty() && lastmods.len() == locs.len();
    ::log::debug!(
        "Sitemap has {} <loc> and {} <lastmod> entries (paired: {})",
        locs.len(),
        lastmods.len(),
        paired
    );

    locs.iter()
        .enumerate()
        .filter(|(_, url)| url.starts_with("http"))
        .map(|(i, url)| SitemapEntry {
            url: url.to_string(),
            last_modified: if paired { Some(lastmods[i].to_string()) } else { None },
        })
        .collect()
}

/// Chooses the entry to promote this run.
pub fn select_entry<R: Rng + ?Sized>(
    entries: &[SitemapEntry],
    mode: SelectionMode,
    rng: &mut R,
) -> Result<SitemapEntry> {
    if entries.is_empty() {
        return Err(AppError::EmptySitemapError);
    }

    let chosen = match mode {
        SelectionMode::Random => entries.choose(rng),
        SelectionMode::Latest => Some(select_latest(entries)),
    };

    chosen.cloned().ok_or(AppError::EmptySitemapError)
}

fn select_latest(entries: &[SitemapEntry]) -> &SitemapEntry {
    let dated = entries.iter().all(|e| e.last_modified.is_some());
    if dated {
        return first_max_by_key(entries.iter(), |e| e.last_modified.clone()).unwrap_or(&entries[0]);
    }

    let recovered = entries
        .iter()
        .filter_map(|e| url_date(&e.url).map(|date| (date, e)));
    match first_max_by_key(recovered, |pair: &(String, &SitemapEntry)| Some(pair.0.clone())) {
        Some((date, entry)) => {
            ::log::debug!("Latest post by URL date {}: {}", date, entry.url);
            entry
        }
        None => {
            ::log::debug!("No dates available, using first sitemap entry");
            &entries[0]
        }
    }
}

/// Like `Iterator::max_by_key` but keeps the earliest element on ties.
fn first_max_by_key<T, I, F>(items: I, key: F) -> Option<T>
where
    I: Iterator<Item = T>,
    F: Fn(&T) -> Option<String>,
{
    let mut best: Option<(String, T)> = None;
    for item in items {
        let Some(k) = key(&item) else { continue };
        match &best {
            Some((best_key, _)) if k <= *best_key => {}
            _ => best = Some((k, item)),
        }
    }
    best.map(|(_, item)| item)
}

/// Extracts a `YYYY-MM-DD` date from a `/YYYY/MM/DD/` path segment.
pub fn url_date(url: &str) -> Option<String> {
    URL_DATE_RE
        .captures(url)
        .map(|c| format!("{}-{}-{}", &c[1], &c[2], &c[3]))
}

use crate::bluesky::BlueskyClient;
use crate::bluesky::models::PublishedPost;
use crate::compose::{ComposedMessage, compose_message};
use crate::config::Config;
use crate::error::Result;
use crate::facet::{LinkFacet, message_link_facet};
use crate::scraper::{ExtractedContent, extract_content, fetch_html};
use crate::sitemap::{SelectionMode, SitemapEntry, parse_sitemap, select_entry};

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub mode: SelectionMode,
    pub dry_run: bool,
}

#[derive(Debug)]
pub enum Outcome {
    Published(PublishedPost),
    DryRun {
        message: ComposedMessage,
        facet: LinkFacet,
    },
}

/// Promotes one post from the configured sitemap.
pub async fn run(config: &Config, options: RunOptions) -> Result<Outcome> {
    ::log::info!("Fetching sitemap {}", config.sitemap_url);
    let sitemap = fetch_html(&config.sitemap_url).await?;
    let entries = parse_sitemap(&sitemap);
    ::log::info!("Found {} candidate posts", entries.len());

    let entry: SitemapEntry = {
        let mut rng = rand::thread_rng();
        select_entry(&entries, options.mode, &mut rng)?
    };
    ::log::info!(
        "Selected {} ({:?} mode, last modified {})",
        entry.url,
        options.mode,
        entry.last_modified.as_deref().unwrap_or("unknown")
    );

    let content = match fetch_html(&entry.url).await {
        Ok(html) => extract_content(&html),
        Err(e) if e.is_recoverable() => {
            ::log::warn!("Could not fetch {}, posting URL only: {}", entry.url, e);
            ExtractedContent::url_only(&entry.url)
        }
        Err(e) => return Err(e),
    };
    ::log::debug!("Extracted {:?}", content);

    let message = compose_message(&content, &entry.url, &config.message)?;
    let facet = message_link_facet(&message, &config.message.label, &entry.url)?;

    if options.dry_run {
        ::log::info!("Dry run, not publishing:\n{}", message.text);
        return Ok(Outcome::DryRun { message, facet });
    }

    let client = BlueskyClient::new(&config.service_url);
    let session = client.authenticate(&config.credentials).await?;
    let post = client
        .publish(&session, &message.text, std::slice::from_ref(&facet))
        .await?;
    ::log::info!("Posted to Bluesky: {}", post.uri);

    Ok(Outcome::Published(post))
}

//! Episode normalization
//!
//! Converts raw Spotify episode records into the canonical `Episode` shape.
//! Catalog records are heterogeneous and occasionally broken, and a single bad
//! record must never fail a whole listing page, so normalization is
//! best-effort: instead of erroring it returns a tagged value that is either a
//! canonical episode or a well-formed sentinel placeholder.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::Rng;
use serde::Deserialize;

use sweepcast_common::db::models::Episode;
use sweepcast_common::text::{clean_description, format_duration_ms, slugify};

/// An episode counts as new for this many days after release
const NEW_EPISODE_WINDOW_DAYS: i64 = 14;

/// Raw episode record as returned by the catalog API.
///
/// Every field is optional; the normalizer decides what a usable record is.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEpisode {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<String>,
    pub duration_ms: Option<i64>,
    pub external_urls: Option<RawExternalUrls>,
    pub images: Option<Vec<RawImage>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawImage {
    pub url: String,
}

/// One page of raw episodes from the catalog API
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEpisodePage {
    #[serde(default)]
    pub items: Vec<RawEpisode>,
    #[serde(default)]
    pub total: i64,
}

/// Why a placeholder was produced instead of a canonical episode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderReason {
    /// The upstream record carried no id
    MissingId,
    /// The record was present but could not be normalized
    Malformed,
}

/// Normalization result: canonical data or an explicit sentinel
#[derive(Debug, Clone)]
pub enum NormalizedEpisode {
    Canonical(Episode),
    Placeholder {
        episode: Episode,
        reason: PlaceholderReason,
    },
}

impl NormalizedEpisode {
    /// Unwrap to the episode, canonical or sentinel
    pub fn into_episode(self) -> Episode {
        match self {
            NormalizedEpisode::Canonical(episode) => episode,
            NormalizedEpisode::Placeholder { episode, .. } => episode,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, NormalizedEpisode::Placeholder { .. })
    }
}

/// Normalize a raw catalog episode into the canonical shape.
///
/// `show_image_url` is the show-level artwork used when the episode itself
/// carries no image. `now` is passed in so recency derivation is testable.
pub fn normalize_episode(
    raw: &RawEpisode,
    show_image_url: Option<&str>,
    now: DateTime<Utc>,
) -> NormalizedEpisode {
    let spotify_id = match raw.id.as_deref().filter(|id| !id.is_empty()) {
        Some(id) => id,
        None => {
            return NormalizedEpisode::Placeholder {
                episode: placeholder_episode(PlaceholderReason::MissingId, now),
                reason: PlaceholderReason::MissingId,
            }
        }
    };

    // Derived numeric id: first 6 chars of the external id as base-36, mod
    // 100000. Lossy by design; collisions are a documented limitation. An id
    // with characters outside base-36 counts as a malformed record.
    let numeric_id = match derive_numeric_id(spotify_id) {
        Ok(id) => id,
        Err(_) => {
            return NormalizedEpisode::Placeholder {
                episode: placeholder_episode(PlaceholderReason::Malformed, now),
                reason: PlaceholderReason::Malformed,
            }
        }
    };

    let title = raw.name.as_deref().unwrap_or("Untitled Episode");
    let description = raw
        .description
        .as_deref()
        .unwrap_or("No description available");

    let image_url = raw
        .images
        .as_ref()
        .and_then(|images| images.first())
        .map(|image| image.url.clone())
        .or_else(|| show_image_url.map(str::to_string));

    let episode = Episode {
        id: numeric_id,
        title: title.to_string(),
        description: clean_description(description),
        date: raw
            .release_date
            .clone()
            .unwrap_or_else(|| now.date_naive().to_string()),
        duration: format_duration_ms(raw.duration_ms.unwrap_or(0)),
        spotify_url: raw
            .external_urls
            .as_ref()
            .and_then(|urls| urls.spotify.clone())
            .unwrap_or_default(),
        spotify_id: spotify_id.to_string(),
        image_url,
        is_new: raw
            .release_date
            .as_deref()
            .map(|date| is_new_release(date, now))
            .unwrap_or(false),
        transcript: None,
        ai_summary: None,
        slug: slugify(raw.name.as_deref().unwrap_or("untitled-episode")),
    };

    NormalizedEpisode::Canonical(episode)
}

/// First 6 characters of the external id as base-36, reduced mod 100000
fn derive_numeric_id(spotify_id: &str) -> Result<i64, std::num::ParseIntError> {
    let prefix: String = spotify_id.chars().take(6).collect();
    Ok(i64::from_str_radix(&prefix, 36)? % 100_000)
}

/// Released within the last 14 days. Unparseable dates count as not new.
fn is_new_release(release_date: &str, now: DateTime<Utc>) -> bool {
    match NaiveDate::parse_from_str(release_date, "%Y-%m-%d") {
        Ok(date) => {
            let released = date.and_time(chrono::NaiveTime::MIN).and_utc();
            now.signed_duration_since(released) <= Duration::days(NEW_EPISODE_WINDOW_DAYS)
        }
        Err(_) => false,
    }
}

/// Well-formed sentinel episode with a random display id
fn placeholder_episode(reason: PlaceholderReason, now: DateTime<Utc>) -> Episode {
    let (title, description, slug) = match reason {
        PlaceholderReason::MissingId => (
            "Episode Not Available",
            "This episode information could not be loaded.",
            "episode-not-available",
        ),
        PlaceholderReason::Malformed => (
            "Episode Error",
            "There was an error loading this episode.",
            "episode-error",
        ),
    };

    Episode {
        id: rand::thread_rng().gen_range(0..100_000),
        title: title.to_string(),
        description: description.to_string(),
        date: now.date_naive().to_string(),
        duration: "0:00".to_string(),
        spotify_url: String::new(),
        spotify_id: String::new(),
        image_url: None,
        is_new: false,
        transcript: None,
        ai_summary: None,
        slug: slug.to_string(),
    }
}

use casualcast_data::locator;
use casualcast_data::{Episode, FeedSnapshot, PlayerDescriptor, Projector, Variant};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::SnapshotCache;
use crate::config::SiteConfig;
use crate::fetch::{FeedSource, FetchError};

/// What a page is generated from, or that it does not exist.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum PageProps<P> {
    Found {
        props: P,
        /// Seconds until the page should be regenerated
        revalidate: u64,
    },
    NotFound {
        #[serde(rename = "notFound")]
        not_found: bool,
    },
}

#[derive(Debug, Serialize)]
pub(crate) struct Head {
    title: String,
    description: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct IndexProps {
    head: Head,
    episodes: Vec<Episode>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EpisodeProps {
    head: Head,
    episode: Episode,
    player: Option<PlayerDescriptor>,
}

#[derive(Debug, Serialize)]
pub(crate) struct StaticPaths {
    paths: Vec<PathParams>,
    fallback: Fallback,
}

impl StaticPaths {
    pub(crate) fn ids(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(|path| path.params.episode.as_str())
    }
}

#[derive(Debug, Serialize)]
struct PathParams {
    params: EpisodeParams,
}

#[derive(Debug, Serialize)]
struct EpisodeParams {
    episode: String,
}

/// What to do with an episode id that was not pre-generated.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Fallback {
    /// Generate the page on first request
    Blocking,
}

/// The pages of the site, all generated from the cached feed snapshot.
#[derive(Debug)]
pub(crate) struct Site<S> {
    cache: SnapshotCache<S>,
    projector: Projector,
    config: SiteConfig,
}

impl<S: FeedSource> Site<S> {
    pub(crate) fn new(source: S, config: SiteConfig) -> Self {
        Self {
            cache: SnapshotCache::new(source, config.revalidate()),
            projector: Projector::new(config.signature_len),
            config,
        }
    }

    pub(crate) fn revalidate(&self) -> Duration {
        self.cache.revalidate()
    }

    /// The snapshot every page of one generation should be derived from.
    pub(crate) async fn snapshot(&self) -> Result<Arc<FeedSnapshot>, FetchError> {
        self.cache.get().await
    }

    pub(crate) async fn index(&self) -> Result<PageProps<IndexProps>, FetchError> {
        Ok(self.index_props(&*self.snapshot().await?))
    }

    pub(crate) async fn episode(&self, id: &str) -> Result<PageProps<EpisodeProps>, FetchError> {
        Ok(self.episode_props(&*self.snapshot().await?, id))
    }

    pub(crate) async fn paths(&self) -> Result<StaticPaths, FetchError> {
        Ok(self.static_paths(&*self.snapshot().await?))
    }

    fn found<P>(&self, props: P) -> PageProps<P> {
        PageProps::Found {
            props,
            revalidate: self.config.revalidate_secs,
        }
    }

    pub(crate) fn index_props(&self, snapshot: &FeedSnapshot) -> PageProps<IndexProps> {
        let episodes = snapshot.episodes(&self.projector, Variant::List);
        for episode in episodes.iter().filter(|e| e.audio().is_none()) {
            tracing::warn!("episode {} has no enclosure, it gets no player", episode.id());
        }
        self.found(IndexProps {
            head: Head {
                title: format!("{} - {}", self.config.title, self.config.tagline),
                description: self.config.description.clone(),
            },
            episodes,
        })
    }

    pub(crate) fn episode_props(&self, snapshot: &FeedSnapshot, id: &str) -> PageProps<EpisodeProps> {
        let Some(episode) = snapshot.find_episode(&self.projector, id) else {
            tracing::debug!("no episode {} among {}", id, snapshot.len());
            return PageProps::NotFound { not_found: true };
        };
        self.found(EpisodeProps {
            head: Head {
                title: format!("{} - {}", episode.title(), self.config.title),
                description: episode.description().to_owned(),
            },
            player: episode.player(),
            episode,
        })
    }

    pub(crate) fn static_paths(&self, snapshot: &FeedSnapshot) -> StaticPaths {
        let episodes = snapshot.episodes(&self.projector, Variant::List);
        StaticPaths {
            paths: locator::all_ids(&episodes)
                .into_iter()
                .map(|episode| PathParams {
                    params: EpisodeParams { episode },
                })
                .collect(),
            fallback: Fallback::Blocking,
        }
    }
}

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{AudioDescriptor, Episode, RawFeedItem};

/// Length of the signature the feed host appends to every description.
pub const DEFAULT_SIGNATURE_LEN: usize = 7;

static MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("markup pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Which page an episode is projected for.
pub enum Variant {
    /// The episode list on the homepage
    List,
    /// The page of a single episode
    Detail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Turns feed items into episodes.
pub struct Projector {
    signature_len: usize,
}

impl Default for Projector {
    fn default() -> Self {
        Projector::new(DEFAULT_SIGNATURE_LEN)
    }
}

impl Projector {
    /// A projector that drops `signature_len` trailing characters from list descriptions
    pub fn new(signature_len: usize) -> Self {
        Projector { signature_len }
    }

    /// Project `items` (most recent first) into episodes in the same order.
    ///
    /// The item at position `i` of `n` gets the id `n - i`, so the newest
    /// episode has the highest id and the oldest has `"1"`.
    pub fn project(&self, items: &[RawFeedItem], variant: Variant) -> Vec<Episode> {
        let count = items.len();
        items
            .iter()
            .enumerate()
            .map(|(index, item)| self.project_item(count - index, item, variant))
            .collect()
    }

    fn project_item(&self, id: usize, item: &RawFeedItem, variant: Variant) -> Episode {
        let audio = item.enclosures().first().map(AudioDescriptor::from);
        let id = id.to_string();
        match variant {
            Variant::List => {
                let title = format!("{}. {}", id, item.title());
                let description = self.list_description(item.description());
                Episode::new(id, title, description, None, item.published(), audio)
            }
            Variant::Detail => {
                let title = format!("{}: {}", id, item.title());
                Episode::new(
                    id,
                    title,
                    item.description().to_owned(),
                    Some(item.content().to_owned()),
                    item.published(),
                    audio,
                )
            }
        }
    }

    /// Strip markup, then drop the trailing signature.
    pub fn list_description(&self, description: &str) -> String {
        let text = strip_markup(description);
        let keep = text.chars().count().saturating_sub(self.signature_len);
        text.chars().take(keep).collect()
    }
}

/// Remove every `<...>` tag from `text`
pub fn strip_markup(text: &str) -> String {
    MARKUP.replace_all(text, "").into_owned()
}

/// Project `items` with the default signature length.
pub fn project(items: &[RawFeedItem], variant: Variant) -> Vec<Episode> {
    Projector::default().project(items, variant)
}

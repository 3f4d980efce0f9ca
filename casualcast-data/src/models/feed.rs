use crate::locator;
use crate::projector::{Projector, Variant};
use crate::FeedError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::Episode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A media attachment of a feed item.
pub struct Enclosure {
    url: String,
    #[serde(rename = "type")]
    mime_type: String,
}

impl Enclosure {
    /// Create an enclosure from its URL and MIME type
    pub fn new(url: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Enclosure {
            url: url.into(),
            mime_type: mime_type.into(),
        }
    }
    /// The URL of the attached media
    pub fn url(&self) -> &str {
        &self.url
    }
    /// The MIME type of the attached media
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One entry of the feed, as the feed reader hands it over.
pub struct RawFeedItem {
    title: String,
    description: String,
    content: String,
    published: DateTime<Utc>,
    enclosures: Vec<Enclosure>,
}

impl RawFeedItem {
    /// Create a feed item. `content` is the full markup body of the item.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        content: impl Into<String>,
        published: DateTime<Utc>,
        enclosures: Vec<Enclosure>,
    ) -> Self {
        RawFeedItem {
            title: title.into(),
            description: description.into(),
            content: content.into(),
            published,
            enclosures,
        }
    }
    /// The title of this item
    pub fn title(&self) -> &str {
        &self.title
    }
    /// The description of this item, possibly containing markup
    pub fn description(&self) -> &str {
        &self.description
    }
    /// The markup body of this item
    pub fn content(&self) -> &str {
        &self.content
    }
    /// When this item was published
    pub fn published(&self) -> DateTime<Utc> {
        self.published
    }
    /// The media attached to this item, in feed order
    pub fn enclosures(&self) -> &[Enclosure] {
        &self.enclosures
    }
}

/// RSS dates are RFC 2822, but plenty of feeds in the wild use RFC 3339.
fn parse_date(date: &str) -> Option<DateTime<Utc>> {
    let date = date.trim();
    DateTime::parse_from_rfc2822(date)
        .or_else(|_| DateTime::parse_from_rfc3339(date))
        .ok()
        .map(|x| x.with_timezone(&Utc))
}

impl TryFrom<&rss::Item> for RawFeedItem {
    type Error = FeedError;
    fn try_from(item: &rss::Item) -> Result<Self, Self::Error> {
        let Some(title) = item.title() else {
            return Err(FeedError::MissingTitle);
        };
        let title = title.trim().to_owned();

        let description = item.description().unwrap_or_default().to_owned();
        // `content:encoded` when the feed has it, the description otherwise
        let content = item
            .content()
            .map_or_else(|| description.clone(), ToOwned::to_owned);

        // RSS only allows a single enclosure per item
        // http://www.rssboard.org/rss-specification#ltenclosuregtSubelementOfLtitemgt
        let enclosures = item
            .enclosure()
            .map(|enc| Enclosure::new(enc.url().trim(), enc.mime_type().trim()))
            .into_iter()
            .collect();

        // If the date is missing or invalid, just take the 0 epoch
        let published = item
            .pub_date()
            .and_then(parse_date)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

        Ok(RawFeedItem {
            title,
            description,
            content,
            published,
            enclosures,
        })
    }
}

impl From<&atom_syndication::Entry> for RawFeedItem {
    fn from(entry: &atom_syndication::Entry) -> Self {
        let title = entry.title().value.trim().to_owned();
        let description = entry
            .summary()
            .map(|s| s.value.clone())
            .unwrap_or_default();
        let content = entry
            .content()
            .and_then(atom_syndication::Content::value)
            .map_or_else(|| description.clone(), ToOwned::to_owned);

        let enclosures = entry
            .links()
            .iter()
            .filter(|link| link.rel() == "enclosure")
            .map(|link| {
                Enclosure::new(link.href().trim(), link.mime_type().unwrap_or_default().trim())
            })
            .collect();

        let published = entry
            .published()
            .unwrap_or_else(|| entry.updated())
            .with_timezone(&Utc);

        RawFeedItem {
            title,
            description,
            content,
            published,
            enclosures,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One fetched-and-parsed view of the feed.
///
/// Episode ids depend on the number of items in the feed, so every page that
/// should agree on ids has to be derived from the same snapshot.
pub struct FeedSnapshot {
    items: Vec<RawFeedItem>,
}

impl FeedSnapshot {
    /// Wrap already-read items, most recent first
    pub fn new(items: Vec<RawFeedItem>) -> Self {
        FeedSnapshot { items }
    }

    /// Read a snapshot from an RSS channel
    pub fn from_rss(channel: &rss::Channel) -> Result<Self, FeedError> {
        let items = channel
            .items()
            .iter()
            .enumerate()
            .map(|(position, item)| {
                RawFeedItem::try_from(item).map_err(|e| match e {
                    FeedError::MissingTitle => FeedError::UntitledItem { position },
                    e => e,
                })
            })
            .collect::<Result<_, _>>()?;
        Ok(Self::new(items))
    }

    /// Read a snapshot from an Atom feed
    pub fn from_atom(feed: &atom_syndication::Feed) -> Self {
        Self::new(feed.entries().iter().map(RawFeedItem::from).collect())
    }

    /// Parse a feed document, trying RSS first and then Atom.
    pub fn parse(bytes: &[u8]) -> Result<Self, FeedError> {
        match rss::Channel::read_from(bytes) {
            Ok(channel) => Self::from_rss(&channel),
            Err(rss) => match atom_syndication::Feed::read_from(bytes) {
                Ok(feed) => Ok(Self::from_atom(&feed)),
                Err(atom) => Err(FeedError::Unreadable { rss, atom }),
            },
        }
    }

    /// The items of this snapshot, in feed order
    pub fn items(&self) -> &[RawFeedItem] {
        &self.items
    }
    /// The number of items, which is also the highest episode id
    pub fn len(&self) -> usize {
        self.items.len()
    }
    /// Whether the feed had no items at all
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Project every item of this snapshot
    pub fn episodes(&self, projector: &Projector, variant: Variant) -> Vec<Episode> {
        projector.project(&self.items, variant)
    }

    /// The detail view of the episode with the given id, if there is one
    pub fn find_episode(&self, projector: &Projector, id: &str) -> Option<Episode> {
        let episodes = self.episodes(projector, Variant::Detail);
        locator::find_by_id(&episodes, id).cloned()
    }

    /// Every episode id of this snapshot
    pub fn all_ids(&self) -> BTreeSet<String> {
        locator::all_ids(&self.episodes(&Projector::default(), Variant::List))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs::*;

    #[test]
    pub(crate) fn parse_rss_feed() -> Result<(), Box<dyn std::error::Error>> {
        let bytes = read("test-data/feeds/casual.xml")?;
        let snapshot = FeedSnapshot::parse(&bytes)?;
        assert_eq!(snapshot.len(), 3);

        let newest = &snapshot.items()[0];
        assert_eq!(newest.title(), "The Finale Nobody Asked For");
        assert_eq!(
            newest.description(),
            "<p>We argue about <b>endings</b>.</p>\n---\nSend"
        );
        assert_eq!(newest.content(), "<h2>Topics</h2><ul><li>Endings</li></ul>");
        assert_eq!(
            newest.published(),
            DateTime::parse_from_rfc3339("2023-03-02T08:00:00Z")?
        );
        assert_eq!(
            newest.enclosures(),
            &[Enclosure::new(
                "https://cdn.example.com/episodes/3.m4a",
                "audio/x-m4a"
            )]
        );

        // No `content:encoded`, so the description doubles as content
        let middle = &snapshot.items()[1];
        assert_eq!(middle.content(), middle.description());

        let oldest = &snapshot.items()[2];
        assert!(oldest.enclosures().is_empty());
        assert_eq!(oldest.published(), DateTime::<Utc>::UNIX_EPOCH);
        Ok(())
    }

    #[test]
    pub(crate) fn parse_atom_feed() -> Result<(), Box<dyn std::error::Error>> {
        let bytes = read("test-data/feeds/casual-atom.xml")?;
        let snapshot = FeedSnapshot::parse(&bytes)?;
        assert_eq!(snapshot.len(), 2);

        let newest = &snapshot.items()[0];
        assert_eq!(newest.title(), "Second Thoughts");
        assert_eq!(newest.content(), "<p>Full notes</p>");
        assert_eq!(
            newest.enclosures(),
            &[
                Enclosure::new("https://cdn.example.com/2.mp3", "audio/mpeg"),
                // the fixture pads this type with spaces
                Enclosure::new("https://cdn.example.com/2.ogg", "audio/ogg"),
            ]
        );

        // `published` is missing, so `updated` is used
        let oldest = &snapshot.items()[1];
        assert_eq!(
            oldest.published(),
            DateTime::parse_from_rfc3339("2023-01-01T12:00:00+01:00")?
        );
        assert_eq!(oldest.content(), "Where it all started");
        Ok(())
    }

    #[test]
    fn untitled_item_is_reported_with_position() {
        let feed = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>t</title><link>l</link><description>d</description>
<item><title>ok</title></item>
<item><description>no title</description></item>
</channel></rss>"#;
        let err = FeedSnapshot::parse(feed.as_bytes()).unwrap_err();
        assert!(matches!(err, FeedError::UntitledItem { position: 1 }));
    }

    #[test]
    fn garbage_is_unreadable() {
        let err = FeedSnapshot::parse(b"not a feed").unwrap_err();
        assert!(matches!(err, FeedError::Unreadable { .. }));
    }

    #[test]
    fn dates_accept_rfc3339() {
        assert_eq!(
            parse_date(" 2023-03-02T08:00:00Z "),
            parse_date("Thu, 02 Mar 2023 08:00:00 +0000")
        );
        assert!(parse_date("yesterday").is_none());
    }

    #[test]
    fn snapshot_ids_and_lookup_agree() {
        let items = ["C", "B", "A"]
            .iter()
            .map(|t| RawFeedItem::new(*t, "", "", DateTime::<Utc>::UNIX_EPOCH, vec![]))
            .collect();
        let snapshot = FeedSnapshot::new(items);
        let ids = snapshot.all_ids();
        assert_eq!(ids.len(), 3);
        for id in &ids {
            let episode = snapshot
                .find_episode(&Projector::default(), id)
                .expect("every enumerated id resolves");
            assert_eq!(episode.id(), id);
        }
        let oldest = snapshot.find_episode(&Projector::default(), "1").unwrap();
        assert_eq!(oldest.title(), "1: A");
    }

    #[test]
    fn empty_snapshot() {
        let snapshot = FeedSnapshot::new(vec![]);
        assert!(snapshot.is_empty());
        assert!(snapshot.all_ids().is_empty());
        assert!(snapshot.find_episode(&Projector::default(), "1").is_none());
    }
}

use thiserror::Error;

/// Why a feed document could not be turned into a [`FeedSnapshot`](crate::models::FeedSnapshot).
#[derive(Error, Debug)]
pub enum FeedError {
    /// The document is neither an RSS channel nor an Atom feed
    #[error("feed is neither RSS ({rss}) nor Atom ({atom})")]
    Unreadable {
        /// Why the RSS reader rejected the document
        rss: rss::Error,
        /// Why the Atom reader rejected the document
        atom: atom_syndication::Error,
    },

    /// An item without a title
    #[error("no title specified for this item")]
    MissingTitle,

    /// An item of a channel without a title
    #[error("no title specified for item {position} of the feed")]
    UntitledItem {
        /// Position of the item in the feed, starting at 0
        position: usize,
    },
}

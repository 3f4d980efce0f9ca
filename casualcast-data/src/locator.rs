use std::collections::BTreeSet;

use crate::models::Episode;

/// The first episode whose id is exactly `id`.
///
/// `None` means the episode does not exist (in this snapshot); callers should
/// answer with "not found" rather than an error.
pub fn find_by_id<'a>(episodes: &'a [Episode], id: &str) -> Option<&'a Episode> {
    episodes.iter().find(|episode| episode.id() == id)
}

/// The ids of every episode, used to pre-generate episode pages.
pub fn all_ids(episodes: &[Episode]) -> BTreeSet<String> {
    episodes.iter().map(|episode| episode.id().to_owned()).collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::models::RawFeedItem;
    use crate::projector::{project, Variant};
    use chrono::{DateTime, Utc};

    fn items(titles: &[&str]) -> Vec<RawFeedItem> {
        titles
            .iter()
            .map(|t| RawFeedItem::new(*t, "", "", DateTime::<Utc>::UNIX_EPOCH, vec![]))
            .collect()
    }

    #[test]
    fn finds_the_item_at_n_minus_id() {
        let raw = items(&["E", "D", "C", "B", "A"]);
        let episodes = project(&raw, Variant::Detail);
        for id in 1..=raw.len() {
            let episode = find_by_id(&episodes, &id.to_string()).unwrap();
            let title = episode
                .title()
                .strip_prefix(&format!("{}: ", id))
                .unwrap();
            assert_eq!(title, raw[raw.len() - id].title());
        }
    }

    #[test]
    fn oldest_is_one() {
        let episodes = project(&items(&["C", "B", "A"]), Variant::List);
        assert_eq!(find_by_id(&episodes, "1").unwrap().title(), "1. A");
        assert_eq!(find_by_id(&episodes, "3").unwrap().title(), "3. C");
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let episodes = project(&items(&["C", "B", "A"]), Variant::Detail);
        for id in ["0", "4", "-1", "01", " 1", "1.0", "one", ""] {
            assert!(find_by_id(&episodes, id).is_none(), "{:?} should not match", id);
        }
    }

    #[test]
    fn ids_enumerate_every_episode() {
        let episodes = project(&items(&["C", "B", "A"]), Variant::List);
        let ids = all_ids(&episodes);
        assert_eq!(ids, ["1", "2", "3"].iter().map(|s| s.to_string()).collect::<BTreeSet<_>>());
        assert!(ids.iter().all(|id| find_by_id(&episodes, id).is_some()));
    }

    #[test]
    fn empty_feed() {
        let episodes = project(&[], Variant::Detail);
        assert!(all_ids(&episodes).is_empty());
        assert!(find_by_id(&episodes, "1").is_none());
        assert!(find_by_id(&episodes, "").is_none());
    }
}

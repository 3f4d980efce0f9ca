use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Enclosure;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// What the audio player needs to load an episode's media.
pub struct AudioDescriptor {
    src: String,
    #[serde(rename = "type")]
    mime_type: String,
}

impl AudioDescriptor {
    /// The URL of the media
    pub fn src(&self) -> &str {
        &self.src
    }
    /// The MIME type of the media
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }
}

impl From<&Enclosure> for AudioDescriptor {
    fn from(enclosure: &Enclosure) -> Self {
        AudioDescriptor {
            src: enclosure.url().to_owned(),
            mime_type: enclosure.mime_type().to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// An episode as shown on the site, either in the episode list or on its own page.
pub struct Episode {
    id: String,
    title: String,
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    published: DateTime<Utc>,
    audio: Option<AudioDescriptor>,
}

impl Episode {
    pub(crate) fn new(
        id: String,
        title: String,
        description: String,
        content: Option<String>,
        published: DateTime<Utc>,
        audio: Option<AudioDescriptor>,
    ) -> Self {
        Episode {
            id,
            title,
            description,
            content,
            published,
            audio,
        }
    }

    /// The id of this episode within its snapshot, `"1"` being the oldest
    pub fn id(&self) -> &str {
        &self.id
    }
    /// The display title, prefixed with the id
    pub fn title(&self) -> &str {
        &self.title
    }
    /// The description of this episode
    pub fn description(&self) -> &str {
        &self.description
    }
    /// The markup body, only present on the episode page
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }
    /// When this episode was published
    pub fn published(&self) -> DateTime<Utc> {
        self.published
    }
    /// The media of this episode, `None` if the feed item had no enclosure
    pub fn audio(&self) -> Option<&AudioDescriptor> {
        self.audio.as_ref()
    }
    /// The site-relative link to this episode's page
    pub fn link(&self) -> String {
        format!("/{}", self.id)
    }

    /// What to hand the audio player, if this episode has anything to play
    pub fn player(&self) -> Option<PlayerDescriptor> {
        self.audio.as_ref().map(|audio| PlayerDescriptor {
            title: self.title.clone(),
            audio: audio.clone(),
            link: self.link(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// The `{title, audio, link}` triple the audio player is driven by.
pub struct PlayerDescriptor {
    title: String,
    audio: AudioDescriptor,
    link: String,
}

impl PlayerDescriptor {
    /// The title shown by the player
    pub fn title(&self) -> &str {
        &self.title
    }
    /// The media to play
    pub fn audio(&self) -> &AudioDescriptor {
        &self.audio
    }
    /// Where the player links back to
    pub fn link(&self) -> &str {
        &self.link
    }
}

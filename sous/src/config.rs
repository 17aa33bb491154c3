use sous_config::{env_opt, Secret};
use sous_core::prelude::AdminList;

pub fn admins() -> AdminList {
    let list = env_opt("SOUS_ADMINS")
        .map(|csv| AdminList::from_csv(&csv))
        .unwrap_or_default();
    if list.is_empty() {
        log::warn!("SOUS_ADMINS is not set. admin commands will be unreachable");
    }
    list
}

pub fn groq_api_key() -> Option<Secret> {
    let key = env_opt("SOUS_GROQ_API_KEY").map(Secret);
    if key.is_none() {
        log::warn!("SOUS_GROQ_API_KEY is not set. AI features will be disabled");
    }
    key
}

#[derive(Clone, Debug, Default)]
pub struct Socials {
    pub discord: Option<String>,
    pub twitter: Option<String>,
    pub youtube: Option<String>,
}

impl Socials {
    pub fn load() -> Self {
        let get = |key: &str| {
            let val = env_opt(key);
            if val.is_none() {
                log::warn!("{key} is not set");
            }
            val
        };

        Self {
            discord: get("SOUS_DISCORD_INVITE"),
            twitter: get("SOUS_TWITTER_HANDLE"),
            youtube: get("SOUS_YOUTUBE_CHANNEL"),
        }
    }

    /// The promotional line, skipping anything that isn't configured.
    pub fn line(&self) -> String {
        let mut parts = Vec::with_capacity(4);
        if let Some(discord) = &self.discord {
            parts.push(format!("Discord: {discord}"));
        }
        if let Some(twitter) = &self.twitter {
            parts.push(format!("Twitter: {twitter}"));
        }
        parts.push(String::from("Follow the stream! 🎯"));
        if let Some(youtube) = &self.youtube {
            parts.push(format!("Youtube: {youtube}"));
        }

        format!("🔗 Follow us! {}", parts.join(" | "))
    }
}

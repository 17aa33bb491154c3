use sous_config::{load_from_env, LoadFromEnv, Secret};

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Config {
    pub address: String,
    pub name: String,
    pub password: Secret,
    pub channel: String,
}

impl Config {
    /// IRC channels carry a leading '#'; the env var may omit it.
    pub fn channel(&self) -> String {
        if self.channel.starts_with('#') {
            return self.channel.clone();
        }
        format!("#{}", self.channel)
    }
}

impl LoadFromEnv for Config {
    fn load_from_env() -> anyhow::Result<Self> {
        load_from_env([
            ("SOUS_TWITCH_IRC_ADDRESS", |t, v| t.address = v),
            ("SOUS_TWITCH_NAME", |t, v| t.name = v),
            ("SOUS_TWITCH_OAUTH_TOKEN", |t, v| t.password = Secret(v)),
            ("SOUS_TWITCH_CHANNEL", |t, v| t.channel = v),
        ])
    }
}

use std::{
    sync::atomic::{AtomicBool, Ordering},
    sync::Arc,
    time::Duration,
};

use anyhow::Context;
use sous_config::Secret;
use sous_core::prelude::*;
use tokio::time::Instant;

/// The ask-the-chef command and its remote brain.
///
/// `ask` never fails: a missing credential, a dead remote, and a malformed
/// response all come back as chat-sized apologies.
pub struct Chef {
    client: reqwest::Client,
    api_key: Option<Secret>,
    channel: String,
    enabled: AtomicBool,
    cooldown: Cooldown,
}

const ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
const MODEL: &str = "gemma2-9b-it";

// the platform caps messages at 500 chars; leave room for the mention prefix
const MAX_REPLY: usize = 450;

const PER_USER_COOLDOWN: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

impl Chef {
    pub fn new(api_key: Option<Secret>, channel: String) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(sous_core::USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            api_key,
            channel,
            enabled: AtomicBool::new(true),
            cooldown: Cooldown::new(PER_USER_COOLDOWN),
        })
    }

    pub fn bind(this: Arc<Self>) -> Vec<Entry> {
        Binding::create_shared(this)
            .bind(
                cmd("!chefbot").help("asks the chef a question"),
                Self::serve,
            )
            .into_entries()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Returns the new setting.
    pub fn toggle(&self) -> bool {
        !self.enabled.fetch_xor(true, Ordering::SeqCst)
    }

    async fn serve(self: Arc<Self>, msg: Message) -> anyhow::Result<Outcome> {
        let name = msg.sender_name();

        if !self.is_enabled() {
            return Ok(Outcome::reply(
                "🤖 Chef AI chat is currently disabled. Admins can enable it with !ai-toggle",
            ));
        }

        if msg.args().is_empty() {
            return Ok(Outcome::reply(format!(
                "👨🏻‍🍳 @{name}, ask me something, LET ME COOK! Usage: !chefbot <your question>"
            )));
        }

        if let Err(left) = self
            .cooldown
            .try_claim(&name.to_lowercase(), Instant::now())
            .await
        {
            let seconds = left.as_secs() + u64::from(left.subsec_nanos() > 0);
            return Ok(Outcome::reply(format!(
                "⏱️ @{name}, please wait {seconds} seconds before asking again."
            )));
        }

        let question = msg.args().join();
        log::debug!("AI request from {name}: {question}");
        Ok(Outcome::reply(self.ask(&question, name).await))
    }

    pub async fn ask(&self, question: &str, username: &str) -> String {
        let Some(key) = &self.api_key else {
            return String::from("❌ AI not configured. Missing API key.");
        };

        match self.generate(key, question).await {
            Ok(answer) => format!("👨🏻‍🍳 @{username}: {}", clamp_reply(answer.trim())),
            Err(err) => {
                log::error!("chef request failed: {err:?}");
                format!("❌ @{username}, the chef failed to cook. Try again later!")
            }
        }
    }

    async fn generate(&self, key: &Secret, question: &str) -> anyhow::Result<String> {
        let persona = format!(
            "You are a helpful Twitch chat assistant named Sous. Keep responses under 200 \
             characters and friendly. You're helping {}'s community. Be concise, helpful, \
             intelligent, and engaging. You are speaking with mostly adults, so no need for any \
             type of odd slang. You do not need to introduce yourself.",
            self.channel.trim_start_matches('#')
        );

        let request = Request {
            model: MODEL,
            messages: vec![
                RequestMessage {
                    role: "system",
                    content: &persona,
                },
                RequestMessage {
                    role: "user",
                    content: question,
                },
            ],
            max_tokens: 150,
            temperature: 0.7,
        };

        let resp: Response = self
            .client
            .post(ENDPOINT)
            .bearer_auth(&**key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        resp.answer().with_context(|| "no message in response")
    }
}

#[derive(serde::Serialize)]
struct Request<'a> {
    model: &'a str,
    messages: Vec<RequestMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(serde::Serialize)]
struct RequestMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(serde::Deserialize)]
struct Response {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(serde::Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(serde::Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl Response {
    fn answer(self) -> Option<String> {
        self.choices.into_iter().next().map(|c| c.message.content)
    }
}

fn clamp_reply(text: &str) -> String {
    if text.chars().count() <= MAX_REPLY {
        return text.to_string();
    }
    let mut out: String = text.chars().take(MAX_REPLY - 3).collect();
    out.push_str("...");
    out
}

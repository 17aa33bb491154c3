use std::{sync::Arc, time::Duration};

use sous_core::{prelude::*, FormatTime};
use tokio::time::Instant;

use crate::config::Socials;

pub struct Builtin {
    started: Instant,
    promo: Cooldown,
    socials: Socials,
}

impl Builtin {
    const PROMO_COOLDOWN: Duration = Duration::from_secs(30);

    pub fn bind(socials: Socials) -> Vec<Entry> {
        let this = Self {
            started: Instant::now(),
            promo: Cooldown::new(Self::PROMO_COOLDOWN),
            socials,
        };

        Binding::create(this)
            .bind(cmd("!hello").help("gives a greeting"), Self::hello)
            .bind(cmd("!dice").help("rolls a six sided die"), Self::dice)
            .bind(cmd("!time").help("tells the current time"), Self::time)
            .bind(cmd("!socials").help("where else to find us"), Self::socials)
            .bind(cmd("!commands").help("lists the available commands"), Self::commands)
            .bind(cmd("!discord").help("plugs the discord server"), Self::discord)
            .bind(cmd("!8ball").help("consults the magic 8-ball"), Self::eight_ball)
            .bind(cmd("!flip").help("flips a coin"), Self::flip)
            .bind(cmd("!rng").help("picks a number in a range"), Self::rng)
            .bind(cmd("!lurk").help("settles in for a lurk"), Self::lurk)
            .bind(cmd("!unlurk").help("returns from a lurk"), Self::unlurk)
            .bind(cmd("!hug").help("hugs someone"), Self::hug)
            .bind(cmd("!quote").help("shares a quote"), Self::quote)
            .bind(cmd("!fact").help("shares a fun fact"), Self::fact)
            .bind(cmd("!love").help("measures the love"), Self::love)
            .bind(cmd("!botuptime").help("how long the bot has been awake"), Self::bot_uptime)
            .bind(cmd("!vibes").help("runs a vibe check"), Self::vibes)
            .bind(cmd("!energy").help("reads an energy level"), Self::energy)
            .bind(cmd("!rules").help("the chat rules"), Self::rules)
            .bind(cmd("!echo").help("repeats a message"), Self::echo)
            .into_entries()
    }

    async fn hello(self: Arc<Self>, msg: Message) -> anyhow::Result<Outcome> {
        let name = msg.sender_name();
        let greetings = [
            format!("Hello @{name}! Welcome to the stream! 👋"),
            format!("Hey there @{name}! Glad you're here! 🎉"),
            format!("Welcome @{name}! Hope you enjoy the stream! ✨"),
            format!("@{name} just entered the chat! What's good? 🔥"),
        ];
        Ok(Outcome::reply(greetings[fastrand::usize(..greetings.len())].as_str()))
    }

    async fn dice(self: Arc<Self>, msg: Message) -> anyhow::Result<Outcome> {
        let roll = fastrand::u32(1..=6);
        Ok(Outcome::reply(format!(
            "🎲 @{} rolled a {roll}!",
            msg.sender_name()
        )))
    }

    async fn time(self: Arc<Self>, _: Message) -> anyhow::Result<Outcome> {
        let f = time::format_description::parse("[hour]:[minute]:[second]")?;
        let now = time::OffsetDateTime::now_local()?.format(&f)?;
        Ok(Outcome::reply(format!("⏰ Current time: {now}")))
    }

    async fn socials(self: Arc<Self>, _: Message) -> anyhow::Result<Outcome> {
        Ok(Outcome::reply(self.socials.line()))
    }

    async fn commands(self: Arc<Self>, msg: Message) -> anyhow::Result<Outcome> {
        let registry = msg.state().get_owned::<Arc<Registry>>().await;
        let mut names = registry
            .commands(Tier::Everyone)
            .map(|c| c.token.to_string())
            .collect::<Vec<_>>();
        names.sort();
        Ok(Outcome::reply(format!(
            "Available commands: {}",
            names.join(", ")
        )))
    }

    async fn discord(self: Arc<Self>, msg: Message) -> anyhow::Result<Outcome> {
        let Some(invite) = &self.socials.discord else {
            return Ok(Outcome::None);
        };

        // channel-wide cooldown; stay quiet while it runs
        if self.promo.try_claim("discord", Instant::now()).await.is_err() {
            return Ok(Outcome::None);
        }

        Ok(Outcome::reply(format!(
            "🎮 Join our Discord community: {invite} - See you there @{}! 🧑🏻‍🍳",
            msg.sender_name()
        )))
    }

    async fn eight_ball(self: Arc<Self>, msg: Message) -> anyhow::Result<Outcome> {
        const ANSWERS: [&str; 20] = [
            "It is certain",
            "Reply hazy, try again",
            "Don't count on it",
            "It is decidedly so",
            "Ask again later",
            "My reply is no",
            "Without a doubt",
            "Better not tell you now",
            "My sources say no",
            "Yes definitely",
            "Cannot predict now",
            "Outlook not so good",
            "You may rely on it",
            "Concentrate and ask again",
            "Very doubtful",
            "As I see it, yes",
            "Most likely",
            "Outlook good",
            "Yes",
            "Signs point to yes",
        ];

        let name = msg.sender_name();
        if msg.args().is_empty() {
            return Ok(Outcome::reply(format!(
                "🎱 @{name}, ask me a question! Usage: !8ball <question>"
            )));
        }

        let answer = ANSWERS[fastrand::usize(..ANSWERS.len())];
        Ok(Outcome::reply(format!("🎱 @{name}: \"{answer}\"")))
    }

    async fn flip(self: Arc<Self>, msg: Message) -> anyhow::Result<Outcome> {
        let (emoji, result) = if fastrand::bool() {
            ("🪙", "Heads")
        } else {
            ("🥇", "Tails")
        };
        Ok(Outcome::reply(format!(
            "{emoji} @{} flipped {result}!",
            msg.sender_name()
        )))
    }

    async fn rng(self: Arc<Self>, msg: Message) -> anyhow::Result<Outcome> {
        let args = msg.args();
        // a slot that doesn't parse falls back to that slot's default
        let (min, max): (i64, i64) = match args.len() {
            0 => (1, 100),
            1 => (1, args.get_parsed(0).unwrap_or(100)),
            _ => (
                args.get_parsed(0).unwrap_or(1),
                args.get_parsed(1).unwrap_or(100),
            ),
        };

        let name = msg.sender_name();
        if min >= max {
            return Ok(Outcome::reply(format!(
                "❌ @{name}, minimum must be less than maximum!"
            )));
        }

        let result = fastrand::i64(min..=max);
        Ok(Outcome::reply(format!(
            "🎯 @{name}: Random number between {min}-{max} is **{result}**"
        )))
    }

    async fn lurk(self: Arc<Self>, msg: Message) -> anyhow::Result<Outcome> {
        let name = msg.sender_name();
        let lines = [
            format!("Thanks for lurking @{name}! Enjoy the stream! 👻"),
            format!("Happy lurking @{name}! 🕵️"),
            format!("@{name} is now in lurk mode! 🥷"),
            format!("Lurk away @{name}! We appreciate you being here! 💜"),
        ];
        Ok(Outcome::reply(lines[fastrand::usize(..lines.len())].as_str()))
    }

    async fn unlurk(self: Arc<Self>, msg: Message) -> anyhow::Result<Outcome> {
        let name = msg.sender_name();
        let lines = [
            format!("Welcome back @{name}! 🎉"),
            format!("@{name} has emerged from the shadows! 👋"),
            format!("Look who's back! Hey @{name}! ✨"),
            format!("@{name} decided to join the conversation! 🗣️"),
        ];
        Ok(Outcome::reply(lines[fastrand::usize(..lines.len())].as_str()))
    }

    async fn hug(self: Arc<Self>, msg: Message) -> anyhow::Result<Outcome> {
        let name = msg.sender_name();
        let out = match msg.args().get(0) {
            Some(target) => {
                let target = target.trim_start_matches('@');
                format!("🫂 @{name} gives @{target} a warm hug!")
            }
            None => format!("🫂 @{name} gives everyone a big hug!"),
        };
        Ok(Outcome::reply(out))
    }

    async fn quote(self: Arc<Self>, _: Message) -> anyhow::Result<Outcome> {
        const QUOTES: [&str; 8] = [
            "The only way to do great work is to love what you do. - Steve Jobs",
            "Innovation distinguishes between a leader and a follower. - Steve Jobs",
            "Stay hungry, stay foolish. - Steve Jobs",
            "The future belongs to those who believe in the beauty of their dreams. - Eleanor Roosevelt",
            "It is during our darkest moments that we must focus to see the light. - Aristotle",
            "Success is not final, failure is not fatal: it is the courage to continue that counts. - Winston Churchill",
            "The only impossible journey is the one you never begin. - Tony Robbins",
            "Life is what happens to you while you're busy making other plans. - John Lennon",
        ];
        Ok(Outcome::reply(format!(
            "💭 {}",
            QUOTES[fastrand::usize(..QUOTES.len())]
        )))
    }

    async fn fact(self: Arc<Self>, _: Message) -> anyhow::Result<Outcome> {
        const FACTS: [&str; 8] = [
            "Honey never spoils! Archaeologists have found edible honey in Egyptian tombs.",
            "A group of flamingos is called a 'flamboyance'.",
            "Octopuses have three hearts and blue blood.",
            "Bananas are berries, but strawberries aren't.",
            "A shrimp's heart is in its head.",
            "Wombat poop is cube-shaped.",
            "The shortest war in history lasted only 38-45 minutes.",
            "Cleopatra lived closer in time to the moon landing than to the construction of the Great Pyramid.",
        ];
        Ok(Outcome::reply(format!(
            "🧠 Fun Fact: {}",
            FACTS[fastrand::usize(..FACTS.len())]
        )))
    }

    async fn love(self: Arc<Self>, msg: Message) -> anyhow::Result<Outcome> {
        let name = msg.sender_name();
        let percentage = fastrand::u32(..=100);
        let out = match msg.args().get(0) {
            Some(target) => {
                let target = target.trim_start_matches('@');
                format!("💕 Love between @{name} and @{target}: {percentage}%")
            }
            None => format!("💕 @{name}, you are {percentage}% loveable today!"),
        };
        Ok(Outcome::reply(out))
    }

    async fn bot_uptime(self: Arc<Self>, _: Message) -> anyhow::Result<Outcome> {
        let uptime = self.started.elapsed().as_readable_time();
        Ok(Outcome::reply(format!(
            "🧑🏻‍🍳 Bot has been awake for: {uptime}"
        )))
    }

    async fn vibes(self: Arc<Self>, msg: Message) -> anyhow::Result<Outcome> {
        let name = msg.sender_name();
        let checks = [
            format!("✨ @{name} is radiating good vibes today! The energy is immaculate! 🌟"),
            format!("🔥 @{name}'s vibe check: ELITE TIER! 💯"),
            format!("🌈 @{name} is bringing rainbow energy to the chat! 🦄"),
            format!("⚡ @{name}'s vibe frequency: MAXIMUM POWER! 🚀"),
            format!("😎 @{name} is too cool for the vibe check! 🧊"),
            format!("🎵 @{name} is vibing to life's soundtrack! 🎶"),
        ];
        Ok(Outcome::reply(checks[fastrand::usize(..checks.len())].as_str()))
    }

    async fn energy(self: Arc<Self>, msg: Message) -> anyhow::Result<Outcome> {
        let level = fastrand::u32(..=100);
        let (emoji, description) = match level {
            90.. => ("⚡🔥⚡", "MAXIMUM OVERDRIVE!"),
            70.. => ("🚀", "High energy rocket mode!"),
            50.. => ("✨", "Steady positive energy!"),
            30.. => ("☕", "Could use some coffee..."),
            _ => ("😴", "Low power mode activated"),
        };
        Ok(Outcome::reply(format!(
            "{emoji} @{}'s energy level: {level}% - {description}",
            msg.sender_name()
        )))
    }

    async fn rules(self: Arc<Self>, _: Message) -> anyhow::Result<Outcome> {
        Ok(Outcome::reply(
            "📋 Stream Rules: • Keep language clean • No politics/current events discussion • Backseating permitted as long as it is reasonable 🎯",
        ))
    }

    async fn echo(self: Arc<Self>, msg: Message) -> anyhow::Result<Outcome> {
        if msg.args().is_empty() {
            return Ok(Outcome::reply("Usage: !echo <message>"));
        }
        Ok(Outcome::reply(format!("📢 {}", msg.args().join())))
    }
}

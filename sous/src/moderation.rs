use std::sync::Arc;

use sous_core::prelude::*;

/// Operator actions. These only build the platform directive; the channel is
/// trusted to enforce it.
pub struct Moderation;

impl Moderation {
    pub fn bind() -> Vec<Entry> {
        Binding::create(Self)
            .bind(
                cmd("!timeout").moderator().help("times a user out for a minute"),
                Self::timeout,
            )
            .bind(cmd("!ban").moderator().help("bans a user"), Self::ban)
            .bind(cmd("!unban").moderator().help("unbans a user"), Self::unban)
            .bind(cmd("!clear").moderator().help("clears the chat"), Self::clear)
            .into_entries()
    }

    async fn timeout(self: Arc<Self>, msg: Message) -> anyhow::Result<Outcome> {
        let Some(target) = msg.args().get(0) else {
            return Ok(Outcome::reply(format!(
                "❌ @{}, usage: !timeout <username>",
                msg.sender_name()
            )));
        };
        let target = target.trim_start_matches('@');
        Ok(Outcome::directive(format!("/timeout {target} 60")))
    }

    async fn ban(self: Arc<Self>, msg: Message) -> anyhow::Result<Outcome> {
        let Some(target) = msg.args().get(0) else {
            return Ok(Outcome::reply(format!(
                "❌ @{}, usage: !ban <username> [reason]",
                msg.sender_name()
            )));
        };
        let target = target.trim_start_matches('@').to_string();

        let reason = msg.args().iter().skip(1).collect::<Vec<_>>().join(" ");
        let reason = if reason.is_empty() {
            String::from("No reason provided")
        } else {
            reason
        };

        Ok(Outcome::directive(format!("/ban {target} {reason}")))
    }

    async fn unban(self: Arc<Self>, msg: Message) -> anyhow::Result<Outcome> {
        let Some(target) = msg.args().get(0) else {
            return Ok(Outcome::reply(format!(
                "❌ @{}, usage: !unban <username>",
                msg.sender_name()
            )));
        };
        let target = target.trim_start_matches('@');
        Ok(Outcome::directive(format!("/unban {target}")))
    }

    async fn clear(self: Arc<Self>, _: Message) -> anyhow::Result<Outcome> {
        Ok(Outcome::directive("/clear"))
    }
}

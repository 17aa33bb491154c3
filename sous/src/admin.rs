use std::sync::Arc;

use sous_core::prelude::*;
use sous_twitch::Chat;

use crate::{autopost::AutoPoster, chef::Chef, shutdown::Shutdown};

pub struct Admin {
    poster: Arc<AutoPoster>,
    chef: Arc<Chef>,
    shutdown: Shutdown,
}

impl Admin {
    pub fn bind(poster: Arc<AutoPoster>, chef: Arc<Chef>, shutdown: Shutdown) -> Vec<Entry> {
        let this = Self {
            poster,
            chef,
            shutdown,
        };

        Binding::create(this)
            .bind(cmd("!shutdown").admin().help("stops the bot"), Self::shutdown)
            .bind(cmd("!restart").admin().help("restarts the bot"), Self::restart)
            .bind(
                cmd("!autopost").admin().help("toggles the recurring socials post"),
                Self::autopost,
            )
            .bind(
                cmd("!autopost-status").admin().help("reports the auto-post state"),
                Self::autopost_status,
            )
            .bind(cmd("!ai-toggle").admin().help("toggles the chef AI"), Self::ai_toggle)
            .bind(cmd("!ai-status").admin().help("reports the chef AI state"), Self::ai_status)
            .bind(
                cmd("!adminhelp").admin().help("lists the admin commands"),
                Self::admin_help,
            )
            .into_entries()
    }

    async fn shutdown(self: Arc<Self>, msg: Message) -> anyhow::Result<Outcome> {
        let chat = msg.state().get_owned::<Chat>().await;
        chat.say(
            msg.channel(),
            &format!("🔧 Bot shutting down by admin @{}...", msg.sender_name()),
        )
        .await;

        log::info!("shutdown initiated by {}", msg.sender_name());
        self.shutdown.signal(0).await;
        Ok(Outcome::None)
    }

    async fn restart(self: Arc<Self>, msg: Message) -> anyhow::Result<Outcome> {
        let chat = msg.state().get_owned::<Chat>().await;
        chat.say(
            msg.channel(),
            &format!("🔄 Bot restarting by admin @{}...", msg.sender_name()),
        )
        .await;

        log::info!("restart initiated by {}", msg.sender_name());
        self.shutdown.signal(Shutdown::RESTART_CODE).await;
        Ok(Outcome::None)
    }

    async fn autopost(self: Arc<Self>, msg: Message) -> anyhow::Result<Outcome> {
        let Some(action) = msg.args().get(0).map(str::to_lowercase) else {
            return Ok(Outcome::reply(format!(
                "🔧 Auto-posting is currently {}. Use !autopost on/off",
                if self.poster.is_enabled() {
                    "enabled"
                } else {
                    "disabled"
                }
            )));
        };

        match action.as_str() {
            "on" | "enable" => {
                let chat = msg.state().get_owned::<Chat>().await;
                Arc::clone(&self.poster)
                    .start(chat, msg.channel().to_string())
                    .await;
                Ok(Outcome::reply(
                    "✅ Auto-posting socials enabled! Will post every 10 minutes.",
                ))
            }
            "off" | "disable" => {
                self.poster.stop().await;
                Ok(Outcome::reply("❌ Auto-posting socials disabled."))
            }
            _ => Ok(Outcome::reply("❓ Usage: !autopost on/off")),
        }
    }

    async fn autopost_status(self: Arc<Self>, _: Message) -> anyhow::Result<Outcome> {
        Ok(Outcome::reply(format!(
            "📊 Auto-posting status: {}",
            if self.poster.is_enabled() {
                "✅ Enabled (every 10 minutes)"
            } else {
                "❌ Disabled"
            }
        )))
    }

    async fn ai_toggle(self: Arc<Self>, msg: Message) -> anyhow::Result<Outcome> {
        let enabled = self.chef.toggle();
        log::info!(
            "AI chat {} by {}",
            if enabled { "enabled" } else { "disabled" },
            msg.sender_name()
        );

        Ok(Outcome::reply(if enabled {
            "👨🏻‍🍳 Chef AI chat enabled! Chatters can now use !chefbot <question>"
        } else {
            "👨🏻‍🍳 Chef AI chat disabled! The chef is no longer cooking."
        }))
    }

    async fn ai_status(self: Arc<Self>, _: Message) -> anyhow::Result<Outcome> {
        Ok(Outcome::reply(format!(
            "👨🏻‍🍳 Chef AI Status: {} | {}",
            if self.chef.is_enabled() {
                "Enabled"
            } else {
                "Disabled"
            },
            if self.chef.is_configured() {
                "✅ API key configured"
            } else {
                "❌ No API key"
            }
        )))
    }

    async fn admin_help(self: Arc<Self>, msg: Message) -> anyhow::Result<Outcome> {
        let registry = msg.state().get_owned::<Arc<Registry>>().await;
        let mut names = registry
            .commands(Tier::Admin)
            .map(|c| c.token.to_string())
            .collect::<Vec<_>>();
        names.sort();
        Ok(Outcome::reply(format!(
            "🔧 Admin commands: {}",
            names.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::Socials;
    use sous_core::testing::TestBot;
    use tokio::sync::mpsc;

    struct Fixture {
        bot: TestBot,
        poster: Arc<AutoPoster>,
        chef: Arc<Chef>,
        chat_rx: mpsc::Receiver<String>,
        exit_rx: mpsc::Receiver<i32>,
    }

    const TICK: Duration = Duration::from_secs(600);

    async fn fixture() -> Fixture {
        let poster = Arc::new(AutoPoster::with_interval(
            Socials::default().line(),
            TICK,
        ));
        let chef = Arc::new(Chef::new(None, String::from("#kitchen")).unwrap());
        let (shutdown, exit_rx) = Shutdown::new();
        let (chat, chat_rx) = Chat::new(8);

        let mut registry = Registry::default();
        registry
            .register(Admin::bind(
                Arc::clone(&poster),
                Arc::clone(&chef),
                shutdown,
            ))
            .unwrap();

        let state = GlobalState::default();
        state.insert(chat).await;

        let bot = TestBot::new(state, registry, AdminList::from_csv("bob"))
            .await
            .with_sender("bob");

        Fixture {
            bot,
            poster,
            chef,
            chat_rx,
            exit_rx,
        }
    }

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn autopost_on_enables_without_posting_immediately() {
        let mut fx = fixture().await;

        let reply = fx.bot.send("!autopost on").await.unwrap();
        assert_eq!(
            reply,
            "✅ Auto-posting socials enabled! Will post every 10 minutes."
        );
        assert!(fx.poster.is_enabled());

        // nothing hits the channel until a full interval has passed
        settle().await;
        assert!(fx.chat_rx.try_recv().is_err());

        tokio::time::advance(TICK).await;
        settle().await;
        assert!(fx.chat_rx.try_recv().is_ok());
    }

    #[tokio::test]
    async fn autopost_round_trip() {
        let mut fx = fixture().await;

        let status = fx.bot.send("!autopost").await.unwrap();
        assert_eq!(status, "🔧 Auto-posting is currently disabled. Use !autopost on/off");

        fx.bot.send("!autopost on").await.unwrap();
        assert_eq!(
            fx.bot.send("!autopost-status").await.as_deref(),
            Some("📊 Auto-posting status: ✅ Enabled (every 10 minutes)")
        );

        assert_eq!(
            fx.bot.send("!autopost off").await.as_deref(),
            Some("❌ Auto-posting socials disabled.")
        );
        assert!(!fx.poster.is_enabled());

        assert_eq!(
            fx.bot.send("!autopost sideways").await.as_deref(),
            Some("❓ Usage: !autopost on/off")
        );
    }

    #[tokio::test]
    async fn shutdown_sends_a_farewell_then_signals() {
        let mut fx = fixture().await;

        assert_eq!(fx.bot.send("!shutdown").await, None);

        assert_eq!(
            fx.chat_rx.try_recv().unwrap(),
            "PRIVMSG #test_channel :🔧 Bot shutting down by admin @bob...\r\n"
        );
        assert_eq!(fx.exit_rx.try_recv().unwrap(), 0);
    }

    #[tokio::test]
    async fn restart_signals_the_restart_code() {
        let mut fx = fixture().await;

        assert_eq!(fx.bot.send("!restart").await, None);
        assert!(fx
            .chat_rx
            .try_recv()
            .unwrap()
            .contains("Bot restarting by admin @bob"));
        assert_eq!(fx.exit_rx.try_recv().unwrap(), Shutdown::RESTART_CODE);
    }

    #[tokio::test]
    async fn non_admins_never_reach_the_handlers() {
        let mut fx = fixture().await;
        let bot = fx.bot.with_sender("alice").with_moderator();

        assert_eq!(
            bot.send("!shutdown").await.as_deref(),
            Some("❌ @alice, admin privileges required for !shutdown")
        );

        // no farewell, no exit signal
        assert!(fx.chat_rx.try_recv().is_err());
        assert!(fx.exit_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn ai_toggle_flips_the_chef() {
        let fx = fixture().await;
        assert!(fx.chef.is_enabled());

        assert_eq!(
            fx.bot.send("!ai-toggle").await.as_deref(),
            Some("👨🏻‍🍳 Chef AI chat disabled! The chef is no longer cooking.")
        );
        assert!(!fx.chef.is_enabled());

        assert_eq!(
            fx.bot.send("!ai-toggle").await.as_deref(),
            Some("👨🏻‍🍳 Chef AI chat enabled! Chatters can now use !chefbot <question>")
        );
        assert!(fx.chef.is_enabled());
    }

    #[tokio::test]
    async fn ai_status_reports_flag_and_credential() {
        let fx = fixture().await;
        assert_eq!(
            fx.bot.send("!ai-status").await.as_deref(),
            Some("👨🏻‍🍳 Chef AI Status: Enabled | ❌ No API key")
        );
    }

    #[tokio::test]
    async fn adminhelp_lists_the_admin_tier() {
        let fx = fixture().await;
        let reply = fx.bot.send("!adminhelp").await.unwrap();
        assert!(reply.starts_with("🔧 Admin commands: "));
        assert!(reply.contains("!shutdown"));
        assert!(reply.contains("!autopost-status"));
        assert!(!reply.contains("!dice"));
    }
}

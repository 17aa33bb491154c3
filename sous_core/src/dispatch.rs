use std::sync::Arc;

use crate::{
    args::Arguments,
    caller::AdminList,
    command::Registry,
    message::Message,
    outcome::Outcome,
};

/// Turns one inbound message into at most one outbound line.
pub struct Dispatcher {
    registry: Arc<Registry>,
    admins: AdminList,
}

impl Dispatcher {
    pub fn new(registry: Arc<Registry>, admins: AdminList) -> Self {
        Self { registry, admins }
    }

    pub async fn dispatch(&self, mut msg: Message) -> Option<String> {
        // the bot must never answer itself
        if msg.is_self() {
            return None;
        }

        let token = msg.command()?;
        let entry = self.registry.lookup(&token)?;

        let caller = msg.caller();
        let tier = self.admins.classify(&caller);
        if tier < entry.command.tier {
            log::debug!(
                "{} (tier {:?}) tried {token}, needs {:?}",
                caller.name,
                tier,
                entry.command.tier
            );
            return Some(format!(
                "❌ @{}, {} privileges required for {token}",
                caller.name,
                entry.command.tier.noun()
            ));
        }

        msg.set_args(Arguments::parse(msg.data()));

        match (entry.callable)(msg).await {
            Ok(Outcome::None) => None,
            Ok(Outcome::Reply(text)) => {
                log::debug!("{token} executed by {}", caller.name);
                Some(text)
            }
            Ok(Outcome::Directive(text)) => {
                log::info!("{} issued by {}", text, caller.name);
                Some(text)
            }
            Err(err) => {
                log::error!("{token} from {} failed: {err:?}", caller.name);
                Some(format!(
                    "❌ Sorry @{}, something went wrong with that command.",
                    caller.name
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::prelude::*;
    use crate::testing::TestBot;

    #[derive(Default)]
    struct Probe {
        calls: AtomicUsize,
    }

    impl Probe {
        async fn greet(self: Arc<Self>, msg: Message) -> anyhow::Result<Outcome> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Outcome::reply(format!("hello, {}", msg.sender_name())))
        }

        async fn clear(self: Arc<Self>, _: Message) -> anyhow::Result<Outcome> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Outcome::directive("/clear"))
        }

        async fn quit(self: Arc<Self>, _: Message) -> anyhow::Result<Outcome> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Outcome::None)
        }

        async fn broken(self: Arc<Self>, _: Message) -> anyhow::Result<Outcome> {
            anyhow::bail!("kitchen fire")
        }
    }

    async fn make_bot(probe: Arc<Probe>) -> TestBot {
        let mut registry = Registry::default();
        registry
            .register(
                Binding::create_shared(probe)
                    .bind(cmd("!hello"), Probe::greet)
                    .bind(cmd("!broken"), Probe::broken)
                    .bind(cmd("!clear").moderator(), Probe::clear)
                    .bind(cmd("!shutdown").admin(), Probe::quit)
                    .into_entries(),
            )
            .unwrap();

        TestBot::new(
            GlobalState::default(),
            registry,
            AdminList::from_csv("bob"),
        )
        .await
    }

    #[tokio::test]
    async fn everyone_commands_run_for_anyone() {
        let probe = Arc::new(Probe::default());
        let bot = make_bot(Arc::clone(&probe)).await.with_sender("alice");

        assert_eq!(bot.send("!hello").await.as_deref(), Some("hello, alice"));
        assert_eq!(probe.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unknown_commands_are_silent() {
        let probe = Arc::new(Probe::default());
        let bot = make_bot(Arc::clone(&probe)).await;

        assert_eq!(bot.send("!mystery").await, None);
        assert_eq!(bot.send("just chatting").await, None);
        assert_eq!(bot.send("   ").await, None);
        assert_eq!(probe.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn denial_without_invocation() {
        let probe = Arc::new(Probe::default());
        let bot = make_bot(Arc::clone(&probe)).await.with_sender("alice");

        let reply = bot.send("!shutdown").await.unwrap();
        assert_eq!(reply, "❌ @alice, admin privileges required for !shutdown");
        assert_eq!(probe.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn moderator_commands_gate_on_tier() {
        let probe = Arc::new(Probe::default());

        let bot = make_bot(Arc::clone(&probe)).await.with_sender("alice");
        let reply = bot.send("!clear").await.unwrap();
        assert_eq!(reply, "❌ @alice, moderator privileges required for !clear");

        let bot = make_bot(Arc::clone(&probe)).await.with_sender("mia").with_moderator();
        assert_eq!(bot.send("!clear").await.as_deref(), Some("/clear"));

        let bot = make_bot(Arc::clone(&probe)).await.with_sender("cass").with_broadcaster();
        assert_eq!(bot.send("!clear").await.as_deref(), Some("/clear"));

        // admins pass moderator gates too
        let bot = make_bot(Arc::clone(&probe)).await.with_sender("bob");
        assert_eq!(bot.send("!clear").await.as_deref(), Some("/clear"));
        assert_eq!(probe.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn admin_commands_run_for_admins() {
        let probe = Arc::new(Probe::default());
        let bot = make_bot(Arc::clone(&probe)).await.with_sender("BOB");

        // NoReply sends nothing
        assert_eq!(bot.send("!shutdown").await, None);
        assert_eq!(probe.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn own_messages_are_dropped_before_parsing() {
        let probe = Arc::new(Probe::default());
        let bot = make_bot(Arc::clone(&probe)).await.as_self();

        assert_eq!(bot.send("!hello").await, None);
        assert_eq!(probe.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn handler_errors_become_a_generic_reply() {
        let probe = Arc::new(Probe::default());
        let bot = make_bot(Arc::clone(&probe)).await.with_sender("alice");

        let reply = bot.send("!broken").await.unwrap();
        assert_eq!(
            reply,
            "❌ Sorry @alice, something went wrong with that command."
        );

        // and the dispatcher keeps going afterwards
        assert_eq!(bot.send("!hello").await.as_deref(), Some("hello, alice"));
    }

    #[tokio::test]
    async fn command_matching_is_case_insensitive() {
        let probe = Arc::new(Probe::default());
        let bot = make_bot(Arc::clone(&probe)).await.with_sender("alice");

        assert_eq!(bot.send("!HELLO there").await.as_deref(), Some("hello, alice"));
    }
}

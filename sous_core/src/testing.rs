//! Drives the real dispatcher with synthetic messages.

use std::sync::Arc;

use crate::{
    caller::AdminList,
    command::Registry,
    dispatch::Dispatcher,
    message::{Message, MessageType},
    state::GlobalState,
};

struct TestMessage {
    data: String,
    sender: String,
    channel: String,
    moderator: bool,
    broadcaster: bool,
    own: bool,
}

impl MessageType for TestMessage {
    fn data(&self) -> &str {
        &self.data
    }

    fn sender_name(&self) -> &str {
        &self.sender
    }

    fn channel(&self) -> &str {
        &self.channel
    }

    fn is_self(&self) -> bool {
        self.own
    }

    fn is_from_moderator(&self) -> bool {
        self.moderator
    }

    fn is_from_broadcaster(&self) -> bool {
        self.broadcaster
    }
}

pub struct TestBot {
    dispatcher: Dispatcher,
    state: GlobalState,
    sender: String,
    channel: String,
    moderator: bool,
    broadcaster: bool,
    own: bool,
}

impl TestBot {
    /// The registry is also inserted into the state, as `main` does, so
    /// handlers that list commands can find it.
    pub async fn new(state: GlobalState, registry: Registry, admins: AdminList) -> Self {
        let registry = Arc::new(registry);
        state.insert(Arc::clone(&registry)).await;

        Self {
            dispatcher: Dispatcher::new(registry, admins),
            state,
            sender: String::from("test_user"),
            channel: String::from("#test_channel"),
            moderator: false,
            broadcaster: false,
            own: false,
        }
    }

    pub fn with_sender(mut self, sender: &str) -> Self {
        self.sender = sender.to_string();
        self
    }

    pub fn with_moderator(mut self) -> Self {
        self.moderator = true;
        self
    }

    pub fn with_broadcaster(mut self) -> Self {
        self.broadcaster = true;
        self
    }

    pub fn as_self(mut self) -> Self {
        self.own = true;
        self
    }

    pub const fn state(&self) -> &GlobalState {
        &self.state
    }

    /// One message in, at most one line out.
    pub async fn send(&self, data: &str) -> Option<String> {
        let msg = Message::new(
            TestMessage {
                data: data.to_string(),
                sender: self.sender.clone(),
                channel: self.channel.clone(),
                moderator: self.moderator,
                broadcaster: self.broadcaster,
                own: self.own,
            },
            self.state.clone(),
        );
        self.dispatcher.dispatch(msg).await
    }
}

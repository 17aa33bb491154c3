use std::sync::Arc;

use crate::{args::Arguments, caller::Caller, state::GlobalState};

/// What the transport must expose about an inbound chat line.
pub trait MessageType
where
    Self: Send + Sync + 'static,
{
    fn data(&self) -> &str;
    fn sender_name(&self) -> &str;
    fn channel(&self) -> &str;
    fn is_self(&self) -> bool {
        false
    }
    fn is_from_moderator(&self) -> bool {
        false
    }
    fn is_from_broadcaster(&self) -> bool {
        false
    }
}

#[derive(Clone)]
pub struct Message {
    inner: Arc<dyn MessageType>,
    state: GlobalState,
    args: Arguments,
}

impl Message {
    pub fn new(inner: impl MessageType, state: GlobalState) -> Self {
        Self {
            inner: Arc::new(inner),
            state,
            args: Arguments::default(),
        }
    }

    pub fn data(&self) -> &str {
        self.inner.data()
    }

    pub fn sender_name(&self) -> &str {
        self.inner.sender_name()
    }

    pub fn channel(&self) -> &str {
        self.inner.channel()
    }

    pub fn is_self(&self) -> bool {
        self.inner.is_self()
    }

    /// The first token, case-folded. `None` for an all-whitespace line.
    pub fn command(&self) -> Option<String> {
        self.data()
            .split_ascii_whitespace()
            .next()
            .map(str::to_lowercase)
    }

    pub fn caller(&self) -> Caller {
        Caller::new(
            self.sender_name(),
            self.inner.is_from_moderator(),
            self.inner.is_from_broadcaster(),
        )
    }

    /// Set by the dispatcher before the handler runs.
    pub fn args(&self) -> &Arguments {
        &self.args
    }

    pub const fn state(&self) -> &GlobalState {
        &self.state
    }

    pub(crate) fn set_args(&mut self, args: Arguments) {
        self.args = args;
    }
}

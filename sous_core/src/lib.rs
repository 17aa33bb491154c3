use std::{future::Future, pin::Pin};

pub mod args;
pub mod caller;
pub mod command;
pub mod cooldown;
pub mod dispatch;
pub mod message;
pub mod outcome;

mod format;
pub use format::FormatTime;

mod state;

pub mod testing;

type BoxedFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a + Send>>;

pub mod prelude {
    pub use std::sync::Arc;

    pub use crate::args::Arguments;
    pub use crate::caller::{AdminList, Caller, Tier};
    pub use crate::command::{cmd, Binding, Command, Entry, Registry, SharedCallable};
    pub use crate::cooldown::Cooldown;
    pub use crate::dispatch::Dispatcher;
    pub use crate::message::Message;
    pub use crate::outcome::{IntoOutcome, Outcome};
    pub use crate::state::{GlobalState, State};
}

pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

use std::{collections::HashMap, future::Future, sync::Arc};

use crate::{
    caller::Tier,
    message::Message,
    outcome::{IntoOutcome, Outcome},
    BoxedFuture,
};

pub type SharedCallable =
    Arc<dyn Fn(Message) -> BoxedFuture<'static, anyhow::Result<Outcome>> + Send + Sync>;

pub fn cmd(token: &str) -> Command {
    Command::new(token)
}

#[derive(Clone, Debug)]
pub struct Command {
    pub token: Arc<str>,
    pub tier: Tier,
    pub help: Option<Arc<str>>,
}

impl Command {
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_lowercase().into(),
            tier: Tier::Everyone,
            help: None,
        }
    }

    pub fn help(mut self, help: &str) -> Self {
        self.help.get_or_insert_with(|| Arc::from(help));
        self
    }

    pub fn moderator(mut self) -> Self {
        self.tier = Tier::Moderator;
        self
    }

    pub fn admin(mut self) -> Self {
        self.tier = Tier::Admin;
        self
    }
}

pub struct Entry {
    pub command: Command,
    pub callable: SharedCallable,
}

/// Builder that turns `Arc<Self>` methods into registrable command entries.
pub struct Binding<T> {
    this: Arc<T>,
    entries: Vec<Entry>,
}

impl<T> Binding<T>
where
    T: Send + Sync + 'static,
{
    pub fn create(this: T) -> Self {
        Self::create_shared(Arc::new(this))
    }

    /// For callers that want to keep their own handle to `this`.
    pub fn create_shared(this: Arc<T>) -> Self {
        Self {
            this,
            entries: Vec::new(),
        }
    }

    pub fn bind<F, Fut, O>(mut self, command: Command, func: F) -> Self
    where
        F: Fn(Arc<T>, Message) -> Fut + Copy + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<O>> + Send + 'static,
        O: IntoOutcome + 'static,
    {
        let this = Arc::clone(&self.this);
        let callable: SharedCallable = Arc::new(move |msg: Message| {
            let this = Arc::clone(&this);
            Box::pin(async move { func(this, msg).await.map(IntoOutcome::into_outcome) })
        });

        self.entries.push(Entry { command, callable });
        self
    }

    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }
}

/// One table per tier. Lookup walks Admin, then Moderator, then Everyone;
/// the same token cannot be registered twice anywhere.
#[derive(Default)]
pub struct Registry {
    tables: [HashMap<Arc<str>, Entry>; 3],
}

impl Registry {
    pub fn register(&mut self, entries: Vec<Entry>) -> anyhow::Result<()> {
        for entry in entries {
            let token = Arc::clone(&entry.command.token);
            anyhow::ensure!(
                self.lookup(&token).is_none(),
                "{token} is already registered"
            );
            self.tables[entry.command.tier as usize].insert(token, entry);
        }
        Ok(())
    }

    pub fn lookup(&self, token: &str) -> Option<&Entry> {
        Tier::ORDERED
            .iter()
            .find_map(|&tier| self.tables[tier as usize].get(token))
    }

    pub fn commands(&self, tier: Tier) -> impl Iterator<Item = &Command> {
        self.tables[tier as usize].values().map(|e| &e.command)
    }
}

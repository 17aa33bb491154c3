use anyhow::Context;

use std::{
    any::{Any, TypeId},
    collections::HashMap,
    sync::Arc,
};
use tokio::sync::{RwLock, RwLockReadGuard};

/// Shared, type-keyed runtime state.
///
/// Everything long-lived (config, the outbound chat handle, the command
/// registry, toggles) is inserted once during startup and fetched by type.
#[derive(Default, Clone)]
pub struct GlobalState(Arc<RwLock<State>>);

impl GlobalState {
    pub fn new(state: State) -> Self {
        Self(Arc::new(RwLock::new(state)))
    }

    pub async fn get<T>(&self) -> RwLockReadGuard<'_, T>
    where
        T: Any + Send + Sync + 'static,
    {
        RwLockReadGuard::map(self.0.read().await, |state| state.get::<T>().unwrap())
    }

    pub async fn get_owned<T>(&self) -> T
    where
        T: Any + Send + Sync + 'static,
        T: Clone,
    {
        self.get::<T>().await.clone()
    }

    pub async fn try_get_owned<T>(&self) -> Option<T>
    where
        T: Any + Send + Sync + 'static,
        T: Clone,
    {
        let guard = RwLockReadGuard::try_map(self.0.read().await, |state| state.get::<T>().ok());
        guard.ok().map(|g| g.clone())
    }

    pub async fn insert<T>(&self, val: T)
    where
        T: Any + Send + Sync + 'static,
    {
        self.0.write().await.insert(val);
    }
}

#[derive(Default, Debug)]
pub struct State {
    map: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl State {
    pub fn insert<T>(&mut self, val: T)
    where
        T: Any + Send + Sync + 'static,
    {
        if let Some(..) = self.map.insert(TypeId::of::<T>(), Box::new(val)) {
            log::warn!("replaced: {}", std::any::type_name::<T>());
        }
    }

    pub fn get<T>(&self) -> anyhow::Result<&T>
    where
        T: Any + Send + Sync + 'static,
    {
        self.map
            .get(&TypeId::of::<T>())
            .and_then(|c| c.downcast_ref())
            .with_context(|| anyhow::anyhow!("could not find {}", std::any::type_name::<T>()))
    }
}

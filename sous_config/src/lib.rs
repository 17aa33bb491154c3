use anyhow::Context;

mod secret;
pub use secret::Secret;

pub trait LoadFromEnv: Sized {
    fn load_from_env() -> anyhow::Result<Self>;
}

type Assign<T> = fn(&mut T, String);

pub fn load_from_env<T, const N: usize>(keys: [(&str, Assign<T>); N]) -> anyhow::Result<T>
where
    T: Default + std::fmt::Debug,
{
    let get = |key: &str| {
        log::trace!("looking up {key}");
        std::env::var(key).with_context(|| anyhow::anyhow!("key '{key}' was not found"))
    };

    log::trace!("loading env vars for: {}", std::any::type_name::<T>());

    let this = keys.into_iter().try_fold(T::default(), |mut this, (key, func)| {
        func(&mut this, get(key)?);
        anyhow::Ok(this)
    });

    if let Ok(this) = &this {
        log::debug!("created: {:?}", this);
    }
    this
}

// missing or empty keys simply aren't there
pub fn env_opt(key: &str) -> Option<String> {
    log::trace!("looking up {key} (optional)");
    std::env::var(key).ok().filter(|s| !s.trim().is_empty())
}

use std::{sync::Arc, time::Duration};

use sous_config::LoadFromEnv as _;
use sous_core::prelude::*;

mod admin;
mod autopost;
mod builtin;
mod chef;
mod config;
mod moderation;
mod shutdown;

use autopost::AutoPoster;
use chef::Chef;
use shutdown::Shutdown;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    simple_env_load::load_env_from([".dev.env", ".env"]);
    alto_logger::TermLogger::new(
        alto_logger::Options::default()
            .with_time(alto_logger::TimeConfig::relative_now())
            .with_style(alto_logger::StyleConfig::SingleLine),
    )?
    .init()?;

    log::info!("loading configuration");
    let twitch = sous_twitch::config::Config::load_from_env()?;
    let admins = config::admins();
    let socials = config::Socials::load();
    let api_key = config::groq_api_key();

    let channel = twitch.channel();

    let poster = Arc::new(AutoPoster::new(socials.line()));
    let chef = Arc::new(Chef::new(api_key, channel)?);
    let (shutdown, mut exit) = Shutdown::new();

    log::trace!("binding commands");
    let mut registry = Registry::default();
    registry.register(builtin::Builtin::bind(socials))?;
    registry.register(moderation::Moderation::bind())?;
    registry.register(Chef::bind(Arc::clone(&chef)))?;
    registry.register(admin::Admin::bind(
        Arc::clone(&poster),
        Arc::clone(&chef),
        shutdown,
    ))?;
    let registry = Arc::new(registry);

    let mut state = State::default();
    state.insert(twitch);
    state.insert(Arc::clone(&registry));
    let state = GlobalState::new(state);

    let dispatcher = Dispatcher::new(registry, admins);

    log::debug!("starting the twitch bot");
    let mut bot = tokio::task::spawn(sous_twitch::create_bot(state, dispatcher));

    let code = tokio::select! {
        Some(code) = exit.recv() => {
            // give the farewell a moment to reach the wire
            tokio::time::sleep(Duration::from_secs(1)).await;
            code
        }
        res = &mut bot => {
            match res {
                Ok(Ok(())) => 0,
                Ok(Err(err)) => {
                    log::error!("bot stopped: {err:?}");
                    1
                }
                Err(err) => {
                    log::error!("bot task panicked: {err}");
                    1
                }
            }
        }
        _ = tokio::signal::ctrl_c() => {
            log::info!("received ctrl-c, shutting down");
            0
        }
    };

    poster.stop().await;
    std::process::exit(code);
}

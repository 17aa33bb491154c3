use sous_core::prelude::{Dispatcher, GlobalState};

pub mod config;

mod bot;
mod chat;
mod connection;
mod parser;
mod tags;
mod types;

mod message;
pub use chat::Chat;
pub use message::Message;
pub use tags::Tags;
pub use types::{Event, Identity, Privmsg};

pub async fn create_bot(state: GlobalState, dispatcher: Dispatcher) -> anyhow::Result<()> {
    let config: crate::config::Config = state.get_owned().await;

    let reg = types::Registration {
        name: &config.name,
        pass: &*config.password,
    };

    log::info!(
        "connecting to {} (with name {})",
        &config.address,
        &config.name
    );
    let (identity, reader, mut writer) = connection::connect(&config.address, reg).await?;
    log::info!("connected as {}", identity.name);

    let (chat, mut outbound) = Chat::new(64);
    state.insert(chat.clone()).await;
    state.insert(identity).await;

    tokio::spawn(async move {
        while let Some(line) = outbound.recv().await {
            if let Err(err) = writer.write_raw(&line).await {
                log::error!("could not send: {err}");
                break;
            }
        }
    });

    let channel = config.channel();
    let mut bot = bot::Bot::new(reader, state, dispatcher, chat, &config.name);
    log::info!("joining {channel}");
    bot.join(&channel).await?;

    bot.start().await?;
    log::warn!("disconnected");
    Ok(())
}

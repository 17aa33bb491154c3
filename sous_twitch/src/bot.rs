use sous_core::prelude::{Dispatcher, GlobalState, Message};

use super::{
    connection::Reader,
    types::{Event, Privmsg},
    Chat, Message as TwitchMessage,
};

pub struct Bot {
    reader: Reader,
    state: GlobalState,
    dispatcher: Dispatcher,
    chat: Chat,
    login: Box<str>,
}

impl Bot {
    pub fn new(
        reader: Reader,
        state: GlobalState,
        dispatcher: Dispatcher,
        chat: Chat,
        login: &str,
    ) -> Self {
        Self {
            reader,
            state,
            dispatcher,
            chat,
            login: Box::from(login),
        }
    }

    pub async fn join(&mut self, channel: &str) -> anyhow::Result<()> {
        self.chat.raw(format!("JOIN {channel}\r\n")).await;
        Ok(())
    }

    pub async fn start(&mut self) -> anyhow::Result<()> {
        loop {
            match self.reader.read_event(&self.chat).await {
                Ok(Event::Privmsg(pm)) => self.dispatch(pm).await,
                Ok(Event::Join { channel, user }) => {
                    if user.eq_ignore_ascii_case(&self.login) {
                        log::info!("joined {channel}");
                    } else {
                        log::trace!("{user} joined {channel}");
                    }
                }
                Err(err) => {
                    log::warn!("connection lost: {err}");
                    return Ok(());
                }
            }
        }
    }

    async fn dispatch(&mut self, pm: Privmsg) {
        log::debug!("[{}] {}: {}", pm.target, pm.user, pm.data);

        let msg = Message::new(TwitchMessage::from_pm(pm, &self.login), self.state.clone());

        let channel = msg.channel().to_string();
        if let Some(out) = self.dispatcher.dispatch(msg).await {
            self.chat.say(&channel, &out).await;
        }
    }
}

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::{
        tcp::{OwnedReadHalf, OwnedWriteHalf},
        TcpStream,
    },
};

use super::{
    chat::Chat,
    parser,
    types::{Event, Identity, Privmsg, Registration},
};

/// Performs the TCP + IRC handshake, then hands back the two halves: the
/// reader stays with the bot loop, the writer goes to the task draining the
/// outbound queue.
pub async fn connect(
    addr: &str,
    reg: Registration<'_>,
) -> anyhow::Result<(Identity, Reader, Writer)> {
    async fn try_connect(attempts: usize, addr: &str) -> anyhow::Result<TcpStream> {
        let backoff = std::iter::successors(Some(0), |n| Some(n + 3))
            .map(Duration::from_secs)
            .take(attempts);

        use tokio_stream::StreamExt as _;
        let mut stream =
            tokio_stream::iter(backoff).map(|dur| async move { tokio::time::sleep(dur).await });

        while let Some(backoff) = stream.next().await {
            backoff.await;

            match tokio::time::timeout(Duration::from_secs(5), TcpStream::connect(addr)).await {
                Ok(Ok(stream)) => return Ok(stream),
                Ok(Err(err)) => log::warn!("could not connect. trying again: {err}"),
                Err(..) => log::warn!("connection attempt timed out, trying again"),
            }
        }

        anyhow::bail!("could not connect")
    }

    let (read, write) = try_connect(5, addr).await?.into_split();
    let mut reader = Reader {
        stream: BufReader::new(read),
        buf: String::with_capacity(1024),
    };
    let mut writer = Writer { stream: write };

    for cap in [
        "CAP REQ :twitch.tv/membership\r\n",
        "CAP REQ :twitch.tv/tags\r\n",
        "CAP REQ :twitch.tv/commands\r\n",
    ] {
        writer.write_raw(cap).await?;
    }

    let Registration { name, pass } = reg;
    writer.write_raw(&format!("PASS {pass}\r\n")).await?;
    writer.write_raw(&format!("NICK {name}\r\n")).await?;

    let identity = reader.wait_for_ready(name, &mut writer).await?;
    Ok((identity, reader, writer))
}

pub struct Writer {
    stream: OwnedWriteHalf,
}

impl Writer {
    pub async fn write_raw(&mut self, data: &str) -> anyhow::Result<()> {
        log::trace!("-> {}", data.escape_debug());
        self.stream.write_all(data.as_bytes()).await?;
        if !data.ends_with('\n') {
            self.stream.write_all(b"\r\n").await?;
        }
        self.stream.flush().await?;
        Ok(())
    }
}

pub struct Reader {
    stream: BufReader<OwnedReadHalf>,
    buf: String,
}

impl Reader {
    /// Reads until something the bot cares about shows up. PINGs are answered
    /// in here, through the outbound queue.
    pub async fn read_event(&mut self, chat: &Chat) -> anyhow::Result<Event> {
        loop {
            let line = self.read_line().await?;
            let Some((tags, prefix, cmd, args, data)) = parser::parse(line) else {
                log::warn!("skipping malformed line: {}", line.escape_debug());
                continue;
            };

            match cmd {
                "PING" => {
                    let token = data.unwrap_or_default();
                    chat.raw(format!("PONG :{token}\r\n")).await;
                }
                "ERROR" => anyhow::bail!("error: {:?}", data),
                "PRIVMSG" => {
                    let (Some(user), Some(&target), Some(data)) = (prefix, args.first(), data)
                    else {
                        log::warn!("skipping malformed PRIVMSG");
                        continue;
                    };
                    return Ok(Event::Privmsg(Privmsg {
                        tags,
                        user: Arc::from(user),
                        target: Arc::from(target),
                        data: Arc::from(data),
                    }));
                }
                "JOIN" => {
                    let (Some(user), Some(&channel)) = (prefix, args.first()) else {
                        continue;
                    };
                    return Ok(Event::Join {
                        channel: Arc::from(channel),
                        user: Arc::from(user),
                    });
                }
                _ => {}
            }
        }
    }

    async fn wait_for_ready(
        &mut self,
        default_name: &str,
        writer: &mut Writer,
    ) -> anyhow::Result<Identity> {
        loop {
            let line = self.read_line().await?;
            let Some((tags, .., cmd, _, data)) = parser::parse(line) else {
                continue;
            };

            match cmd {
                "PING" => {
                    let token = data.with_context(|| "PING must have a token")?;
                    writer.write_raw(&format!("PONG :{token}\r\n")).await?;
                }
                "GLOBALUSERSTATE" => {
                    let name = tags.get("display-name").unwrap_or(default_name).into();
                    let user_id = tags.get_parsed("user-id")?;
                    return Ok(Identity { name, user_id });
                }
                "ERROR" => anyhow::bail!("{:?}", data),
                _ => {}
            }
        }
    }

    async fn read_line(&mut self) -> anyhow::Result<&str> {
        self.buf.clear();
        let n = self.stream.read_line(&mut self.buf).await?;
        if n == 0 {
            anyhow::bail!("unexpected eof")
        }
        let line = &self.buf[..n];
        log::trace!("<- {}", line.escape_debug());
        Ok(line)
    }
}

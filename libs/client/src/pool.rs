use elb_fabric::codec::BincodeCodec;
use elb_fabric::transport::Transport;
use elb_fabric::Channel;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{Error, Result};

pub const CHANNEL_COUNT: usize = 3;

/// Channel used for every message about `(modid, cmdid)`
pub fn channel_index(modid: i32, cmdid: i32) -> usize {
    (i64::from(modid) + i64::from(cmdid)).rem_euclid(CHANNEL_COUNT as i64) as usize
}

/// Fixed set of channels to the agent, partitioned by service key
pub struct ChannelPool {
    channels: Vec<Channel<BincodeCodec>>,
}

impl ChannelPool {
    /// Open one UDP channel per agent port
    pub async fn connect(config: &ClientConfig) -> Result<Self> {
        let mut channels = Vec::with_capacity(CHANNEL_COUNT);
        for index in 0..CHANNEL_COUNT {
            let remote = config.channel_addr(index);
            let channel = Channel::udp(remote, BincodeCodec)
                .await
                .map_err(|source| Error::Channel {
                    index,
                    remote,
                    source,
                })?;
            channels.push(channel);
        }
        Ok(Self { channels })
    }

    /// Build a pool over caller-supplied transports, in channel order
    pub fn from_transports(transports: [Box<dyn Transport>; CHANNEL_COUNT]) -> Self {
        let channels = transports
            .into_iter()
            .map(|transport| Channel::from_boxed(transport, BincodeCodec))
            .collect();
        Self { channels }
    }

    pub fn select(&mut self, modid: i32, cmdid: i32) -> &mut Channel<BincodeCodec> {
        let index = channel_index(modid, cmdid);
        debug!(modid, cmdid, index, "channel selected");
        &mut self.channels[index]
    }

    /// Close every channel, returning the first failure
    pub async fn close(self) -> elb_fabric::Result<()> {
        let mut first_err = None;
        for channel in self.channels {
            if let Err(e) = channel.close().await {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}

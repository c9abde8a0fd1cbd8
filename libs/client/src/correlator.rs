//! Request/response correlation over an unreliable datagram channel
//!
//! One exchange sends a single [`GetHostReq`] and waits for the
//! [`GetHostRsp`] carrying the same sequence number. Responses with a lower
//! sequence number are leftovers from earlier exchanges that timed out and
//! are discarded. All receives share one deadline fixed at send time.

use std::net::SocketAddrV4;
use std::time::Duration;

use elb_core::{GetHostReq, GetHostRsp, MessageId};
use elb_fabric::codec::BincodeCodec;
use elb_fabric::{Channel, Error as FabricError};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::error::LookupError;

pub const MIN_TIMEOUT_MS: u64 = 10;
pub const MAX_TIMEOUT_MS: u64 = 1000;

/// Sequence numbers live in `[0, 2^31)`
pub const SEQ_MODULUS: u32 = 1 << 31;

pub fn clamp_timeout(timeout_ms: u64) -> Duration {
    Duration::from_millis(timeout_ms.clamp(MIN_TIMEOUT_MS, MAX_TIMEOUT_MS))
}

/// Per-client request sequence, wrapping from `2^31 - 1` to 0
#[derive(Debug, Default)]
pub struct SequenceCounter {
    next: u32,
}

impl SequenceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(seq: u32) -> Self {
        Self {
            next: seq % SEQ_MODULUS,
        }
    }

    /// The number the next request will carry
    pub fn peek(&self) -> u32 {
        self.next
    }

    pub fn next(&mut self) -> u32 {
        let seq = self.next;
        self.next = (seq + 1) % SEQ_MODULUS;
        seq
    }
}

enum ExchangeState {
    AwaitingSend,
    AwaitingResponse { deadline: Instant },
    Resolved(Result<SocketAddrV4, LookupError>),
}

struct Exchange<'a> {
    channel: &'a mut Channel<BincodeCodec>,
    request: GetHostReq,
    timeout: Duration,
    stale: u32,
}

/// Run one request/response exchange on `channel`
pub async fn execute(
    channel: &mut Channel<BincodeCodec>,
    request: GetHostReq,
    timeout: Duration,
) -> Result<SocketAddrV4, LookupError> {
    Exchange {
        channel,
        request,
        timeout,
        stale: 0,
    }
    .run()
    .await
}

impl Exchange<'_> {
    async fn run(mut self) -> Result<SocketAddrV4, LookupError> {
        let mut state = ExchangeState::AwaitingSend;
        loop {
            state = match state {
                ExchangeState::AwaitingSend => self.send().await,
                ExchangeState::AwaitingResponse { deadline } => {
                    self.await_response(deadline).await
                }
                ExchangeState::Resolved(outcome) => return outcome,
            };
        }
    }

    async fn send(&mut self) -> ExchangeState {
        match self
            .channel
            .send(MessageId::GetHostReq, &self.request)
            .await
        {
            Ok(()) => ExchangeState::AwaitingResponse {
                deadline: Instant::now() + self.timeout,
            },
            Err(e) => {
                warn!(seq = self.request.seq, error = %e, "host request send failed");
                ExchangeState::Resolved(Err(LookupError::SendFailed(e)))
            }
        }
    }

    async fn await_response(&mut self, deadline: Instant) -> ExchangeState {
        let expected = self.request.seq;
        let received = tokio::time::timeout_at(
            deadline,
            self.channel.receive::<GetHostRsp>(MessageId::GetHostRsp),
        )
        .await;

        let rsp = match received {
            Ok(Ok(rsp)) => rsp,
            Ok(Err(e @ (FabricError::Frame(_) | FabricError::Codec(_)))) => {
                warn!(seq = expected, error = %e, "malformed response");
                return ExchangeState::Resolved(Err(LookupError::Framing(e)));
            }
            Ok(Err(e)) => return ExchangeState::Resolved(Err(LookupError::ReceiveFailed(e))),
            Err(_) => {
                debug!(seq = expected, stale = self.stale, "host request timed out");
                return ExchangeState::Resolved(Err(LookupError::TimedOut {
                    after: self.timeout,
                }));
            }
        };

        if rsp.seq < expected {
            self.stale += 1;
            debug!(seq = expected, stale_seq = rsp.seq, "stale response discarded");
            return ExchangeState::AwaitingResponse { deadline };
        }

        if rsp.seq != expected {
            warn!(seq = expected, response_seq = rsp.seq, "sequence mismatch");
            return ExchangeState::Resolved(Err(LookupError::SequenceMismatch {
                expected,
                actual: rsp.seq,
            }));
        }

        if rsp.retcode != 0 {
            return ExchangeState::Resolved(Err(LookupError::AgentError { code: rsp.retcode }));
        }

        ExchangeState::Resolved(Ok(rsp.host.socket_addr()))
    }
}

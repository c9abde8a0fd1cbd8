use std::net::{Ipv4Addr, SocketAddrV4};
use std::time::Duration;

use elb_core::{CacheBatchRptReq, GetHostReq, HostAddr, HostBatchCallRes, ReportReq};
use tracing::info;

use crate::config::ClientConfig;
use crate::correlator::{self, clamp_timeout, SequenceCounter};
use crate::error::{LookupError, Result};
use crate::liveness::{LivenessGate, MappedHeartbeat};
use crate::pool::ChannelPool;
use crate::report;

/// Client for the local load-balancing agent
///
/// Every operation takes `&mut self`; an instance serves one caller at a
/// time. Create one client per task for concurrent use.
pub struct ElbClient {
    gate: LivenessGate,
    pool: ChannelPool,
    seq: SequenceCounter,
}

impl ElbClient {
    /// Map the heartbeat file and open the agent channels
    pub async fn connect(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let heartbeat = MappedHeartbeat::open(&config.heartbeat_path)?;
        let gate = LivenessGate::new(heartbeat, config.heartbeat_threshold_secs);
        let pool = ChannelPool::connect(config).await?;

        info!(
            "ELB client ready: agent {}:{}, heartbeat {}",
            config.agent_host,
            config.base_port,
            config.heartbeat_path.display()
        );
        Ok(Self::from_parts(gate, pool))
    }

    pub fn from_parts(gate: LivenessGate, pool: ChannelPool) -> Self {
        Self {
            gate,
            pool,
            seq: SequenceCounter::new(),
        }
    }

    /// Start numbering requests at `seq` instead of 0
    pub fn with_sequence_start(mut self, seq: u32) -> Self {
        self.seq = SequenceCounter::starting_at(seq);
        self
    }

    /// Sequence number the next lookup will use
    pub fn next_sequence(&self) -> u32 {
        self.seq.peek()
    }

    pub fn is_agent_alive(&self) -> bool {
        self.gate.is_agent_alive()
    }

    /// Ask the agent for a host serving `(modid, cmdid)`
    ///
    /// `timeout_ms` is clamped to `[10, 1000]`. Nothing is sent while the
    /// agent heartbeat is stale.
    pub async fn get_host(
        &mut self,
        modid: i32,
        cmdid: i32,
        timeout_ms: u64,
    ) -> std::result::Result<SocketAddrV4, LookupError> {
        let timeout = clamp_timeout(timeout_ms);
        self.gate.check()?;

        let request = GetHostReq {
            seq: self.seq.next(),
            modid,
            cmdid,
        };
        let channel = self.pool.select(modid, cmdid);
        correlator::execute(channel, request, timeout).await
    }

    /// Report the outcome of a call made against `ip:port`
    pub async fn report_result(
        &mut self,
        modid: i32,
        cmdid: i32,
        ip: Ipv4Addr,
        port: u16,
        retcode: i32,
    ) -> elb_fabric::Result<()> {
        self.send_report(modid, cmdid, ip, port, retcode, None).await
    }

    /// Report a failed call together with the time it took
    pub async fn report_result_with_cost(
        &mut self,
        modid: i32,
        cmdid: i32,
        ip: Ipv4Addr,
        port: u16,
        retcode: i32,
        cost: Duration,
    ) -> elb_fabric::Result<()> {
        let tcost = u32::try_from(cost.as_millis()).unwrap_or(u32::MAX);
        self.send_report(modid, cmdid, ip, port, retcode, Some(tcost))
            .await
    }

    /// Report accumulated success counts for several hosts at once
    pub async fn report_batch(
        &mut self,
        modid: i32,
        cmdid: i32,
        results: &[HostBatchCallRes],
    ) -> elb_fabric::Result<()> {
        if results.is_empty() {
            return Ok(());
        }
        let batch = CacheBatchRptReq {
            modid,
            cmdid,
            results: results.to_vec(),
        };
        report::send_batch(self.pool.select(modid, cmdid), &batch).await
    }

    /// Close every agent channel and release the heartbeat mapping
    pub async fn close(self) -> elb_fabric::Result<()> {
        self.pool.close().await
    }

    async fn send_report(
        &mut self,
        modid: i32,
        cmdid: i32,
        ip: Ipv4Addr,
        port: u16,
        retcode: i32,
        tcost: Option<u32>,
    ) -> elb_fabric::Result<()> {
        let report = ReportReq {
            modid,
            cmdid,
            retcode,
            host: HostAddr::new(ip, port),
            tcost,
        };
        report::send_report(self.pool.select(modid, cmdid), &report).await
    }
}

//! Fire-and-forget result reports
//!
//! Reports are sent once and never answered. Only a local send failure is
//! visible to the caller.

use elb_core::{CacheBatchRptReq, MessageId, ReportReq};
use elb_fabric::codec::BincodeCodec;
use elb_fabric::{Channel, Result};
use tracing::trace;

pub async fn send_report(channel: &mut Channel<BincodeCodec>, report: &ReportReq) -> Result<()> {
    trace!(
        modid = report.modid,
        cmdid = report.cmdid,
        retcode = report.retcode,
        host = %report.host,
        "sending report"
    );
    channel.send(MessageId::ReportReq, report).await
}

pub async fn send_batch(
    channel: &mut Channel<BincodeCodec>,
    batch: &CacheBatchRptReq,
) -> Result<()> {
    trace!(
        modid = batch.modid,
        cmdid = batch.cmdid,
        hosts = batch.results.len(),
        "sending batch report"
    );
    channel.send(MessageId::CacheBatchRptReq, batch).await
}

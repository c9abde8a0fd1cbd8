//! Datagram framing
//!
//! ```text
//! [0:4)  i32  message id
//! [4:8)  i32  body length
//! [8..)       body
//! ```
//!
//! Both header fields use host native byte order; client and agent always
//! share a host.

use bytes::{Buf, BufMut, BytesMut};
use elb_core::MessageId;

use crate::error::FrameError;

pub const HEADER_LEN: usize = 8;

/// Largest UDP payload over IPv4
pub const MAX_DATAGRAM_LEN: usize = 65_507;

pub const MAX_BODY_LEN: usize = MAX_DATAGRAM_LEN - HEADER_LEN;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub tag: i32,
    pub body_len: i32,
}

impl FrameHeader {
    /// Read the header at the start of a datagram without validating it
    pub fn parse(datagram: &[u8]) -> Result<Self, FrameError> {
        if datagram.len() < HEADER_LEN {
            return Err(FrameError::Truncated {
                len: datagram.len(),
            });
        }
        let mut buf = &datagram[..HEADER_LEN];
        Ok(Self {
            tag: buf.get_i32_ne(),
            body_len: buf.get_i32_ne(),
        })
    }
}

/// Prefix `body` with a header for `id`
pub fn encode(id: MessageId, body: &[u8]) -> Result<Vec<u8>, FrameError> {
    if body.len() > MAX_BODY_LEN {
        return Err(FrameError::BodyTooLarge { len: body.len() });
    }

    let mut buf = BytesMut::with_capacity(HEADER_LEN + body.len());
    buf.put_i32_ne(id.as_i32());
    buf.put_i32_ne(body.len() as i32);
    buf.put_slice(body);
    Ok(buf.to_vec())
}

/// Validate a datagram against the expected message id and return its body
pub fn decode(expected: MessageId, datagram: &[u8]) -> Result<&[u8], FrameError> {
    let header = FrameHeader::parse(datagram)?;

    let actual =
        MessageId::try_from(header.tag).map_err(|_| FrameError::UnknownTag(header.tag))?;
    if actual != expected {
        return Err(FrameError::UnexpectedTag { expected, actual });
    }

    let body = &datagram[HEADER_LEN..];
    if usize::try_from(header.body_len).ok() != Some(body.len()) {
        return Err(FrameError::LengthMismatch {
            declared: header.body_len,
            actual: body.len(),
        });
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_recovers_body_length_of_encoded_request() {
        let body = [7u8; 13];
        let frame = encode(MessageId::GetHostReq, &body).unwrap();

        let header = FrameHeader::parse(&frame).unwrap();
        assert_eq!(header.tag, MessageId::GetHostReq.as_i32());
        assert_eq!(header.body_len, 13);
        assert_eq!(frame.len(), HEADER_LEN + 13);
    }

    #[test]
    fn header_uses_native_byte_order() {
        let frame = encode(MessageId::ReportReq, b"abc").unwrap();
        assert_eq!(&frame[..4], &3i32.to_ne_bytes());
        assert_eq!(&frame[4..8], &3i32.to_ne_bytes());
    }

    #[test]
    fn decode_returns_body() {
        let frame = encode(MessageId::GetHostRsp, b"payload").unwrap();
        assert_eq!(decode(MessageId::GetHostRsp, &frame).unwrap(), b"payload");
    }

    #[test]
    fn decode_accepts_empty_body() {
        let frame = encode(MessageId::GetHostRsp, &[]).unwrap();
        assert!(decode(MessageId::GetHostRsp, &frame).unwrap().is_empty());
    }

    #[test]
    fn decode_rejects_short_datagram() {
        assert_eq!(
            decode(MessageId::GetHostRsp, &[1, 0, 0]),
            Err(FrameError::Truncated { len: 3 })
        );
    }

    #[test]
    fn decode_rejects_wrong_message_id() {
        let frame = encode(MessageId::GetHostReq, b"x").unwrap();
        assert_eq!(
            decode(MessageId::GetHostRsp, &frame),
            Err(FrameError::UnexpectedTag {
                expected: MessageId::GetHostRsp,
                actual: MessageId::GetHostReq,
            })
        );
    }

    #[test]
    fn decode_rejects_unknown_message_id() {
        let mut frame = Vec::new();
        frame.extend_from_slice(&42i32.to_ne_bytes());
        frame.extend_from_slice(&0i32.to_ne_bytes());
        assert_eq!(
            decode(MessageId::GetHostRsp, &frame),
            Err(FrameError::UnknownTag(42))
        );
    }

    #[test]
    fn decode_rejects_length_mismatch() {
        let mut frame = encode(MessageId::GetHostRsp, b"four").unwrap();
        frame.push(0);
        assert_eq!(
            decode(MessageId::GetHostRsp, &frame),
            Err(FrameError::LengthMismatch {
                declared: 4,
                actual: 5
            })
        );
    }

    #[test]
    fn decode_rejects_negative_length() {
        let mut frame = Vec::new();
        frame.extend_from_slice(&MessageId::GetHostRsp.as_i32().to_ne_bytes());
        frame.extend_from_slice(&(-1i32).to_ne_bytes());
        assert!(matches!(
            decode(MessageId::GetHostRsp, &frame),
            Err(FrameError::LengthMismatch { declared: -1, .. })
        ));
    }

    #[test]
    fn encode_rejects_oversized_body() {
        let body = vec![0u8; MAX_BODY_LEN + 1];
        assert_eq!(
            encode(MessageId::ReportReq, &body),
            Err(FrameError::BodyTooLarge {
                len: MAX_BODY_LEN + 1
            })
        );
    }
}

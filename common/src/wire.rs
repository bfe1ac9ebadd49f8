//! Binary session protocol shared between the detector and its peer.
//!
//! Every message starts with a single header byte:
//!
//!   EXIT              0x95  terminate the session, no payload
//!   PROCESS_FRAME     0x96  followed by a frame payload; detector replies
//!   COORDINATE_RESULT 0x97  reply tag only, never sent by the peer
//!   BASE_FRAME        0x98  followed by a frame payload; replaces the base
//!
//! Frame payload: `[u32 BE length][length bytes of encoded image data]`.
//!
//! Reply to PROCESS_FRAME, exactly 9 bytes:
//!   [0]     tag = 0x97
//!   [1..5]  x (i32 big-endian)
//!   [5..9]  y (i32 big-endian)
//!
//! All multi-byte integers are big-endian.

pub const EXIT: u8 = 0x95;
pub const PROCESS_FRAME: u8 = 0x96;
pub const COORDINATE_RESULT: u8 = 0x97;
pub const BASE_FRAME: u8 = 0x98;

/// Fixed size of a PROCESS_FRAME reply.
pub const REPLY_LEN: usize = 9;

/// Reported pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };
}

/// Encode a coordinate reply.
pub fn encode_reply(point: Point) -> [u8; REPLY_LEN] {
    let mut buf = [0u8; REPLY_LEN];
    buf[0] = COORDINATE_RESULT;
    buf[1..5].copy_from_slice(&point.x.to_be_bytes());
    buf[5..9].copy_from_slice(&point.y.to_be_bytes());
    buf
}

/// Decode a coordinate reply. Used by peers and tests; the detector itself
/// only encodes.
pub fn decode_reply(data: &[u8]) -> Result<Point, WireError> {
    if data.len() != REPLY_LEN {
        return Err(WireError::ReplyLength(data.len()));
    }
    if data[0] != COORDINATE_RESULT {
        return Err(WireError::ReplyTag(data[0]));
    }
    let x = i32::from_be_bytes(data[1..5].try_into().unwrap());
    let y = i32::from_be_bytes(data[5..9].try_into().unwrap());
    Ok(Point { x, y })
}

#[derive(Debug, thiserror::Error)]
pub enum WireError {
    #[error("reply must be {REPLY_LEN} bytes, got {0}")]
    ReplyLength(usize),
    #[error("unexpected reply tag {0:#04x}")]
    ReplyTag(u8),
}

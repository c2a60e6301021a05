//! Wire framing
//!
//! Each message is a u32 little-endian payload length followed by a
//! JSON payload. A length cap guards against reading garbage as a
//! frame header.

use std::io::{Read, Write};

use types::errors::TransportError;

/// Upper bound on a single frame payload. Status responses carry two
/// full price-history rings and a book snapshot; 16 MiB is far above
/// any legitimate message.
pub const MAX_FRAME_LEN: usize = 16 * 1024 * 1024;

/// Write one framed payload.
pub fn write_frame<W: Write>(writer: &mut W, payload: &[u8]) -> Result<(), TransportError> {
    let len = payload.len() as u32;
    writer.write_all(&len.to_le_bytes())?;
    writer.write_all(payload)?;
    writer.flush()?;
    Ok(())
}

/// Blocking read of one framed payload.
pub fn read_frame<R: Read>(reader: &mut R) -> Result<Vec<u8>, TransportError> {
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf)?;
    let len = u32::from_le_bytes(len_buf) as usize;
    if len > MAX_FRAME_LEN {
        return Err(TransportError::MalformedFrame(format!(
            "implausible frame length {len}"
        )));
    }
    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload)?;
    Ok(payload)
}

/// Try to split one complete frame off the front of `buf`.
///
/// Returns the payload and removes the consumed bytes; `None` if the
/// buffer does not yet hold a full frame.
pub fn take_frame(buf: &mut Vec<u8>) -> Result<Option<Vec<u8>>, TransportError> {
    if buf.len() < 4 {
        return Ok(None);
    }
    let len = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]) as usize;
    if len > MAX_FRAME_LEN {
        return Err(TransportError::MalformedFrame(format!(
            "implausible frame length {len}"
        )));
    }
    if buf.len() < 4 + len {
        return Ok(None);
    }
    let payload = buf[4..4 + len].to_vec();
    buf.drain(..4 + len);
    Ok(Some(payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_roundtrip() {
        let mut wire = Vec::new();
        write_frame(&mut wire, b"{\"x\":1}").unwrap();

        let mut cursor = std::io::Cursor::new(wire);
        let payload = read_frame(&mut cursor).unwrap();
        assert_eq!(payload, b"{\"x\":1}");
    }

    #[test]
    fn test_take_frame_partial_then_complete() {
        let mut wire = Vec::new();
        write_frame(&mut wire, b"hello").unwrap();

        let mut buf: Vec<u8> = wire[..3].to_vec();
        assert!(take_frame(&mut buf).unwrap().is_none());

        buf.extend_from_slice(&wire[3..]);
        let payload = take_frame(&mut buf).unwrap().unwrap();
        assert_eq!(payload, b"hello");
        assert!(buf.is_empty());
    }

    #[test]
    fn test_take_frame_two_messages() {
        let mut buf = Vec::new();
        write_frame(&mut buf, b"one").unwrap();
        write_frame(&mut buf, b"two").unwrap();

        assert_eq!(take_frame(&mut buf).unwrap().unwrap(), b"one");
        assert_eq!(take_frame(&mut buf).unwrap().unwrap(), b"two");
        assert!(take_frame(&mut buf).unwrap().is_none());
    }

    #[test]
    fn test_implausible_length_rejected() {
        let mut buf = (u32::MAX).to_le_bytes().to_vec();
        buf.extend_from_slice(b"junk");
        assert!(take_frame(&mut buf).is_err());
    }
}

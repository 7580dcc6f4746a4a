/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! FIX message encoder.
//!
//! Builds wire frames in tag=value format. The encoder owns the framing
//! invariants: BeginString first, BodyLength second, MsgType third, CheckSum
//! last. Body field order is emitted exactly as provided, so ordering within
//! repeating group blocks survives.

use crate::checksum::{checksum, render_checksum};
use bytes::{BufMut, BytesMut};
use ferrofix_core::field::Field;
use ferrofix_core::message::Message;
use ferrofix_core::tags;
use ferrofix_core::types::FixVersion;

/// SOH field delimiter.
const SOH: u8 = 0x01;

/// Incremental FIX message encoder.
///
/// Fields are appended to a body buffer; [`Encoder::finish`] prepends the
/// `8=`/`9=` header and appends the `10=` trailer.
#[derive(Debug)]
pub struct Encoder {
    body: BytesMut,
    version: FixVersion,
}

impl Encoder {
    /// Creates an encoder for the given FIX version.
    #[must_use]
    pub fn new(version: FixVersion) -> Self {
        Self::with_capacity(version, 256)
    }

    /// Creates an encoder with a pre-allocated body buffer.
    #[must_use]
    pub fn with_capacity(version: FixVersion, capacity: usize) -> Self {
        Self {
            body: BytesMut::with_capacity(capacity),
            version,
        }
    }

    /// Appends a typed field.
    #[inline]
    pub fn put_field(&mut self, field: &Field) {
        let _ = field.encode(&mut self.body);
    }

    /// Appends a field with raw value bytes.
    #[inline]
    pub fn put_raw(&mut self, tag: u32, value: &[u8]) {
        let mut tag_buf = itoa::Buffer::new();
        self.body.put_slice(tag_buf.format(tag).as_bytes());
        self.body.put_u8(b'=');
        self.body.put_slice(value);
        self.body.put_u8(SOH);
    }

    /// Appends a field with a string value.
    #[inline]
    pub fn put_str(&mut self, tag: u32, value: &str) {
        self.put_raw(tag, value.as_bytes());
    }

    /// Appends a field with an unsigned integer value.
    #[inline]
    pub fn put_uint(&mut self, tag: u32, value: u64) {
        let mut buf = itoa::Buffer::new();
        self.put_raw(tag, buf.format(value).as_bytes());
    }

    /// Appends a field with a boolean (`Y`/`N`) value.
    #[inline]
    pub fn put_bool(&mut self, tag: u32, value: bool) {
        self.put_raw(tag, if value { b"Y" } else { b"N" });
    }

    /// Returns the current body length in bytes.
    #[inline]
    #[must_use]
    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    /// Clears the body buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.body.clear();
    }

    /// Finalizes the frame: prepends `8=`/`9=`, appends `10=`.
    #[must_use]
    pub fn finish(self) -> BytesMut {
        let begin_string = self.version.begin_string();
        let mut len_buf = itoa::Buffer::new();
        let len_str = len_buf.format(self.body.len());

        let mut frame =
            BytesMut::with_capacity(begin_string.len() + len_str.len() + self.body.len() + 16);
        frame.put_slice(b"8=");
        frame.put_slice(begin_string.as_bytes());
        frame.put_u8(SOH);
        frame.put_slice(b"9=");
        frame.put_slice(len_str.as_bytes());
        frame.put_u8(SOH);
        frame.put_slice(&self.body);

        let cks = checksum(&frame);
        frame.put_slice(b"10=");
        frame.put_slice(&render_checksum(cks));
        frame.put_u8(SOH);
        frame
    }
}

/// Encodes a complete message into a wire frame.
///
/// The MsgType is emitted first in the body, then the body fields in the
/// order the message holds them.
#[must_use]
pub fn encode_message(message: &Message, version: FixVersion) -> BytesMut {
    let mut encoder = Encoder::new(version);
    encoder.put_str(tags::MSG_TYPE, message.msg_type().as_str());
    for field in message.fields() {
        encoder.put_field(field);
    }
    encoder.finish()
}

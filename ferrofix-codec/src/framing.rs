/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Stream framing for FIX over a byte transport.
//!
//! [`FrameCodec`] is a `tokio_util` codec that delimits complete wire frames
//! using the BodyLength arithmetic: a frame spans from `8=` through the
//! `10=ccc<SOH>` trailer. It performs no field decoding and no checksum
//! validation; the message decoder owns those.

use bytes::{BufMut, BytesMut};
use memchr::memchr;
use thiserror::Error;
use tokio_util::codec::{Decoder, Encoder};

/// SOH field delimiter.
const SOH: u8 = 0x01;

/// Length of the `10=ccc<SOH>` trailer.
const TRAILER_LEN: usize = 7;

/// Fewer bytes than this cannot hold a complete frame header.
const MIN_FRAME_LEN: usize = 20;

/// Errors that occur while delimiting frames on the stream.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// Stream does not start with `8=`.
    #[error("invalid begin string: frame must start with 8=")]
    InvalidBeginString,

    /// BodyLength field (tag 9) is not where the protocol puts it.
    #[error("missing body length field (tag 9)")]
    MissingBodyLength,

    /// BodyLength value is not an integer.
    #[error("invalid body length value")]
    InvalidBodyLength,

    /// Frame exceeds the maximum allowed size.
    #[error("frame too large: {size} bytes exceeds maximum {max_size}")]
    FrameTooLarge {
        /// Computed frame size.
        size: usize,
        /// Maximum allowed size.
        max_size: usize,
    },

    /// I/O error from the underlying stream.
    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for FrameError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Frame delimiter codec for FIX byte streams.
#[derive(Debug, Clone)]
pub struct FrameCodec {
    max_frame_size: usize,
}

impl FrameCodec {
    /// Creates a codec with the default 1 MiB frame limit.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_frame_size: 1024 * 1024,
        }
    }

    /// Sets the maximum frame size.
    #[must_use]
    pub const fn with_max_frame_size(mut self, size: usize) -> Self {
        self.max_frame_size = size;
        self
    }
}

impl Default for FrameCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for FrameCodec {
    type Item = BytesMut;
    type Error = FrameError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.len() < MIN_FRAME_LEN {
            return Ok(None);
        }
        if &src[0..2] != b"8=" {
            return Err(FrameError::InvalidBeginString);
        }

        let Some(first_soh) = memchr(SOH, src) else {
            return Ok(None);
        };

        let len_start = first_soh + 1;
        if src.len() < len_start + 3 {
            return Ok(None);
        }
        if &src[len_start..len_start + 2] != b"9=" {
            return Err(FrameError::MissingBodyLength);
        }
        let Some(len_soh) = memchr(SOH, &src[len_start..]) else {
            return Ok(None);
        };
        let len_soh = len_start + len_soh;

        let len_text = std::str::from_utf8(&src[len_start + 2..len_soh])
            .map_err(|_| FrameError::InvalidBodyLength)?;
        let body_length: usize = len_text.parse().map_err(|_| FrameError::InvalidBodyLength)?;

        let total = len_soh + 1 + body_length + TRAILER_LEN;
        if total > self.max_frame_size {
            return Err(FrameError::FrameTooLarge {
                size: total,
                max_size: self.max_frame_size,
            });
        }
        if src.len() < total {
            src.reserve(total - src.len());
            return Ok(None);
        }

        Ok(Some(src.split_to(total)))
    }
}

impl Encoder<&[u8]> for FrameCodec {
    type Error = FrameError;

    fn encode(&mut self, item: &[u8], dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.reserve(item.len());
        dst.put_slice(item);
        Ok(())
    }
}

impl Encoder<BytesMut> for FrameCodec {
    type Error = FrameError;

    fn encode(&mut self, item: BytesMut, dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.reserve(item.len());
        dst.put_slice(&item);
        Ok(())
    }
}

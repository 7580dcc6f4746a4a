/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # FerroFix Codec
//!
//! Tag-value wire codec for the FerroFix FIX protocol engine.
//!
//! This crate provides:
//! - **Checksum**: mod-256 byte sum, three-digit rendering and parsing
//! - **Decoder**: byte frames into typed [`ferrofix_core::Message`]s via the
//!   field registry, with group validation
//! - **Encoder**: messages into wire frames with correct
//!   BeginString/BodyLength/CheckSum framing
//! - **Framing**: a `tokio_util` codec that delimits complete frames on a
//!   byte stream
//!
//! The codec is pure: it holds no session state and is freely callable from
//! any context.

pub mod checksum;
pub mod decoder;
pub mod encoder;
pub mod framing;

pub use checksum::{checksum, parse_checksum, render_checksum};
pub use decoder::decode_message;
pub use encoder::{Encoder, encode_message};
pub use framing::{FrameCodec, FrameError};

/// SOH field delimiter.
pub const SOH: u8 = 0x01;

//! # OSC Adapter
//!
//! Implements the [`ControlSink`] port as OSC 1.0 messages over UDP. It
//! wraps a `std::net::UdpSocket` for synchronous fire-and-forget sends.
//!
//! # Wire Protocol
//!
//! An OSC message is three 4-byte-aligned chunks:
//! - Address pattern: null-terminated string, zero-padded to a multiple of 4
//! - Type tag string: `,` followed by one tag per argument (`i` = int32,
//!   `f` = float32, `s` = string), null-terminated and padded
//! - Arguments in order: int32/float32 big-endian, strings padded as above

use crate::domain::{NoteEvent, SonifierError, TxDisplay};
use crate::ports::ControlSink;
use std::net::UdpSocket;
use std::sync::Arc;

/// Address pattern for musical parameters.
pub const NOTE_ADDRESS: &str = "/eth/note";

/// Address pattern for auxiliary display data.
pub const TX_INFO_ADDRESS: &str = "/eth/tx_info";

/// One OSC argument.
#[derive(Clone, Debug, PartialEq)]
pub enum OscArg {
    /// 32-bit big-endian integer (`i`).
    Int(i32),
    /// 32-bit big-endian float (`f`).
    Float(f32),
    /// Null-terminated padded string (`s`).
    Str(String),
}

/// Append a null-terminated string, zero-padded to 4-byte alignment.
fn push_padded_str(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(s.as_bytes());
    buf.push(0);
    while buf.len() % 4 != 0 {
        buf.push(0);
    }
}

/// Encode one OSC message.
pub fn encode_message(address: &str, args: &[OscArg]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(64);

    push_padded_str(&mut buf, address);

    let mut tags = String::with_capacity(args.len() + 1);
    tags.push(',');
    for arg in args {
        tags.push(match arg {
            OscArg::Int(_) => 'i',
            OscArg::Float(_) => 'f',
            OscArg::Str(_) => 's',
        });
    }
    push_padded_str(&mut buf, &tags);

    for arg in args {
        match arg {
            OscArg::Int(n) => buf.extend_from_slice(&n.to_be_bytes()),
            OscArg::Float(x) => buf.extend_from_slice(&x.to_be_bytes()),
            OscArg::Str(s) => push_padded_str(&mut buf, s),
        }
    }

    buf
}

/// UDP control sink speaking OSC to the sound process.
pub struct OscSink {
    socket: Arc<UdpSocket>,
}

impl OscSink {
    /// Bind an ephemeral local port and connect to the destination.
    pub fn connect(host: &str, port: u16) -> Result<Self, SonifierError> {
        let socket =
            UdpSocket::bind(("0.0.0.0", 0)).map_err(|e| SonifierError::Send(e.to_string()))?;
        socket
            .connect((host, port))
            .map_err(|e| SonifierError::Send(e.to_string()))?;

        Ok(Self {
            socket: Arc::new(socket),
        })
    }

    fn send(&self, address: &str, args: &[OscArg]) -> Result<(), SonifierError> {
        let packet = encode_message(address, args);
        self.socket
            .send(&packet)
            .map_err(|e| SonifierError::Send(e.to_string()))?;
        Ok(())
    }
}

impl ControlSink for OscSink {
    fn send_note(&self, event: &NoteEvent) -> Result<(), SonifierError> {
        self.send(
            NOTE_ADDRESS,
            &[
                OscArg::Int(event.note),
                OscArg::Int(event.velocity),
                OscArg::Int(event.instrument),
                OscArg::Float(event.duration),
            ],
        )
    }

    fn send_tx_info(&self, info: &TxDisplay) -> Result<(), SonifierError> {
        self.send(
            TX_INFO_ADDRESS,
            &[
                OscArg::Str(info.hash_prefix.clone()),
                OscArg::Float(info.value_eth),
                OscArg::Float(info.gas_gwei),
                OscArg::Str(info.recipient.clone()),
            ],
        )
    }
}

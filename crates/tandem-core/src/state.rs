//! Parameter state persistence.
//!
//! A [`StateCodec`] turns the full parameter vector into bytes and back. Two
//! codecs are provided:
//!
//! - [`RawStateCodec`]: headerless array of native-endian `f32` values in
//!   parameter-index order. This is the default wire format and must stay
//!   byte-compatible with existing presets.
//! - [`JsonStateCodec`]: self-describing, versioned JSON document.
//!
//! Decoding never partially applies anything. A blob that does not match the
//! current parameter set is reported as `Ok(None)`; `Err` is reserved for
//! I/O failures of the underlying stream.

use std::io::{self, Read, Write};

use serde::{Deserialize, Serialize};

use crate::error::PluginResult;

/// Serialization format for the parameter vector.
pub trait StateCodec: Send + Sync {
    /// Short identifier for logs.
    fn format_name(&self) -> &'static str;

    /// Write `values` to `writer`.
    fn encode(&self, values: &[f32], writer: &mut dyn Write) -> PluginResult<()>;

    /// Read a parameter vector of exactly `expected_count` values.
    ///
    /// Returns `Ok(None)` if the stream holds anything else.
    fn decode(&self, expected_count: usize, reader: &mut dyn Read) -> PluginResult<Option<Vec<f32>>>;
}

// =============================================================================
// Raw
// =============================================================================

const F32_SIZE: usize = std::mem::size_of::<f32>();

/// Headerless native-endian `f32` blob.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawStateCodec;

impl StateCodec for RawStateCodec {
    fn format_name(&self) -> &'static str {
        "raw-f32"
    }

    fn encode(&self, values: &[f32], writer: &mut dyn Write) -> PluginResult<()> {
        let mut bytes = Vec::with_capacity(values.len() * F32_SIZE);
        for value in values {
            bytes.extend_from_slice(&value.to_ne_bytes());
        }
        writer.write_all(&bytes)?;
        Ok(())
    }

    fn decode(&self, expected_count: usize, reader: &mut dyn Read) -> PluginResult<Option<Vec<f32>>> {
        // One value of headroom so an over-long blob is detected.
        let expected_len = expected_count * F32_SIZE;
        let mut buffer = vec![0u8; expected_len + F32_SIZE];
        let read = read_up_to(reader, &mut buffer)?;

        if read != expected_len {
            log::debug!(
                "rejecting {} state: read {} bytes, expected {}",
                self.format_name(),
                read,
                expected_len
            );
            return Ok(None);
        }

        let values = buffer[..expected_len]
            .chunks_exact(F32_SIZE)
            .map(|chunk| f32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();
        Ok(Some(values))
    }
}

/// Fill `buffer` from `reader` until it is full or the stream ends.
fn read_up_to(reader: &mut dyn Read, buffer: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

// =============================================================================
// JSON
// =============================================================================

/// Current JSON state document version.
pub const JSON_STATE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct JsonState {
    version: u32,
    parameters: Vec<f32>,
}

/// Versioned JSON document: `{ "version": 1, "parameters": [...] }`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStateCodec;

impl StateCodec for JsonStateCodec {
    fn format_name(&self) -> &'static str {
        "json"
    }

    fn encode(&self, values: &[f32], writer: &mut dyn Write) -> PluginResult<()> {
        let state = JsonState {
            version: JSON_STATE_VERSION,
            parameters: values.to_vec(),
        };
        serde_json::to_writer(writer, &state).map_err(io::Error::from)?;
        Ok(())
    }

    fn decode(&self, expected_count: usize, reader: &mut dyn Read) -> PluginResult<Option<Vec<f32>>> {
        let state: JsonState = match serde_json::from_reader(reader) {
            Ok(state) => state,
            Err(e) if e.is_io() => return Err(io::Error::from(e).into()),
            Err(e) => {
                log::debug!("rejecting {} state: {}", self.format_name(), e);
                return Ok(None);
            }
        };

        if state.version != JSON_STATE_VERSION {
            log::debug!(
                "rejecting {} state: unsupported version {}",
                self.format_name(),
                state.version
            );
            return Ok(None);
        }
        if state.parameters.len() != expected_count {
            log::debug!(
                "rejecting {} state: {} parameters, expected {}",
                self.format_name(),
                state.parameters.len(),
                expected_count
            );
            return Ok(None);
        }

        Ok(Some(state.parameters))
    }
}

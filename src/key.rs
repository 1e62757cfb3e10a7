use std::io::{self, Read};

const ESC: u8 = 0x1b;

/// A logical key event decoded from the raw byte stream.
///
/// `Char` carries a single printable ASCII byte (`0x20..=0x7e`). Anything the
/// decoder cannot map is preserved as `Unknown` with the raw bytes, so a
/// diagnostic mode can echo the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// Ctrl-C or Ctrl-D.
    ExitSignal,
    Enter,
    Backspace,
    Delete,
    Tab,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Char(u8),
    Unknown(Vec<u8>),
}

/// Decodes logical keys from a blocking byte-at-a-time input source.
///
/// The source is expected to be a terminal in raw, no-echo mode. `read_key`
/// blocks until a full event has been read; there is no timeout and no
/// cancellation at this layer.
pub struct KeyDecoder<R> {
    input: R,
}

impl<R: Read> KeyDecoder<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    fn next_byte(&mut self) -> io::Result<u8> {
        let mut byte = [0u8; 1];
        self.input.read_exact(&mut byte)?;
        Ok(byte[0])
    }

    /// Reads one logical key.
    ///
    /// An ESC byte commits the decoder to reading two more bytes; if the third
    /// byte is `'3'` the sequence is the four-byte Delete key and one further
    /// terminator is consumed.
    pub fn read_key(&mut self) -> io::Result<Key> {
        let first = self.next_byte()?;
        if first == ESC {
            let second = self.next_byte()?;
            let third = self.next_byte()?;
            if third == b'3' {
                let fourth = self.next_byte()?;
                return Ok(match [second, third, fourth] {
                    [b'[', b'3', b'~'] => Key::Delete,
                    _ => Key::Unknown(vec![first, second, third, fourth]),
                });
            }
            return Ok(match [second, third] {
                [b'[', b'A'] => Key::ArrowUp,
                [b'[', b'B'] => Key::ArrowDown,
                [b'[', b'C'] => Key::ArrowRight,
                [b'[', b'D'] => Key::ArrowLeft,
                _ => Key::Unknown(vec![first, second, third]),
            });
        }
        Ok(match first {
            0x03 | 0x04 => Key::ExitSignal,
            0x0d => Key::Enter,
            0x7f => Key::Backspace,
            0x09 => Key::Tab,
            b @ 0x20..=0x7e => Key::Char(b),
            other => Key::Unknown(vec![other]),
        })
    }
}

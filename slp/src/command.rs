//! Row command stream.
//!
//! Every row is a sequence of commands terminated by [`Command::EndOfRow`].
//! The low bits of a command byte select the command, the remaining bits (or the following byte) hold the pixel count.
use crate::{error::RowError, PLAYER_COLOR_STRIDE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `0bxxxxxx00`
    ShortDraw,
    /// `0bxxxxxx01`
    ShortSkip,
    /// `0bxxxx0010`, 12 bit count
    LongDraw,
    /// `0bxxxx0011`, 12 bit count
    LongSkip,
    /// `0bxxxx0110`
    PlayerColorDraw,
    /// `0bxxxx0111`
    Fill,
    /// `0bxxxx1010`
    PlayerColorFill,
    /// `0bxxxx1011`
    ShadowDraw,
    /// `0bxxxx1110`
    Extended(ExtendedCommand),
    /// `0x0f`
    EndOfRow,
}

impl Command {
    /// Returns `None` when the byte is not a command.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte & 0b11 {
            0b00 => return Some(Self::ShortDraw),
            0b01 => return Some(Self::ShortSkip),
            _ => (),
        }

        let command = match byte & 0x0f {
            0b0010 => Self::LongDraw,
            0b0011 => Self::LongSkip,
            0b0110 => Self::PlayerColorDraw,
            0b0111 => Self::Fill,
            0b1010 => Self::PlayerColorFill,
            0b1011 => Self::ShadowDraw,
            0b1110 => Self::Extended(ExtendedCommand::from(byte)),
            0b1111 if byte == 0x0f => Self::EndOfRow,
            _ => return None,
        };

        Some(command)
    }
}

/// Commands with the low nibble `0b1110`. The whole byte selects the command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtendedCommand {
    ForwardDraw,
    ReverseDraw,
    NormalTransform,
    AlternateTransform,
    Outline1,
    Outline1Fill,
    Outline2,
    Outline2Fill,
    Dither,
    PremultipliedAlpha,
    Unknown(u8),
}

impl From<u8> for ExtendedCommand {
    fn from(byte: u8) -> Self {
        match byte {
            0x0e => Self::ForwardDraw,
            0x1e => Self::ReverseDraw,
            0x2e => Self::NormalTransform,
            0x3e => Self::AlternateTransform,
            0x4e => Self::Outline1,
            0x5e => Self::Outline1Fill,
            0x6e => Self::Outline2,
            0x7e => Self::Outline2Fill,
            0x8e => Self::Dither,
            0x9e => Self::PremultipliedAlpha,
            byte => Self::Unknown(byte),
        }
    }
}

impl ExtendedCommand {
    pub fn feature_name(&self) -> String {
        match self {
            Self::ForwardDraw => "forward-draw".into(),
            Self::ReverseDraw => "reverse-draw".into(),
            Self::NormalTransform => "normal-transform".into(),
            Self::AlternateTransform => "alternate-transform".into(),
            Self::Outline1 => "outline-1".into(),
            Self::Outline1Fill => "outline-1-fill".into(),
            Self::Outline2 => "outline-2".into(),
            Self::Outline2Fill => "outline-2-fill".into(),
            Self::Dither => "dither".into(),
            Self::PremultipliedAlpha => "premultiplied-alpha".into(),
            Self::Unknown(byte) => format!("extended:{byte:#04x}"),
        }
    }
}

/// Read position inside a frame's command data.
///
/// Rows are packed one after another so the same cursor is handed from one row to the next.
#[derive(Debug, Clone)]
pub struct CommandCursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> CommandCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn seek(&mut self, position: usize) {
        self.position = position;
    }

    pub fn remaining(&self) -> &'a [u8] {
        self.data.get(self.position..).unwrap_or_default()
    }

    pub fn next_byte(&mut self) -> Result<u8, RowError> {
        let byte = *self.data.get(self.position).ok_or(RowError::Truncated {
            position: self.position,
        })?;

        self.position += 1;

        Ok(byte)
    }

    /// Count stored in the bits above `shift`, or in the next byte when those bits are zero.
    fn short_count(&mut self, byte: u8, shift: u32) -> Result<usize, RowError> {
        match byte >> shift {
            0 => self.next_byte().map(usize::from),
            count => Ok(count as usize),
        }
    }

    /// High nibble of the command and the next byte form a 12 bit count.
    fn long_count(&mut self, byte: u8) -> Result<usize, RowError> {
        let low = self.next_byte()? as usize;

        Ok((((byte & 0xf0) as usize) << 4) | low)
    }
}

fn draw<F>(
    cursor: &mut CommandCursor,
    x: &mut u32,
    count: usize,
    color_offset: usize,
    set_pixel: &mut F,
) -> Result<(), RowError>
where
    F: FnMut(u32, usize) -> Result<(), RowError>,
{
    for _ in 0..count {
        let index = cursor.next_byte()? as usize + color_offset;

        set_pixel(*x, index)?;
        *x = x.saturating_add(1);
    }

    Ok(())
}

fn fill<F>(x: &mut u32, count: usize, index: usize, set_pixel: &mut F) -> Result<(), RowError>
where
    F: FnMut(u32, usize) -> Result<(), RowError>,
{
    for _ in 0..count {
        set_pixel(*x, index)?;
        *x = x.saturating_add(1);
    }

    Ok(())
}

fn skip(x: &mut u32, count: usize) {
    *x = x.saturating_add(count.min(u32::MAX as usize) as u32);
}

/// Decodes one row starting at `x` and calls `set_pixel(x, palette_index)` for every drawn pixel.
///
/// Stops after the end of row command and leaves the cursor on the first byte of the next row.
/// Returns the column after the last command.
///
/// Shadow pixels are skipped, not rendered.
pub fn decode_row<F>(
    cursor: &mut CommandCursor,
    mut x: u32,
    player: u8,
    mut set_pixel: F,
) -> Result<u32, RowError>
where
    F: FnMut(u32, usize) -> Result<(), RowError>,
{
    let player_offset = player as usize * PLAYER_COLOR_STRIDE;

    loop {
        let byte = cursor.next_byte()?;
        let command = Command::from_byte(byte).ok_or(RowError::InvalidOpcode { opcode: byte })?;

        match command {
            Command::ShortDraw => {
                let count = cursor.short_count(byte, 2)?;
                draw(cursor, &mut x, count, 0, &mut set_pixel)?;
            }
            Command::ShortSkip => {
                let count = cursor.short_count(byte, 2)?;
                skip(&mut x, count);
            }
            Command::LongDraw => {
                let count = cursor.long_count(byte)?;
                draw(cursor, &mut x, count, 0, &mut set_pixel)?;
            }
            Command::LongSkip => {
                let count = cursor.long_count(byte)?;
                skip(&mut x, count);
            }
            Command::PlayerColorDraw => {
                let count = cursor.short_count(byte, 4)?;
                draw(cursor, &mut x, count, player_offset, &mut set_pixel)?;
            }
            Command::Fill => {
                let count = cursor.short_count(byte, 4)?;
                let index = cursor.next_byte()? as usize;
                fill(&mut x, count, index, &mut set_pixel)?;
            }
            Command::PlayerColorFill => {
                let count = cursor.short_count(byte, 4)?;
                let index = cursor.next_byte()? as usize + player_offset;
                fill(&mut x, count, index, &mut set_pixel)?;
            }
            Command::ShadowDraw => {
                let count = cursor.short_count(byte, 4)?;
                skip(&mut x, count);
            }
            Command::Extended(extended) => match extended {
                ExtendedCommand::NormalTransform => (),
                ExtendedCommand::Outline1 => skip(&mut x, 1),
                ExtendedCommand::Outline1Fill => {
                    let count = cursor.next_byte()? as usize;
                    skip(&mut x, count);
                }
                ExtendedCommand::PremultipliedAlpha => {
                    // alpha operand
                    cursor.next_byte()?;
                    return Err(RowError::not_implemented(extended.feature_name()));
                }
                ExtendedCommand::ForwardDraw
                | ExtendedCommand::ReverseDraw
                | ExtendedCommand::AlternateTransform
                | ExtendedCommand::Outline2
                | ExtendedCommand::Outline2Fill
                | ExtendedCommand::Dither
                | ExtendedCommand::Unknown(_) => {
                    return Err(RowError::not_implemented(extended.feature_name()))
                }
            },
            Command::EndOfRow => return Ok(x),
        }
    }
}

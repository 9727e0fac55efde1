use image::{Rgba, RgbaImage};

use crate::{
    command::{decode_row, CommandCursor},
    error::{RowError, SlpError},
    Frame, Slp, MAX_PLAYER,
};

/// Where the command offset table counts from.
///
/// The offsets are relative to the command data, but most files in the wild store absolute file offsets.
/// If the first row points exactly at the start of the command data, the table could be either:
/// absolute with no gap before row 0, or relative with a gap of that many bytes.
/// Both readings are walked without drawing and absolute wins unless only the relative one lines up.
/// A single row frame cannot tell the two apart and is read as absolute.
fn row_offset_base(frame: &Frame, region: &[u8]) -> u64 {
    let data_start = frame.info.command_data_offset();

    match frame.cmd_offsets.first() {
        Some(&first) if first as u64 == data_start => {
            if !rows_follow_table(frame, region, data_start) && rows_follow_table(frame, region, 0)
            {
                0
            } else {
                data_start
            }
        }
        _ => 0,
    }
}

/// Runs through every row without drawing, checking that each row ends where the next one starts.
fn rows_follow_table(frame: &Frame, region: &[u8], base: u64) -> bool {
    let mut cursor = CommandCursor::new(region);

    for (row, (outline, &offset)) in frame.outlines.iter().zip(&frame.cmd_offsets).enumerate() {
        let expected = (offset as u64).saturating_sub(base) as usize;

        if row == 0 {
            cursor.seek(expected);
        } else if cursor.position() != expected {
            return false;
        }

        if decode_row(&mut cursor, outline.left as u32, 0, |_, _| Ok(())).is_err() {
            return false;
        }
    }

    true
}

/// Decodes every row of `frame` into `image`, with the frame's top left corner at `origin`.
///
/// `data` is the whole SLP file. Pixels falling outside of `image` are dropped.
///
/// On error, rows before the failing one stay in `image`.
pub fn decode_frame(
    frame: &Frame,
    data: &[u8],
    palette: &[Rgba<u8>],
    player: u8,
    image: &mut RgbaImage,
    origin: (u32, u32),
) -> Result<(), SlpError> {
    if player > MAX_PLAYER {
        return Err(SlpError::InvalidPlayer { player });
    }

    if frame.info.outline_table_offset >= frame.info.cmd_table_offset {
        return Err(SlpError::BadOffsets {
            frame: frame.index,
            reason: "outline table must come before command table",
        });
    }

    let region = &data[frame.command_data_range(data.len())];
    let mut cursor = CommandCursor::new(region);
    let base = row_offset_base(frame, region);

    for (row, (outline, &offset)) in frame.outlines.iter().zip(&frame.cmd_offsets).enumerate() {
        let decode_err = |source| SlpError::Decode {
            frame: frame.index,
            row,
            source,
        };

        let expected = (offset as u64).saturating_sub(base) as usize;

        // only the first row is looked up, the rest must follow right after
        if row == 0 {
            cursor.seek(expected);
        } else if cursor.position() != expected {
            return Err(decode_err(RowError::BadOffsets {
                expected,
                found: cursor.position(),
            }));
        }

        let y = origin.1.saturating_add(row as u32);

        decode_row(&mut cursor, outline.left as u32, player, |x, index| {
            let color = palette
                .get(index)
                .ok_or(RowError::PaletteIndexOutOfRange { index })?;

            if let Some(pixel) = image.get_pixel_mut_checked(origin.0.saturating_add(x), y) {
                *pixel = *color;
            }

            Ok(())
        })
        .map_err(decode_err)?;
    }

    Ok(())
}

impl Slp {
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame(&self, index: usize) -> Result<&Frame, SlpError> {
        self.frames.get(index).ok_or(SlpError::NoSuchFrame { index })
    }

    /// Raw bytes of the whole file.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn command_data(&self, frame: &Frame) -> &[u8] {
        &self.data[frame.command_data_range(self.data.len())]
    }

    /// Largest width and largest height over all frames.
    pub fn max_size(&self) -> (u32, u32) {
        self.frames.iter().fold((0, 0), |(width, height), frame| {
            (width.max(frame.width()), height.max(frame.height()))
        })
    }

    pub fn decode_frame(
        &self,
        frame_index: usize,
        palette: &[Rgba<u8>],
        player: u8,
        image: &mut RgbaImage,
        origin: (u32, u32),
    ) -> Result<(), SlpError> {
        let frame = self.frame(frame_index)?;

        decode_frame(frame, &self.data, palette, player, image, origin)
    }

    /// Decodes a frame into a new transparent image of the frame's size.
    pub fn to_rgba8(
        &self,
        frame_index: usize,
        palette: &[Rgba<u8>],
        player: u8,
    ) -> Result<RgbaImage, SlpError> {
        let frame = self.frame(frame_index)?;
        let mut image = RgbaImage::new(frame.width(), frame.height());

        decode_frame(frame, &self.data, palette, player, &mut image, (0, 0))?;

        Ok(image)
    }
}

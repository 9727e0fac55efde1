pub const SLP_VERSION: &[u8; 4] = b"2.0N";

pub const HEADER_SIZE: usize = 4 + 4 + 24;
pub const FRAME_INFO_SIZE: usize = 8 * 4;

/// Palette stride between two player colors.
pub const PLAYER_COLOR_STRIDE: usize = 16;
pub const MAX_PLAYER: u8 = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub version: [u8; 4],
    pub frame_count: i32,
    pub comment: [u8; 24],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInfo {
    pub cmd_table_offset: u32,
    pub outline_table_offset: u32,
    /// Not used when decoding.
    pub palette_offset: u32,
    /// Not used when decoding.
    pub properties: u32,
    pub width: i32,
    pub height: i32,
    pub hotspot_x: i32,
    pub hotspot_y: i32,
}

impl FrameInfo {
    pub fn size(&self) -> (u32, u32) {
        (self.width.max(0) as u32, self.height.max(0) as u32)
    }

    pub fn hotspot(&self) -> (i32, i32) {
        (self.hotspot_x, self.hotspot_y)
    }

    /// Absolute file offset of the first row command, right after the command offset table.
    pub fn command_data_offset(&self) -> u64 {
        self.cmd_table_offset as u64 + 4 * self.height.max(0) as u64
    }
}

/// Transparent margins of a single row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Outline {
    pub left: u16,
    pub right: u16,
}

impl Outline {
    /// Sum of both margins.
    pub fn width(&self) -> u32 {
        self.left as u32 + self.right as u32
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Position of the frame inside its container.
    pub index: usize,
    pub info: FrameInfo,
    // [Outline; height]
    pub outlines: Vec<Outline>,
    // [u32; height]
    pub cmd_offsets: Vec<u32>,
    /// Bytes from this frame's outline table to the next frame's, or to end of file.
    pub data_size: u64,
}

impl Frame {
    pub fn width(&self) -> u32 {
        self.info.size().0
    }

    pub fn height(&self) -> u32 {
        self.info.size().1
    }

    /// Byte range of the command data inside the container file.
    ///
    /// Starts after the command offset table and ends where the next frame's outline table begins.
    pub fn command_data_range(&self, file_len: usize) -> std::ops::Range<usize> {
        let end = (self.info.outline_table_offset as u64 + self.data_size).min(file_len as u64);
        let start = self.info.command_data_offset().min(end);

        start as usize..end as usize
    }
}

pub struct Slp {
    pub header: Header,
    pub frames: Vec<Frame>,
    pub(crate) data: Vec<u8>,
}

//! Small hand-built files shared by the binary's tests.
use drs::{COPYRIGHT, FILE_INFO_SIZE, HEADER_SIZE as DRS_HEADER_SIZE, TABLE_INFO_SIZE};
use image::Rgba;
use palette::Palette;

/// One 3x2 frame.
///
/// Row 0 draws palette colors 1 and 2, row 1 starts one pixel in and fills with color 3.
pub fn tiny_slp() -> Vec<u8> {
    let mut out = vec![];

    out.extend(b"2.0N");
    out.extend(1i32.to_le_bytes());
    out.extend([0u8; 24]);

    // frame info: commands at 72, outlines at 64
    out.extend(72u32.to_le_bytes());
    out.extend(64u32.to_le_bytes());
    out.extend(0u32.to_le_bytes());
    out.extend(0u32.to_le_bytes());
    out.extend(3i32.to_le_bytes());
    out.extend(2i32.to_le_bytes());
    out.extend(1i32.to_le_bytes());
    out.extend(2i32.to_le_bytes());

    // outlines
    out.extend(0u16.to_le_bytes());
    out.extend(0u16.to_le_bytes());
    out.extend(1u16.to_le_bytes());
    out.extend(0u16.to_le_bytes());

    // command offsets, absolute
    out.extend(80u32.to_le_bytes());
    out.extend(84u32.to_le_bytes());

    out.extend([0x08, 1, 2, 0x0f]);
    out.extend([0x17, 3, 0x0f]);

    out
}

/// Archive with a single `slp` table holding one file.
pub fn drs_with(id: u32, file: &[u8]) -> Vec<u8> {
    let mut out = vec![];

    let mut copyright = [0u8; 40];
    copyright[..COPYRIGHT.len()].copy_from_slice(COPYRIGHT);

    let file_info_start = DRS_HEADER_SIZE + TABLE_INFO_SIZE;
    let file_data_start = file_info_start + FILE_INFO_SIZE;

    out.extend(copyright);
    out.extend(b"1.00");
    out.extend(b"tribe\0\0\0\0\0\0\0");
    out.extend(1i32.to_le_bytes());
    out.extend((file_data_start as i32).to_le_bytes());

    out.extend(b" pls");
    out.extend((file_info_start as i32).to_le_bytes());
    out.extend(1i32.to_le_bytes());

    out.extend(id.to_le_bytes());
    out.extend((file_data_start as i32).to_le_bytes());
    out.extend((file.len() as i32).to_le_bytes());

    out.extend(file);

    out
}

/// Grayscale palette, index `i` is `(i, i, i)`.
pub fn gray_palette() -> Palette {
    Palette::new((0..=255u8).map(|i| Rgba([i, i, i, 255])).collect())
}

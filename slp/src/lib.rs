//! SLP sprite parsing and decoding
//!
//! Based of the layout documented at https://github.com/SFTtech/openage/blob/master/doc/media/slp-files.md
//!
//! Only version `2.0N` is supported and only reading.
pub mod command;
mod decode;
pub mod error;
mod parser;
mod types;

pub use command::{decode_row, Command, CommandCursor, ExtendedCommand};
pub use decode::decode_frame;
pub use error::{RowError, SlpError};
pub use parser::parse_slp;
pub use types::*;

#[cfg(test)]
mod test {
    use image::{Rgba, RgbaImage};

    use crate::*;

    struct TestFrame {
        width: i32,
        outlines: Vec<(u16, u16)>,
        rows: Vec<Vec<u8>>,
    }

    impl TestFrame {
        fn new(width: i32) -> Self {
            Self {
                width,
                outlines: vec![],
                rows: vec![],
            }
        }

        fn row(mut self, left: u16, commands: &[u8]) -> Self {
            self.outlines.push((left, 0));
            self.rows.push(commands.to_vec());
            self
        }
    }

    /// Header, frame infos, then outline table, command table and rows of every frame.
    fn build_slp(frames: &[TestFrame], absolute_offsets: bool) -> Vec<u8> {
        let mut out = vec![];
        let mut body = vec![];

        out.extend(SLP_VERSION);
        out.extend((frames.len() as i32).to_le_bytes());
        out.extend(b"ArtDesk 1.00 SLP Writer\0");

        let mut offset = HEADER_SIZE + FRAME_INFO_SIZE * frames.len();

        for frame in frames {
            let height = frame.rows.len();
            let outline_offset = offset;
            let cmd_offset = outline_offset + 4 * height;
            let data_start = cmd_offset + 4 * height;

            [cmd_offset as u32, outline_offset as u32, 0, 0]
                .iter()
                .for_each(|value| out.extend(value.to_le_bytes()));
            [frame.width, height as i32, 1, 2]
                .iter()
                .for_each(|value| out.extend(value.to_le_bytes()));

            for (left, right) in &frame.outlines {
                body.extend(left.to_le_bytes());
                body.extend(right.to_le_bytes());
            }

            let mut row_start = 0;

            for row in &frame.rows {
                let row_offset = if absolute_offsets {
                    data_start + row_start
                } else {
                    row_start
                };

                body.extend((row_offset as u32).to_le_bytes());
                row_start += row.len();
            }

            frame.rows.iter().for_each(|row| body.extend(row));

            offset = data_start + row_start;
        }

        out.extend(body);
        out
    }

    fn test_palette() -> Vec<Rgba<u8>> {
        (0..=255u8).map(|i| Rgba([i, 255 - i, i / 2, 255])).collect()
    }

    fn two_frames() -> Vec<TestFrame> {
        vec![
            TestFrame::new(6)
                .row(1, &[0x57, 0x07, 0x0f])
                .row(0, &[0x0c, 1, 2, 3, 0x0f])
                .row(2, &[0x0f]),
            TestFrame::new(4).row(0, &[0x16, 0x02, 0x1b, 0x0f]),
        ]
    }

    #[test]
    fn parse_tables() {
        let bytes = build_slp(&two_frames(), true);
        let slp = Slp::open_from_bytes(&bytes).unwrap();

        assert_eq!(&slp.header.version, SLP_VERSION);
        assert_eq!(slp.header.frame_count, 2);
        assert_eq!(slp.frame_count(), 2);

        let frame = slp.frame(0).unwrap();

        assert_eq!(frame.index, 0);
        assert_eq!(frame.info.size(), (6, 3));
        assert_eq!(frame.info.hotspot(), (1, 2));
        assert_eq!(frame.outlines[0], Outline { left: 1, right: 0 });
        assert_eq!(frame.outlines[2].width(), 2);
        assert_eq!(frame.cmd_offsets.len(), 3);
        assert!(frame.info.outline_table_offset < frame.info.cmd_table_offset);

        // 3 outlines, 3 offsets, 9 bytes of rows
        assert_eq!(frame.data_size, 12 + 12 + 9);
        assert_eq!(slp.command_data(frame).len(), 9);

        // last frame runs to end of file
        let last = slp.frame(1).unwrap();
        assert_eq!(
            last.info.outline_table_offset as u64 + last.data_size,
            bytes.len() as u64
        );

        assert_eq!(slp.max_size(), (6, 3));
        assert!(matches!(
            slp.frame(2),
            Err(SlpError::NoSuchFrame { index: 2 })
        ));
    }

    #[test]
    fn parse_empty() {
        let bytes = build_slp(&[], true);
        let slp = Slp::open_from_bytes(&bytes).unwrap();

        assert_eq!(slp.frame_count(), 0);
        assert_eq!(slp.max_size(), (0, 0));
    }

    #[test]
    fn bad_version() {
        let mut bytes = build_slp(&two_frames(), true);
        bytes[..4].copy_from_slice(b"4.0X");

        let res = Slp::open_from_bytes(&bytes);

        assert!(matches!(
            res,
            Err(SlpError::BadVersion { version }) if &version == b"4.0X"
        ));
    }

    #[test]
    fn short_header() {
        let res = Slp::open_from_bytes(b"2.0N\x01\0");

        assert!(matches!(res, Err(SlpError::Truncated { what: "header" })));
    }

    #[test]
    fn negative_frame_count() {
        let mut bytes = build_slp(&[], true);
        bytes[4..8].copy_from_slice(&(-1i32).to_le_bytes());

        let res = Slp::open_from_bytes(&bytes);

        assert!(matches!(res, Err(SlpError::BadFrameCount { count: -1 })));
    }

    #[test]
    fn frame_count_past_end_of_file() {
        let mut bytes = build_slp(&two_frames()[..1], true);
        bytes[4..8].copy_from_slice(&3i32.to_le_bytes());
        bytes.truncate(HEADER_SIZE + FRAME_INFO_SIZE);

        let res = Slp::open_from_bytes(&bytes);

        assert!(matches!(
            res,
            Err(SlpError::Truncated {
                what: "frame info table"
            })
        ));

        let mut bytes = build_slp(&[], true);
        bytes[4..8].copy_from_slice(&i32::MAX.to_le_bytes());

        let res = Slp::open_from_bytes(&bytes);

        assert!(matches!(res, Err(SlpError::Truncated { .. })));
    }

    #[test]
    fn outline_after_command_table() {
        let mut bytes = build_slp(&two_frames(), true);

        // outline table offset of frame 1 takes the command table offset
        let info = HEADER_SIZE + FRAME_INFO_SIZE;
        let cmd_offset: [u8; 4] = bytes[info..info + 4].try_into().unwrap();
        bytes[info + 4..info + 8].copy_from_slice(&cmd_offset);

        let res = Slp::open_from_bytes(&bytes);

        assert!(matches!(res, Err(SlpError::BadOffsets { frame: 1, .. })));
    }

    #[test]
    fn outline_table_past_end_of_file() {
        let mut bytes = build_slp(&two_frames(), true);
        bytes.truncate(HEADER_SIZE + FRAME_INFO_SIZE * 2 + 4);

        let res = Slp::open_from_bytes(&bytes);

        assert!(matches!(
            res,
            Err(SlpError::Truncated {
                what: "outline table"
            })
        ));
    }

    #[test]
    fn unordered_frames() {
        let mut bytes = build_slp(&two_frames(), true);

        // frame 0 now points at the tables of frame 1, so frame 0 has no room
        let first = HEADER_SIZE;
        let second = HEADER_SIZE + FRAME_INFO_SIZE;
        let second_info = bytes[second..second + 8].to_vec();
        bytes[first..first + 8].copy_from_slice(&second_info);
        bytes[first + 20..first + 24].copy_from_slice(&1i32.to_le_bytes());

        let res = Slp::open_from_bytes(&bytes);

        assert!(matches!(res, Err(SlpError::BadOffsets { frame: 0, .. })));
    }

    #[test]
    fn decode_rows() {
        let palette = test_palette();
        let slp = Slp::open_from_bytes(&build_slp(&two_frames(), true)).unwrap();

        let image = slp.to_rgba8(0, &palette, 0).unwrap();

        assert_eq!(image.dimensions(), (6, 3));

        // fill of 5 starting at the left margin
        assert_eq!(*image.get_pixel(0, 0), Rgba([0, 0, 0, 0]));
        (1..6).for_each(|x| assert_eq!(*image.get_pixel(x, 0), palette[7]));

        // short draw
        assert_eq!(*image.get_pixel(0, 1), palette[1]);
        assert_eq!(*image.get_pixel(1, 1), palette[2]);
        assert_eq!(*image.get_pixel(2, 1), palette[3]);
        assert_eq!(*image.get_pixel(3, 1), Rgba([0, 0, 0, 0]));

        // empty row
        assert!((0..6).all(|x| *image.get_pixel(x, 2) == Rgba([0, 0, 0, 0])));
    }

    #[test]
    fn decode_player_color() {
        let palette = test_palette();
        let slp = Slp::open_from_bytes(&build_slp(&two_frames(), true)).unwrap();

        let image = slp.to_rgba8(1, &palette, 3).unwrap();

        assert_eq!(*image.get_pixel(0, 0), palette[50]);
        // shadow is skipped
        assert_eq!(*image.get_pixel(1, 0), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn decode_is_deterministic() {
        let palette = test_palette();
        let slp = Slp::open_from_bytes(&build_slp(&two_frames(), true)).unwrap();

        let first = slp.to_rgba8(0, &palette, 2).unwrap();
        let second = slp.to_rgba8(0, &palette, 2).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn decode_relative_offsets() {
        let palette = test_palette();
        let absolute = Slp::open_from_bytes(&build_slp(&two_frames(), true)).unwrap();
        let relative = Slp::open_from_bytes(&build_slp(&two_frames(), false)).unwrap();

        assert_eq!(relative.frame(0).unwrap().cmd_offsets, vec![0, 3, 8]);
        assert_eq!(
            absolute.to_rgba8(0, &palette, 0).unwrap(),
            relative.to_rgba8(0, &palette, 0).unwrap()
        );
    }

    #[test]
    fn relative_offsets_with_gap_before_first_row() {
        let palette = test_palette();

        // outlines at 0, command table at 8, command data at 16
        let mut data = vec![0u8; 8];
        data.extend(16u32.to_le_bytes());
        data.extend(19u32.to_le_bytes());
        // 16 bytes of gap, so row 0 is at relative offset 16
        data.extend([0x0f; 16]);
        data.extend([0x04, 5, 0x0f]);
        data.extend([0x04, 6, 0x0f]);

        let frame = Frame {
            index: 0,
            info: FrameInfo {
                cmd_table_offset: 8,
                outline_table_offset: 0,
                palette_offset: 0,
                properties: 0,
                width: 1,
                height: 2,
                hotspot_x: 0,
                hotspot_y: 0,
            },
            outlines: vec![Outline::default(); 2],
            cmd_offsets: vec![16, 19],
            data_size: data.len() as u64,
        };

        let mut image = RgbaImage::new(1, 2);
        decode_frame(&frame, &data, &palette, 0, &mut image, (0, 0)).unwrap();

        assert_eq!(*image.get_pixel(0, 0), palette[5]);
        assert_eq!(*image.get_pixel(0, 1), palette[6]);
    }

    #[test]
    fn decode_at_origin() {
        let palette = test_palette();
        let slp = Slp::open_from_bytes(&build_slp(&two_frames(), true)).unwrap();

        let mut image = RgbaImage::new(8, 8);
        slp.decode_frame(0, &palette, 0, &mut image, (2, 4)).unwrap();

        assert_eq!(*image.get_pixel(3, 4), palette[7]);
        assert_eq!(*image.get_pixel(2, 5), palette[1]);
        assert_eq!(*image.get_pixel(2, 4), Rgba([0, 0, 0, 0]));

        // partly outside of the image
        let mut image = RgbaImage::new(3, 1);
        slp.decode_frame(0, &palette, 0, &mut image, (0, 0)).unwrap();

        assert_eq!(*image.get_pixel(2, 0), palette[7]);
    }

    #[test]
    fn unsupported_command_keeps_previous_rows() {
        let palette = test_palette();
        let frames = [TestFrame::new(4)
            .row(0, &[0x27, 0x07, 0x0f])
            .row(1, &[0x04, 0x09, 0x3e, 0x0f])
            .row(0, &[0x27, 0x08, 0x0f])];
        let slp = Slp::open_from_bytes(&build_slp(&frames, true)).unwrap();

        let mut image = RgbaImage::new(4, 3);
        let res = slp.decode_frame(0, &palette, 0, &mut image, (0, 0));

        assert!(matches!(
            res,
            Err(SlpError::Decode {
                frame: 0,
                row: 1,
                source: RowError::NotImplemented { ref feature },
            }) if feature == "alternate-transform"
        ));

        assert_eq!(*image.get_pixel(0, 0), palette[7]);
        assert_eq!(*image.get_pixel(1, 0), palette[7]);
        // the draw before the failing command went through
        assert_eq!(*image.get_pixel(1, 1), palette[9]);
        // last row is never reached
        assert_eq!(*image.get_pixel(0, 2), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn row_offset_mismatch() {
        let palette = test_palette();
        let slp = Slp::open_from_bytes(&build_slp(&two_frames(), false)).unwrap();

        let mut frame = slp.frame(0).unwrap().clone();
        frame.cmd_offsets[2] += 1;

        let mut image = RgbaImage::new(6, 3);
        let res = decode_frame(&frame, slp.data(), &palette, 0, &mut image, (0, 0));

        assert!(matches!(
            res,
            Err(SlpError::Decode {
                frame: 0,
                row: 2,
                source: RowError::BadOffsets {
                    expected: 9,
                    found: 8
                },
            })
        ));
        assert_eq!(*image.get_pixel(1, 0), palette[7]);
    }

    #[test]
    fn bad_offsets_write_nothing() {
        let palette = test_palette();
        let slp = Slp::open_from_bytes(&build_slp(&two_frames(), true)).unwrap();

        let mut frame = slp.frame(0).unwrap().clone();
        frame.info.outline_table_offset = frame.info.cmd_table_offset;

        let mut image = RgbaImage::new(6, 3);
        let res = decode_frame(&frame, slp.data(), &palette, 0, &mut image, (0, 0));

        assert!(matches!(res, Err(SlpError::BadOffsets { frame: 0, .. })));
        assert!(image.pixels().all(|pixel| *pixel == Rgba([0, 0, 0, 0])));
    }

    #[test]
    fn palette_index_out_of_range() {
        let palette = test_palette();
        let slp = Slp::open_from_bytes(&build_slp(&two_frames(), true)).unwrap();

        // player 3 pushes index 2 to 50
        let res = slp.to_rgba8(1, &palette[..16], 3);

        assert!(matches!(
            res,
            Err(SlpError::Decode {
                frame: 1,
                row: 0,
                source: RowError::PaletteIndexOutOfRange { index: 50 },
            })
        ));
    }

    #[test]
    fn invalid_player() {
        let palette = test_palette();
        let slp = Slp::open_from_bytes(&build_slp(&two_frames(), true)).unwrap();

        let res = slp.to_rgba8(0, &palette, 8);

        assert!(matches!(res, Err(SlpError::InvalidPlayer { player: 8 })));
    }

    #[test]
    fn truncated_row_data() {
        let palette = test_palette();
        let mut bytes = build_slp(&two_frames()[..1], true);
        // drop the end of row of the last row
        bytes.pop();

        let slp = Slp::open_from_bytes(&bytes).unwrap();
        let res = slp.to_rgba8(0, &palette, 0);

        assert!(matches!(
            res,
            Err(SlpError::Decode {
                row: 2,
                source: RowError::Truncated { position: 8 },
                ..
            })
        ));
    }
}

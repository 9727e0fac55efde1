use std::{ffi::OsStr, path::Path};

use nom::{
    bytes::complete::take,
    combinator::map,
    multi::count,
    number::complete::{le_i32, le_u16, le_u32},
    IResult as _IResult, Parser,
};

use crate::{
    error::SlpError, Frame, FrameInfo, Header, Outline, Slp, FRAME_INFO_SIZE, SLP_VERSION,
};

pub type IResult<'a, T> = _IResult<&'a [u8], T>;

impl Slp {
    pub fn open_from_bytes(i: &[u8]) -> Result<Slp, SlpError> {
        Self::from_vec(i.to_vec())
    }

    pub fn open_from_file(path: impl AsRef<OsStr> + AsRef<Path>) -> Result<Slp, SlpError> {
        let file = std::fs::read(path).map_err(|op| SlpError::IOError { source: op })?;

        Self::from_vec(file)
    }

    fn from_vec(data: Vec<u8>) -> Result<Slp, SlpError> {
        let (header, frames) = parse_slp(&data)?;

        Ok(Slp {
            header,
            frames,
            data,
        })
    }
}

fn byte_array<const N: usize>(i: &[u8]) -> IResult<'_, [u8; N]> {
    map(take(N), |res: &[u8]| {
        let mut arr = [0u8; N];
        arr.copy_from_slice(res);
        arr
    })
    .parse(i)
}

pub fn parse_header(i: &[u8]) -> IResult<'_, Header> {
    map(
        (byte_array::<4>, le_i32, byte_array::<24>),
        |(version, frame_count, comment)| Header {
            version,
            frame_count,
            comment,
        },
    )
    .parse(i)
}

pub fn parse_frame_info(i: &[u8]) -> IResult<'_, FrameInfo> {
    map(
        (
            le_u32, le_u32, le_u32, le_u32, le_i32, le_i32, le_i32, le_i32,
        ),
        |(
            cmd_table_offset,
            outline_table_offset,
            palette_offset,
            properties,
            width,
            height,
            hotspot_x,
            hotspot_y,
        )| FrameInfo {
            cmd_table_offset,
            outline_table_offset,
            palette_offset,
            properties,
            width,
            height,
            hotspot_x,
            hotspot_y,
        },
    )
    .parse(i)
}

pub fn parse_outlines(i: &[u8], height: usize) -> IResult<'_, Vec<Outline>> {
    count(
        map((le_u16, le_u16), |(left, right)| Outline { left, right }),
        height,
    )
    .parse(i)
}

pub fn parse_cmd_offsets(i: &[u8], height: usize) -> IResult<'_, Vec<u32>> {
    count(le_u32, height).parse(i)
}

fn check_frame_info(frame: usize, info: &FrameInfo) -> Result<(), SlpError> {
    if info.outline_table_offset >= info.cmd_table_offset {
        return Err(SlpError::BadOffsets {
            frame,
            reason: "outline table must come before command table",
        });
    }

    if info.width < 0 || info.height < 0 {
        return Err(SlpError::BadDimensions {
            frame,
            width: info.width,
            height: info.height,
        });
    }

    Ok(())
}

/// Parses the container tables.
///
/// Only the tables are validated here. Command streams are left alone until a frame is decoded.
pub fn parse_slp(i: &[u8]) -> Result<(Header, Vec<Frame>), SlpError> {
    let file_start = i;
    let file_len = i.len() as u64;

    let (mut i, header) = parse_header(i).map_err(|_| SlpError::Truncated { what: "header" })?;

    if &header.version != SLP_VERSION {
        return Err(SlpError::BadVersion {
            version: header.version,
        });
    }

    if header.frame_count < 0 {
        return Err(SlpError::BadFrameCount {
            count: header.frame_count,
        });
    }

    let frame_count = header.frame_count as usize;

    // the count comes from the file so don't trust it for allocation
    let mut infos = Vec::with_capacity(frame_count.min(i.len() / FRAME_INFO_SIZE));

    for frame in 0..frame_count {
        let (rest, info) = parse_frame_info(i).map_err(|_| SlpError::Truncated {
            what: "frame info table",
        })?;

        check_frame_info(frame, &info)?;

        infos.push(info);
        i = rest;
    }

    // outline and command tables are read at their own offsets
    let tables = infos
        .iter()
        .map(|info| {
            let height = info.height as usize;

            let outline_start = file_start
                .get(info.outline_table_offset as usize..)
                .ok_or(SlpError::Truncated {
                    what: "outline table",
                })?;
            let (_, outlines) = parse_outlines(outline_start, height).map_err(|_| {
                SlpError::Truncated {
                    what: "outline table",
                }
            })?;

            let cmd_start = file_start
                .get(info.cmd_table_offset as usize..)
                .ok_or(SlpError::Truncated {
                    what: "command offset table",
                })?;
            let (_, cmd_offsets) = parse_cmd_offsets(cmd_start, height).map_err(|_| {
                SlpError::Truncated {
                    what: "command offset table",
                }
            })?;

            Ok((outlines, cmd_offsets))
        })
        .collect::<Result<Vec<_>, SlpError>>()?;

    let data_sizes = (0..infos.len())
        .map(|index| {
            let start = infos[index].outline_table_offset as u64;
            let end = infos
                .get(index + 1)
                .map(|next| next.outline_table_offset as u64)
                .unwrap_or(file_len);

            if end > file_len {
                return Err(SlpError::BadOffsets {
                    frame: index,
                    reason: "next frame starts past end of file",
                });
            }

            if end <= start {
                return Err(SlpError::BadOffsets {
                    frame: index,
                    reason: "frame data size is not positive",
                });
            }

            Ok(end - start)
        })
        .collect::<Result<Vec<u64>, SlpError>>()?;

    let frames = infos
        .into_iter()
        .zip(tables)
        .zip(data_sizes)
        .enumerate()
        .map(|(index, ((info, (outlines, cmd_offsets)), data_size))| Frame {
            index,
            info,
            outlines,
            cmd_offsets,
            data_size,
        })
        .collect::<Vec<Frame>>();

    log::debug!(
        "Parsed SLP: {} frames, comment {:?}",
        frames.len(),
        String::from_utf8_lossy(&header.comment).trim_end_matches('\0')
    );

    Ok((header, frames))
}

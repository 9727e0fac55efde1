use std::{ffi::OsStr, path::Path};

use nom::{
    bytes::complete::take, combinator::map, multi::count, number::complete::le_u32,
    IResult as _IResult, Parser,
};

use crate::{error::BlendomaticError, Blendomatic, BlendingMode, Header, MAX_TILES};

type IResult<'a, T> = _IResult<&'a [u8], T>;

impl Blendomatic {
    pub fn open_from_bytes(i: &[u8]) -> Result<Blendomatic, BlendomaticError> {
        parse_blendomatic(i)
    }

    pub fn open_from_file(
        path: impl AsRef<OsStr> + AsRef<Path>,
    ) -> Result<Blendomatic, BlendomaticError> {
        let file = std::fs::read(path)?;

        parse_blendomatic(&file)
    }
}

fn parse_header(i: &[u8]) -> IResult<'_, Header> {
    map((le_u32, le_u32), |(mode_count, tile_count)| Header {
        mode_count,
        tile_count,
    })
    .parse(i)
}

fn truncated<'a>(
    mode: usize,
    what: &'static str,
) -> impl Fn(nom::Err<nom::error::Error<&'a [u8]>>) -> BlendomaticError {
    move |_| BlendomaticError::TruncatedMode { mode, what }
}

fn parse_mode(
    i: &[u8],
    mode: usize,
    tile_count: usize,
) -> Result<(&[u8], BlendingMode), BlendomaticError> {
    let (i, tile_size) = le_u32.parse(i).map_err(truncated(mode, "tile size"))?;
    let (i, tile_flags) = take(tile_count)
        .parse(i)
        .map_err(truncated(mode, "tile flags"))?;
    let (mut i, tile_bits) = count(le_u32, tile_size as usize)
        .parse(i)
        .map_err(truncated(mode, "tile bits"))?;

    let mut tile_alpha = Vec::with_capacity(tile_count);

    for (tile, &flag) in tile_flags.iter().enumerate() {
        if flag == 0 {
            return Err(BlendomaticError::MissingAlpha { mode, tile });
        }

        let (rest, alpha) = take(tile_size as usize)
            .parse(i)
            .map_err(truncated(mode, "tile alpha"))?;

        tile_alpha.push(alpha.to_vec());
        i = rest;
    }

    Ok((
        i,
        BlendingMode {
            tile_size,
            tile_flags: tile_flags.to_vec(),
            tile_bits,
            tile_alpha,
        },
    ))
}

pub fn parse_blendomatic(i: &[u8]) -> Result<Blendomatic, BlendomaticError> {
    let (mut i, header) =
        parse_header(i).map_err(|_| BlendomaticError::Truncated { what: "header" })?;

    if header.tile_count == 0 || header.tile_count > MAX_TILES {
        return Err(BlendomaticError::BadTileCount {
            count: header.tile_count,
        });
    }

    let mut modes = vec![];

    for mode in 0..header.mode_count as usize {
        let (rest, blending_mode) = parse_mode(i, mode, header.tile_count as usize)?;

        modes.push(blending_mode);
        i = rest;
    }

    log::debug!(
        "Parsed blendomatic: {} modes, {} tiles",
        modes.len(),
        header.tile_count
    );

    Ok(Blendomatic { header, modes })
}

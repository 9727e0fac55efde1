use std::{ffi::OsStr, path::Path};

use image::Rgba;
use nom::{
    character::complete::{line_ending, not_line_ending, space0, space1, u8 as dec_u8},
    combinator::{all_consuming, map, opt},
    sequence::{preceded, terminated},
    IResult as _IResult, Parser,
};

use crate::{error::PaletteError, Palette, JASC_HEADER, JASC_VERSION};

type IResult<'a, T> = _IResult<&'a str, T>;

impl Palette {
    pub fn parse(i: &str) -> Result<Palette, PaletteError> {
        parse_palette(i)
    }

    pub fn open_from_bytes(i: &[u8]) -> Result<Palette, PaletteError> {
        let text = std::str::from_utf8(i).map_err(|_| PaletteError::NotText)?;

        parse_palette(text)
    }

    pub fn open_from_file(path: impl AsRef<OsStr> + AsRef<Path>) -> Result<Palette, PaletteError> {
        let bytes = std::fs::read(path)?;

        Self::open_from_bytes(&bytes)
    }
}

// Line must be terminated.
fn take_line(i: &str) -> IResult<'_, &str> {
    terminated(not_line_ending, line_ending).parse(i)
}

// Last line of the file does not need a line ending.
fn take_last_line(i: &str) -> IResult<'_, &str> {
    terminated(not_line_ending, opt(line_ending)).parse(i)
}

fn parse_color(i: &str) -> IResult<'_, Rgba<u8>> {
    all_consuming(map(
        terminated(
            (
                preceded(space0, dec_u8),
                preceded(space1, dec_u8),
                preceded(space1, dec_u8),
            ),
            space0,
        ),
        |(r, g, b)| Rgba([r, g, b, 255]),
    ))
    .parse(i)
}

fn parse_palette(i: &str) -> Result<Palette, PaletteError> {
    let (i, header) = take_line(i).map_err(|_| PaletteError::Truncated { what: "header" })?;

    if header.trim() != JASC_HEADER {
        return Err(PaletteError::InvalidHeader {
            found: header.trim().to_string(),
        });
    }

    let (i, version) = take_line(i).map_err(|_| PaletteError::Truncated { what: "version" })?;

    if version.trim() != JASC_VERSION {
        return Err(PaletteError::InvalidVersion {
            found: version.trim().to_string(),
        });
    }

    let (mut i, color_count) = take_line(i).map_err(|_| PaletteError::Truncated {
        what: "color count",
    })?;

    let color_count = color_count
        .trim()
        .parse::<usize>()
        .map_err(|_| PaletteError::InvalidCount {
            found: color_count.trim().to_string(),
        })?;

    let mut colors = Vec::with_capacity(color_count.min(256));

    for index in 0..color_count {
        if i.is_empty() {
            return Err(PaletteError::Truncated { what: "colors" });
        }

        let (rest, line) =
            take_last_line(i).map_err(|_| PaletteError::Truncated { what: "colors" })?;

        // header, version and count come first
        let (_, color) =
            parse_color(line).map_err(|_| PaletteError::InvalidLine { line: index + 4 })?;

        colors.push(color);
        i = rest;
    }

    Ok(Palette(colors))
}

use std::{ffi::OsStr, path::Path};

use nom::{bytes::complete::take, combinator::map, multi::count, IResult as _IResult, Parser};

use crate::{error::IcmError, Icm, Level, BRIGHTNESS_LEVELS, LEVEL_SIZE};

type IResult<'a, T> = _IResult<&'a [u8], T>;

impl Icm {
    pub fn open_from_bytes(i: &[u8]) -> Result<Icm, IcmError> {
        parse_icm(i)
    }

    pub fn open_from_file(path: impl AsRef<OsStr> + AsRef<Path>) -> Result<Icm, IcmError> {
        let file = std::fs::read(path)?;

        parse_icm(&file)
    }
}

fn parse_level(i: &[u8]) -> IResult<'_, Level> {
    map(take(LEVEL_SIZE), |res: &[u8]| Level(res.to_vec())).parse(i)
}

pub fn parse_icm(i: &[u8]) -> Result<Icm, IcmError> {
    let (rest, levels) = count(parse_level, BRIGHTNESS_LEVELS)
        .parse(i)
        .map_err(|_| IcmError::Truncated { what: "levels" })?;

    if !rest.is_empty() {
        log::debug!("Ignoring {} bytes after the ICM tables", rest.len());
    }

    Ok(Icm { levels })
}

use std::{ffi::OsStr, path::Path};

use nom::{
    bytes::complete::take,
    combinator::map,
    multi::count,
    number::complete::{le_i32, le_u32},
    IResult as _IResult, Parser,
};

use crate::{
    error::DrsError, Drs, FileId, FileInfo, Header, Table, TableInfo, COPYRIGHT, TABLE_INFO_SIZE,
};

type IResult<'a, T> = _IResult<&'a [u8], T>;

impl Drs {
    pub fn open_from_bytes(i: &[u8]) -> Result<Drs, DrsError> {
        Self::from_vec(i.to_vec())
    }

    pub fn open_from_file(path: impl AsRef<OsStr> + AsRef<Path>) -> Result<Drs, DrsError> {
        let file = std::fs::read(path)?;

        Self::from_vec(file)
    }

    fn from_vec(data: Vec<u8>) -> Result<Drs, DrsError> {
        let (header, tables) = parse_drs(&data)?;

        Ok(Drs {
            header,
            tables,
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

fn parse_header(i: &[u8]) -> IResult<'_, Header> {
    map(
        (
            byte_array::<40>,
            byte_array::<4>,
            byte_array::<12>,
            le_i32,
            le_i32,
        ),
        |(copyright, version, file_type, table_count, file_offset)| Header {
            copyright,
            version,
            file_type,
            table_count,
            file_offset,
        },
    )
    .parse(i)
}

fn parse_table_info(i: &[u8]) -> IResult<'_, TableInfo> {
    map(
        (byte_array::<4>, le_i32, le_i32),
        |(extension, offset, num_files)| TableInfo {
            extension,
            offset,
            num_files,
        },
    )
    .parse(i)
}

fn parse_file_info(i: &[u8]) -> IResult<'_, FileInfo> {
    map((le_u32, le_i32, le_i32), |(id, offset, size)| FileInfo {
        id: FileId(id),
        offset,
        size,
    })
    .parse(i)
}

fn parse_table(file_start: &[u8], info: TableInfo, table: usize) -> Result<Table, DrsError> {
    if info.offset < 0 || info.num_files < 0 {
        return Err(DrsError::InvalidTableEntry { table });
    }

    let table_start = file_start
        .get(info.offset as usize..)
        .ok_or(DrsError::InvalidTableEntry { table })?;

    let (_, files) = count(parse_file_info, info.num_files as usize)
        .parse(table_start)
        .map_err(|_| DrsError::InvalidTableEntry { table })?;

    Ok(Table { info, files })
}

fn parse_drs(i: &[u8]) -> Result<(Header, Vec<Table>), DrsError> {
    let file_start = i;

    let (i, header) = parse_header(i).map_err(|_| DrsError::Truncated { what: "header" })?;

    if !header.copyright.starts_with(COPYRIGHT) {
        return Err(DrsError::InvalidCopyright {
            copyright: String::from_utf8_lossy(&header.copyright)
                .trim_end_matches('\0')
                .to_string(),
        });
    }

    if header.table_count < 0 {
        return Err(DrsError::BadCount {
            count: header.table_count,
        });
    }

    let table_count = header.table_count as usize;

    if i.len() / TABLE_INFO_SIZE < table_count {
        return Err(DrsError::Truncated { what: "table list" });
    }

    let (_, table_infos) = count(parse_table_info, table_count)
        .parse(i)
        .map_err(|_| DrsError::Truncated { what: "table list" })?;

    let tables = table_infos
        .into_iter()
        .enumerate()
        .map(|(index, info)| parse_table(file_start, info, index))
        .collect::<Result<Vec<Table>, DrsError>>()?;

    log::debug!(
        "Parsed DRS: {} tables, {} files",
        tables.len(),
        tables.iter().map(|table| table.files.len()).sum::<usize>()
    );

    Ok((header, tables))
}

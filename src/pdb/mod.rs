//! Palm Database (PDB) container structure.
//!
//! Only the parts a HaoDoo book needs: database name, the type/creator
//! identifier and the record (section) table. Record contents are opaque.

use bstr::ByteSlice;

use crate::error::{Error, Result};
use crate::io::ByteSource;

/// Size of the fixed PDB header preceding the record table.
pub const HEADER_LEN: usize = 78;

/// Size of one record table entry (offset, attributes, unique id).
const RECORD_ENTRY_LEN: usize = 8;

/// PDB header info extracted from bytes.
#[derive(Debug, Clone)]
pub struct PdbInfo {
    pub name: String,
    /// Type and creator codes, bytes 60..68 (e.g. `BOOKMTIU`).
    pub ident: [u8; 8],
    pub num_records: u16,
    /// Record offsets within the file.
    pub record_offsets: Vec<u32>,
}

impl PdbInfo {
    /// Parse the header and record table from the start of the file.
    /// Returns the info and the number of bytes consumed.
    pub fn parse(data: &[u8]) -> Result<(Self, usize)> {
        if data.len() < HEADER_LEN {
            return Err(Error::InvalidPdb(format!(
                "header needs {HEADER_LEN} bytes, got {}",
                data.len()
            )));
        }

        let name_end = data[..32].find_byte(0).unwrap_or(32);
        let name = data[..name_end].to_str_lossy().into_owned();

        let mut ident = [0u8; 8];
        ident.copy_from_slice(&data[60..68]);

        let num_records = u16::from_be_bytes([data[76], data[77]]);
        let table_end = HEADER_LEN + num_records as usize * RECORD_ENTRY_LEN;
        if data.len() < table_end {
            return Err(Error::InvalidPdb(format!(
                "record table truncated: {num_records} records need {table_end} bytes"
            )));
        }

        let record_offsets = data[HEADER_LEN..table_end]
            .chunks_exact(RECORD_ENTRY_LEN)
            .map(|entry| u32::from_be_bytes([entry[0], entry[1], entry[2], entry[3]]))
            .collect();

        Ok((
            Self {
                name,
                ident,
                num_records,
                record_offsets,
            },
            table_end,
        ))
    }

    /// Read and parse the header and record table from a byte source.
    pub fn read(source: &dyn ByteSource) -> Result<Self> {
        if source.len() < HEADER_LEN as u64 {
            return Err(Error::InvalidPdb("file too short for PDB header".into()));
        }
        let head = source.read_at(0, HEADER_LEN)?;
        let num_records = u16::from_be_bytes([head[76], head[77]]) as usize;
        let table_len = HEADER_LEN + num_records * RECORD_ENTRY_LEN;
        if source.len() < table_len as u64 {
            return Err(Error::InvalidPdb(format!(
                "record table truncated: {num_records} records need {table_len} bytes"
            )));
        }
        let (info, _) = Self::parse(&source.read_at(0, table_len)?)?;
        Ok(info)
    }

    /// Identifier as text, for messages.
    pub fn ident_str(&self) -> String {
        self.ident[..].to_str_lossy().into_owned()
    }

    /// Byte range `(start, end)` of a record.
    ///
    /// The last record runs to the end of the file.
    pub fn record_range(&self, index: usize, file_len: u64) -> Result<(u64, u64)> {
        let count = self.record_offsets.len();
        if index >= count {
            return Err(Error::SectionOutOfRange { index, count });
        }

        let start = self.record_offsets[index] as u64;
        let end = match self.record_offsets.get(index + 1) {
            Some(&next) => next as u64,
            None => file_len,
        };

        if start > end || end > file_len {
            return Err(Error::InvalidPdb(format!(
                "record {index} spans {start}..{end} in a {file_len}-byte file"
            )));
        }
        Ok((start, end))
    }

    /// Read the bytes of a record.
    pub fn read_record(&self, source: &dyn ByteSource, index: usize) -> Result<Vec<u8>> {
        let (start, end) = self.record_range(index, source.len())?;
        Ok(source.read_range(start, end)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemorySource;

    fn header(ident: &[u8; 8], offsets: &[u32]) -> Vec<u8> {
        let mut data = vec![0u8; HEADER_LEN];
        data[..4].copy_from_slice(b"Book");
        data[60..68].copy_from_slice(ident);
        data[76..78].copy_from_slice(&(offsets.len() as u16).to_be_bytes());
        for (i, offset) in offsets.iter().enumerate() {
            data.extend_from_slice(&offset.to_be_bytes());
            data.extend_from_slice(&(i as u32).to_be_bytes());
        }
        data
    }

    #[test]
    fn test_parse_header() {
        let data = header(b"BOOKMTIU", &[94, 100]);
        let (pdb, consumed) = PdbInfo::parse(&data).unwrap();
        assert_eq!(pdb.name, "Book");
        assert_eq!(&pdb.ident, b"BOOKMTIU");
        assert_eq!(pdb.num_records, 2);
        assert_eq!(pdb.record_offsets, vec![94, 100]);
        assert_eq!(consumed, 94);
    }

    #[test]
    fn test_parse_header_too_short() {
        assert!(matches!(
            PdbInfo::parse(&[0u8; 40]),
            Err(Error::InvalidPdb(_))
        ));
    }

    #[test]
    fn test_parse_truncated_table() {
        let mut data = header(b"BOOKMTIT", &[94, 100]);
        data.truncate(85);
        assert!(matches!(PdbInfo::parse(&data), Err(Error::InvalidPdb(_))));
    }

    #[test]
    fn test_record_range_last_runs_to_eof() {
        let data = header(b"BOOKMTIT", &[94, 100]);
        let (pdb, _) = PdbInfo::parse(&data).unwrap();
        assert_eq!(pdb.record_range(0, 120).unwrap(), (94, 100));
        assert_eq!(pdb.record_range(1, 120).unwrap(), (100, 120));
    }

    #[test]
    fn test_record_range_out_of_bounds() {
        let data = header(b"BOOKMTIT", &[94]);
        let (pdb, _) = PdbInfo::parse(&data).unwrap();
        assert!(matches!(
            pdb.record_range(3, 200),
            Err(Error::SectionOutOfRange { index: 3, count: 1 })
        ));
    }

    #[test]
    fn test_record_range_rejects_decreasing_offsets() {
        let data = header(b"BOOKMTIT", &[120, 100]);
        let (pdb, _) = PdbInfo::parse(&data).unwrap();
        assert!(matches!(pdb.record_range(0, 200), Err(Error::InvalidPdb(_))));
    }

    #[test]
    fn test_read_record_from_source() {
        let mut data = header(b"BOOKMTIT", &[94, 97]);
        data.extend_from_slice(b"abcdefg");
        let source = MemorySource::new(data);
        let pdb = PdbInfo::read(&source).unwrap();
        assert_eq!(pdb.read_record(&source, 0).unwrap(), b"abc");
        assert_eq!(pdb.read_record(&source, 1).unwrap(), b"defg");
    }
}

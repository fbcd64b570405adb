//! Synthetic HaoDoo containers for integration tests.

#![allow(dead_code)]

pub const LEGACY: &[u8; 8] = b"BOOKMTIT";
pub const UNICODE: &[u8; 8] = b"BOOKMTIU";

/// Builds a PDB container record by record.
pub struct PdbBuilder {
    ident: [u8; 8],
    name: Vec<u8>,
    version: u8,
    records: Vec<Vec<u8>>,
}

impl PdbBuilder {
    pub fn new(ident: &[u8; 8]) -> Self {
        Self {
            ident: *ident,
            name: b"haodoo-test".to_vec(),
            version: 0,
            records: Vec::new(),
        }
    }

    /// Author bytes at offset 0 with version byte 2.
    pub fn author(mut self, raw: &[u8]) -> Self {
        self.name = raw.to_vec();
        self.version = 2;
        self
    }

    pub fn record(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.records.push(data.into());
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let table_end = 78 + self.records.len() * 8;
        let mut data = vec![0u8; table_end];
        data[..self.name.len()].copy_from_slice(&self.name);
        data[35] = self.version;
        data[60..68].copy_from_slice(&self.ident);
        data[76..78].copy_from_slice(&(self.records.len() as u16).to_be_bytes());

        let mut offset = table_end;
        for (i, record) in self.records.iter().enumerate() {
            let entry = 78 + i * 8;
            data[entry..entry + 4].copy_from_slice(&(offset as u32).to_be_bytes());
            offset += record.len();
        }
        for record in &self.records {
            data.extend_from_slice(record);
        }
        data
    }
}

pub fn utf16(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_le_bytes).collect()
}

/// Unicode book: header record plus one section per chapter text.
pub fn unicode_book(title: &str, chapters: &[(&str, &str)]) -> PdbBuilder {
    let titles: Vec<&str> = chapters.iter().map(|(title, _)| *title).collect();
    let header = format!("{title}\x1b\x1b\x1b{}\x1b{}", chapters.len(), titles.join("\r\n"));
    chapters
        .iter()
        .fold(PdbBuilder::new(UNICODE).record(utf16(&header)), |builder, (_, text)| {
            builder.record(utf16(text))
        })
}

/// Legacy book from already Big5-encoded pieces.
pub fn legacy_book(title: &[u8], chapters: &[(&[u8], &[u8])]) -> PdbBuilder {
    let mut header = title.to_vec();
    header.extend_from_slice(b"\x1b\x1b\x1b");
    header.extend_from_slice(chapters.len().to_string().as_bytes());
    for (title, _) in chapters {
        header.push(0x1b);
        header.extend_from_slice(title);
    }
    chapters
        .iter()
        .fold(PdbBuilder::new(LEGACY).record(header), |builder, (_, text)| {
            builder.record(text.to_vec())
        })
}

use super::ext::ReadExt;
use byteorder::{ReadBytesExt, LE};
use std::io::Cursor;

/// One variable-length record from the partition descriptor list.
#[derive(Debug, Clone)]
pub struct PartitionDescriptor {
    /// Total record size, including the variable tail; locates the next
    /// record in the list.
    pub length: u32,
    pub partition_name: String,
    pub file_name: String,
    pub partition_size: u32,
    pub partition_addr: u32,
}

impl PartitionDescriptor {
    /// Decodes a full record buffer. Callers guarantee it holds at least the
    /// fixed field region.
    pub(crate) fn parse(record: &[u8]) -> Result<Self, super::Error> {
        let mut reader = Cursor::new(record);
        let length = reader.read_u32::<LE>()?;
        let partition_name = reader.read_ucs2(256)?;
        let file_name = reader.read_ucs2(512)?;
        let partition_size = reader.read_u32::<LE>()?;
        reader.read_len(8)?;
        let partition_addr = reader.read_u32::<LE>()?;
        // 12 reserved bytes and the variable tail are never interpreted
        Ok(Self {
            length,
            partition_name,
            file_name,
            partition_size,
            partition_addr,
        })
    }

    /// Records with no payload or no destination name are placeholders;
    /// nothing is extracted for them.
    pub fn is_empty(&self) -> bool {
        self.partition_size == 0 || self.file_name.is_empty()
    }

    /// One past the last payload byte within the container.
    pub fn payload_end(&self) -> u64 {
        self.partition_addr as u64 + self.partition_size as u64
    }
}

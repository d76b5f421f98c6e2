use super::ext::ReadExt;
use byteorder::{ReadBytesExt, LE};

/// Fixed 1220 byte header at the start of every PAC container.
///
/// Only the fields this tool interprets are decoded; the reserved vendor
/// regions are skipped and matter for byte offsets only.
#[derive(Debug)]
pub struct PacHeader {
    pub product_name: String,
    pub firmware_name: String,
    pub partition_count: u32,
    pub partitions_list_start: u32,
}

impl PacHeader {
    pub fn read<R: std::io::Read>(reader: &mut R) -> Result<Self, super::Error> {
        // 24 u16 slots of vendor metadata plus one u32
        reader.read_len(52)?;
        let product_name = reader.read_ucs2(256)?;
        let firmware_name = reader.read_ucs2(256)?;
        let partition_count = reader.read_i32::<LE>()?;
        let partitions_list_start = reader.read_u32::<LE>()?;
        // the count is stored signed; a negative value is hostile or corrupt
        if partition_count < 0 {
            return Err(super::Error::NegativePartitionCount(partition_count));
        }
        // 136 reserved bytes follow, never interpreted
        Ok(Self {
            product_name,
            firmware_name,
            partition_count: partition_count as u32,
            partitions_list_start,
        })
    }
}

use super::ext::ReadExt;
use super::{Error, PacHeader, PartitionDescriptor, DESCRIPTOR_FIXED_SIZE, HEADER_SIZE};
use byteorder::{ReadBytesExt, LE};
use std::io::{Read, Seek, SeekFrom, Write};

// payload copy buffer; tuning constant only, correctness never depends on it
const COPY_CHUNK_SIZE: usize = 1024 * 1024;

/// Decoded view of a PAC container. Holds no file handle; every operation
/// borrows the source, so callers control buffering and lifetime.
#[derive(Debug)]
pub struct PacReader {
    header: PacHeader,
    file_size: u64,
}

impl PacReader {
    pub fn new<R: Read + Seek>(reader: &mut R) -> Result<Self, Error> {
        let file_size = reader.seek(SeekFrom::End(0))?;
        if file_size < HEADER_SIZE {
            return Err(Error::TooSmall { size: file_size });
        }
        reader.rewind()?;
        let header = PacHeader::read(reader)?;
        Ok(Self { header, file_size })
    }

    pub fn header(&self) -> &PacHeader {
        &self.header
    }

    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Lazy walk of the descriptor list, yielding at most `partition_count`
    /// records. The declared count is advisory: a container whose real list
    /// is shorter simply ends the sequence early. The iterator is fused and
    /// yields nothing after the first error.
    pub fn partitions<'r, R: Read + Seek>(&self, reader: &'r mut R) -> Partitions<'r, R> {
        Partitions {
            reader,
            cur_pos: self.header.partitions_list_start as u64,
            file_size: self.file_size,
            remaining: self.header.partition_count,
            done: false,
        }
    }

    /// Streams one partition's payload to `dest` in fixed-size chunks,
    /// reporting cumulative bytes against the total after each chunk.
    ///
    /// A payload reaching past the end of the container fails with
    /// [`Error::PayloadOutOfBounds`] before anything is written. I/O errors
    /// mid-copy leave whatever was already written in `dest`.
    pub fn extract<R, W, F>(
        &self,
        desc: &PartitionDescriptor,
        reader: &mut R,
        dest: &mut W,
        mut progress: F,
    ) -> Result<u64, Error>
    where
        R: Read + Seek,
        W: Write,
        F: FnMut(u64, u64),
    {
        let end = desc.payload_end();
        if end > self.file_size {
            return Err(Error::PayloadOutOfBounds {
                name: desc.file_name.clone(),
                end,
                file_size: self.file_size,
            });
        }
        reader.seek(SeekFrom::Start(desc.partition_addr as u64))?;

        let total = desc.partition_size as u64;
        let mut buf = vec![0; COPY_CHUNK_SIZE.min(desc.partition_size as usize)];
        let mut copied = 0;
        progress(copied, total);
        while copied < total {
            let n = buf.len().min((total - copied) as usize);
            reader.read_exact(&mut buf[..n])?;
            dest.write_all(&buf[..n])?;
            copied += n as u64;
            progress(copied, total);
        }
        Ok(copied)
    }
}

pub struct Partitions<'r, R> {
    reader: &'r mut R,
    cur_pos: u64,
    file_size: u64,
    remaining: u32,
    done: bool,
}

impl<R: Read + Seek> Partitions<'_, R> {
    fn read_next(&mut self) -> Result<PartitionDescriptor, Error> {
        self.reader.seek(SeekFrom::Start(self.cur_pos))?;
        let length = self.reader.read_u32::<LE>()?;
        if self.cur_pos + length as u64 > self.file_size {
            return Err(Error::TruncatedDescriptor {
                offset: self.cur_pos,
                declared: length,
                file_size: self.file_size,
            });
        }
        if length < DESCRIPTOR_FIXED_SIZE {
            return Err(Error::DescriptorTooShort {
                offset: self.cur_pos,
                declared: length,
            });
        }
        // reread from the record start so the length prefix stays part of it
        self.reader.seek(SeekFrom::Start(self.cur_pos))?;
        let record = self.reader.read_len(length as usize)?;
        let descriptor = PartitionDescriptor::parse(&record)?;
        self.cur_pos += length as u64;
        Ok(descriptor)
    }
}

impl<R: Read + Seek> Iterator for Partitions<'_, R> {
    type Item = Result<PartitionDescriptor, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.remaining == 0 {
            return None;
        }
        // running off the end of the file before the declared count is
        // reached just ends the list
        if self.cur_pos >= self.file_size {
            self.done = true;
            return None;
        }
        self.remaining -= 1;
        let next = self.read_next();
        if next.is_err() {
            self.done = true;
        }
        Some(next)
    }
}

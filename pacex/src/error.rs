#[derive(thiserror::Error)]
pub enum Error {
    // std errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    // container errors
    #[error(
        "file is {size} bytes, smaller than the {} byte PAC header",
        super::HEADER_SIZE
    )]
    TooSmall { size: u64 },

    #[error("header declares a negative partition count: {0}")]
    NegativePartitionCount(i32),

    #[error(
        "descriptor at {offset:#x} declares {declared} bytes, reading past end of file ({file_size} bytes)"
    )]
    TruncatedDescriptor {
        offset: u64,
        declared: u32,
        file_size: u64,
    },

    #[error(
        "descriptor at {offset:#x} declares {declared} bytes, shorter than the {} byte fixed region",
        super::DESCRIPTOR_FIXED_SIZE
    )]
    DescriptorTooShort { offset: u64, declared: u32 },

    #[error("partition \"{name}\" ends at {end:#x}, past end of file ({file_size} bytes)")]
    PayloadOutOfBounds {
        name: String,
        end: u64,
        file_size: u64,
    },
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

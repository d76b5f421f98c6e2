mod descriptor;
mod error;
mod ext;
mod header;
mod pac;

pub use {descriptor::*, error::*, header::*, pac::*};

/// Total size of the fixed container header at file offset 0.
pub const HEADER_SIZE: u64 = 1220;

/// Size of the fixed-field region of a partition descriptor. Records declare
/// their own total length but can never be shorter than this.
pub const DESCRIPTOR_FIXED_SIZE: u32 = 1568;

/// Hard cap on decoded text length, in 16-bit units. Bounds output even for
/// malformed fields with no zero terminator.
pub const MAX_STRING_UNITS: usize = 256;

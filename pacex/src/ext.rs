use byteorder::{ReadBytesExt, LE};

pub trait ReadExt {
    fn read_len(&mut self, len: usize) -> Result<Vec<u8>, super::Error>;
    fn read_ucs2(&mut self, units: usize) -> Result<String, super::Error>;
}

impl<R: std::io::Read> ReadExt for R {
    fn read_len(&mut self, len: usize) -> Result<Vec<u8>, super::Error> {
        let mut buf = vec![0; len];
        self.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Reads a fixed-capacity text field of `units` 16-bit slots and decodes
    /// it. Always consumes the full field, wherever decoding stopped.
    fn read_ucs2(&mut self, units: usize) -> Result<String, super::Error> {
        let mut buf = Vec::with_capacity(units);
        for _ in 0..units {
            buf.push(self.read_u16::<LE>()?);
        }
        Ok(decode_narrow(&buf))
    }
}

/// Decodes narrow-in-wide-slot text: one ASCII byte in the low half of each
/// 16-bit unit, terminated by a zero unit. Output is capped at
/// [`MAX_STRING_UNITS`](super::MAX_STRING_UNITS) characters so a
/// non-terminated field cannot produce unbounded text.
pub fn decode_narrow(units: &[u16]) -> String {
    units
        .iter()
        .take(super::MAX_STRING_UNITS)
        .take_while(|&&unit| unit != 0)
        .map(|&unit| (unit & 0xff) as u8 as char)
        .collect()
}

#[cfg(test)]
mod test {
    use super::decode_narrow;

    #[test]
    fn empty_field() {
        assert_eq!(decode_narrow(&[]), "");
        assert_eq!(decode_narrow(&[0, 0x62, 0x63]), "");
    }

    #[test]
    fn terminated_field() {
        let units = [0x62, 0x6f, 0x6f, 0x74, 0, 0x78, 0x78];
        assert_eq!(decode_narrow(&units), "boot");
    }

    #[test]
    fn high_byte_discarded() {
        assert_eq!(decode_narrow(&[0x2f41, 0x0042, 0]), "AB");
    }

    #[test]
    fn non_terminated_field_capped() {
        let units = [0x61u16; 300];
        let decoded = decode_narrow(&units);
        assert_eq!(decoded.len(), 256);
        assert!(decoded.bytes().all(|b| b == b'a'));
    }
}

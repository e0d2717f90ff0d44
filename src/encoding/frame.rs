//! Length-prefixed framing shared by collections and composite routing keys.
//!
//! ```text
//! Collection:
//! ├── Count (2 bytes, big-endian)
//! └── Element (repeated Count times)
//!     ├── Length (2 bytes, big-endian, 0 for a null element)
//!     └── Bytes
//!
//! Composite routing key fragment:
//! ├── Length (2 bytes, big-endian)
//! ├── Bytes
//! └── Terminator (0x00)
//! ```

use alloc::vec::Vec;

use super::constants::frame::{COMPOSITE_TERMINATOR, PREFIX_LEN};
use crate::errors::Error;

/// Converts a size into its 2-byte prefix, rejecting sizes that do not fit.
fn prefix(size: usize, what: &'static str) -> Result<[u8; PREFIX_LEN], Error> {
    u16::try_from(size)
        .map(u16::to_be_bytes)
        .map_err(|_| Error::TooLarge { what, size })
}

/// Appends a collection element count.
pub(crate) fn write_count(
    out: &mut Vec<u8>,
    count: usize,
    what: &'static str,
) -> Result<(), Error> {
    out.extend(prefix(count, what)?);
    Ok(())
}

/// Appends a length-prefixed element; `None` is framed as a zero length with no body.
pub(crate) fn write_prefixed(out: &mut Vec<u8>, bytes: Option<&[u8]>) -> Result<(), Error> {
    let bytes = bytes.unwrap_or_default();
    out.extend(prefix(bytes.len(), "collection element")?);
    out.extend_from_slice(bytes);
    Ok(())
}

/// Appends one composite routing key fragment: length, bytes, terminator.
pub(crate) fn write_fragment(out: &mut Vec<u8>, fragment: &[u8]) -> Result<(), Error> {
    out.extend(prefix(fragment.len(), "routing key fragment")?);
    out.extend_from_slice(fragment);
    out.push(COMPOSITE_TERMINATOR);
    Ok(())
}

/// Number of bytes a framed composite fragment occupies.
#[inline]
pub(crate) fn fragment_len(fragment: &[u8]) -> usize {
    PREFIX_LEN + fragment.len() + 1
}

/// Cursor over a collection body.
pub(crate) struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    #[inline]
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes left to read.
    #[inline]
    pub(crate) fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Reads a 2-byte big-endian count or length.
    pub(crate) fn read_u16(&mut self) -> Result<usize, Error> {
        let bytes = self.read_slice(PREFIX_LEN)?;
        Ok(usize::from(u16::from_be_bytes([bytes[0], bytes[1]])))
    }

    /// Reads exactly `len` bytes.
    pub(crate) fn read_slice(&mut self, len: usize) -> Result<&'a [u8], Error> {
        if len > self.remaining() {
            return Err(Error::UnexpectedEof(self.data.len()));
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Reads a 2-byte length followed by that many bytes.
    pub(crate) fn read_prefixed(&mut self) -> Result<&'a [u8], Error> {
        let len = self.read_u16()?;
        self.read_slice(len)
    }

    /// Fails if any byte is left unread.
    pub(crate) fn finish(&self) -> Result<(), Error> {
        if self.remaining() == 0 {
            Ok(())
        } else {
            Err(Error::TrailingBytes(self.pos))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_prefixed_element() {
        let mut out = Vec::new();
        write_prefixed(&mut out, Some(&[0xaa, 0xbb][..])).unwrap();
        write_prefixed(&mut out, None).unwrap();
        assert_eq!(out, vec![0x00, 0x02, 0xaa, 0xbb, 0x00, 0x00]);
    }

    #[test]
    fn test_fragment_framing() {
        let mut out = Vec::new();
        write_fragment(&mut out, &[0x03, 0x03]).unwrap();
        assert_eq!(out, vec![0x00, 0x02, 0x03, 0x03, 0x00]);
        assert_eq!(fragment_len(&[0x03, 0x03]), out.len());
    }

    #[test]
    fn test_oversized_prefix() {
        const MAX_PREFIXED: usize = u16::MAX as usize;
        let big = vec![0u8; MAX_PREFIXED + 1];
        let mut out = Vec::new();
        assert_eq!(
            write_prefixed(&mut out, Some(big.as_slice())),
            Err(Error::TooLarge {
                what: "collection element",
                size: MAX_PREFIXED + 1
            })
        );
        assert!(write_count(&mut out, MAX_PREFIXED, "list").is_ok());
    }

    #[test]
    fn test_reader() {
        let data = [0x00u8, 0x01, 0x7f, 0x09];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.read_prefixed().unwrap(), &[0x7f]);
        assert_eq!(reader.finish(), Err(Error::TrailingBytes(3)));
        assert_eq!(reader.read_u16(), Err(Error::UnexpectedEof(4)));
    }
}

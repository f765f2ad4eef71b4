// this_file: crates/scanglyph-sfnt/src/reader.rs

//! Big-endian reads over a byte slice.
//!
//! Every read goes through `slice::get`, so running off the end of a table
//! is a [`FontFormatError::UnexpectedEof`] rather than a panic. The `context`
//! names the table being read so the error says where it happened.

use scanglyph_core::FontFormatError;

pub type ReadResult<T> = Result<T, FontFormatError>;

/// A cursor over one table's bytes
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
    context: &'static str,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8], context: &'static str) -> Self {
        Self {
            data,
            pos: 0,
            context,
        }
    }

    /// A reader positioned at `pos`; positions past the end fail on first read
    pub fn at(data: &'a [u8], pos: usize, context: &'static str) -> Self {
        Self { data, pos, context }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn set_position(&mut self, pos: usize) -> ReadResult<()> {
        if pos > self.data.len() {
            return Err(self.eof_at(pos));
        }
        self.pos = pos;
        Ok(())
    }

    pub fn skip(&mut self, n: usize) -> ReadResult<()> {
        self.take(n).map(|_| ())
    }

    pub fn bytes(&mut self, n: usize) -> ReadResult<&'a [u8]> {
        self.take(n)
    }

    #[inline]
    pub fn read_u8(&mut self) -> ReadResult<u8> {
        Ok(self.take(1)?[0])
    }

    #[inline]
    pub fn read_u16(&mut self) -> ReadResult<u16> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    #[inline]
    pub fn read_i16(&mut self) -> ReadResult<i16> {
        self.read_u16().map(|v| v as i16)
    }

    #[inline]
    pub fn read_u32(&mut self) -> ReadResult<u32> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_tag(&mut self) -> ReadResult<[u8; 4]> {
        let b = self.take(4)?;
        Ok([b[0], b[1], b[2], b[3]])
    }

    fn take(&mut self, n: usize) -> ReadResult<&'a [u8]> {
        let end = self.pos.checked_add(n).ok_or_else(|| self.eof_at(self.pos))?;
        let slice = self.data.get(self.pos..end).ok_or_else(|| self.eof_at(self.pos))?;
        self.pos = end;
        Ok(slice)
    }

    fn eof_at(&self, offset: usize) -> FontFormatError {
        FontFormatError::UnexpectedEof {
            context: self.context,
            offset,
        }
    }
}

/// Stateless big-endian u16 at `pos`
#[inline]
pub fn read_u16_at(data: &[u8], pos: usize) -> Option<u16> {
    let b = data.get(pos..pos.checked_add(2)?)?;
    Some(u16::from_be_bytes([b[0], b[1]]))
}

/// Stateless big-endian u32 at `pos`
#[inline]
pub fn read_u32_at(data: &[u8], pos: usize) -> Option<u32> {
    let b = data.get(pos..pos.checked_add(4)?)?;
    Some(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}

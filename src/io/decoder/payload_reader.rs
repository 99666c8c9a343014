//! Little-endian field reader over one record payload.
//!
//! Every array read checks the remaining length before allocating, so a
//! corrupt count never triggers a huge allocation or a read into the next
//! record; it fails with [`DecodeError::Truncated`] instead.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::DecodeError;
use crate::io::constants::sizes;
use crate::types::{BoundingBox2D, Point};

/// Cursor over a payload buffer that remembers where the payload sits in the file.
pub struct PayloadReader<'a> {
    data: &'a [u8],
    position: usize,
    base_offset: u64,
}

impl<'a> PayloadReader<'a> {
    /// `base_offset` is the absolute file offset of `data[0]`, used in errors.
    pub fn new(data: &'a [u8], base_offset: u64) -> Self {
        PayloadReader {
            data,
            position: 0,
            base_offset,
        }
    }

    /// Bytes consumed so far
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes left in the payload
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    fn truncated(&self) -> DecodeError {
        DecodeError::Truncated {
            offset: self.base_offset + self.position as u64,
        }
    }

    /// Fail unless at least `len` more bytes are available.
    pub fn ensure(&self, len: usize) -> Result<(), DecodeError> {
        if len > self.remaining() {
            return Err(self.truncated());
        }
        Ok(())
    }

    /// Fail unless `count` items of `item_size` bytes fit in the rest of the payload.
    fn ensure_items(&self, count: usize, item_size: usize) -> Result<usize, DecodeError> {
        let len = count
            .checked_mul(item_size)
            .ok_or_else(|| self.truncated())?;
        self.ensure(len)?;
        Ok(len)
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        self.ensure(len)?;
        let bytes = &self.data[self.position..self.position + len];
        self.position += len;
        Ok(bytes)
    }

    pub fn read_i32(&mut self) -> Result<i32, DecodeError> {
        Ok(LittleEndian::read_i32(self.take(sizes::INT)?))
    }

    pub fn read_f64(&mut self) -> Result<f64, DecodeError> {
        Ok(LittleEndian::read_f64(self.take(sizes::DOUBLE)?))
    }

    /// One (x, y) pair
    pub fn read_point(&mut self) -> Result<Point, DecodeError> {
        let bytes = self.take(sizes::POINT)?;
        Ok(Point::new(
            LittleEndian::read_f64(&bytes[..8]),
            LittleEndian::read_f64(&bytes[8..]),
        ))
    }

    /// `[xmin, ymin, xmax, ymax]`
    pub fn read_box(&mut self) -> Result<BoundingBox2D, DecodeError> {
        let mut values = [0f64; 4];
        LittleEndian::read_f64_into(self.take(sizes::BOX)?, &mut values);
        Ok(BoundingBox2D::from_array(values))
    }

    /// `[min, max]` of a Z or M array
    pub fn read_range(&mut self) -> Result<[f64; 2], DecodeError> {
        let mut values = [0f64; 2];
        LittleEndian::read_f64_into(self.take(sizes::RANGE)?, &mut values);
        Ok(values)
    }

    /// A declared element count; negative counts are corruption.
    pub fn read_count(&mut self, what: &str) -> Result<usize, DecodeError> {
        let value = self.read_i32()?;
        usize::try_from(value)
            .map_err(|_| DecodeError::Corrupt(format!("negative {what} count {value}")))
    }

    pub fn read_points(&mut self, count: usize) -> Result<Vec<Point>, DecodeError> {
        let len = self.ensure_items(count, sizes::POINT)?;
        let bytes = self.take(len)?;
        Ok(bytes
            .chunks_exact(sizes::POINT)
            .map(|chunk| {
                Point::new(
                    LittleEndian::read_f64(&chunk[..8]),
                    LittleEndian::read_f64(&chunk[8..]),
                )
            })
            .collect())
    }

    pub fn read_doubles(&mut self, count: usize) -> Result<Vec<f64>, DecodeError> {
        let len = self.ensure_items(count, sizes::DOUBLE)?;
        let mut values = vec![0f64; count];
        LittleEndian::read_f64_into(self.take(len)?, &mut values);
        Ok(values)
    }

    pub fn read_ints(&mut self, count: usize) -> Result<Vec<i32>, DecodeError> {
        let len = self.ensure_items(count, sizes::INT)?;
        let mut values = vec![0i32; count];
        LittleEndian::read_i32_into(self.take(len)?, &mut values);
        Ok(values)
    }

    /// Part start indices; each must lie in `0..=num_points` and none may
    /// be smaller than the one before it. The first part starts at point 0,
    /// and a shape with points has at least one part.
    pub fn read_parts(&mut self, num_parts: usize, num_points: usize) -> Result<Vec<i32>, DecodeError> {
        if num_parts == 0 && num_points > 0 {
            return Err(DecodeError::Corrupt(format!(
                "{num_points} points but no parts"
            )));
        }
        let parts = self.read_ints(num_parts)?;
        if let Some(&first) = parts.first() {
            if first != 0 {
                return Err(DecodeError::Corrupt(format!(
                    "first part starts at point {first}, not 0"
                )));
            }
        }
        let mut previous = 0i32;
        for (i, &start) in parts.iter().enumerate() {
            if start < previous || start as i64 > num_points as i64 {
                return Err(DecodeError::Corrupt(format!(
                    "part {i} starts at point {start} (previous {previous}, {num_points} points)"
                )));
            }
            previous = start;
        }
        Ok(parts)
    }
}

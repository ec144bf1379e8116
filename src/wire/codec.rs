//! Little-endian primitives shared by the schema and chunk codecs.
//!
//! Writes go straight into a `BytesMut`. Reads go through [`Reader`], which checks the
//! remaining length before every `Buf` call so malformed input surfaces as
//! `MinframeError::Wire` rather than a panic.

use bytes::{Buf, BufMut, BytesMut};

use crate::enums::error::MinframeError;

/// Fixed-width values with a little-endian wire form.
pub(crate) trait WireNative: Copy {
    const WIDTH: usize;
    fn put(self, buf: &mut BytesMut);
    /// Caller guarantees `WIDTH` bytes remain.
    fn get(buf: &mut &[u8]) -> Self;
}

macro_rules! impl_wire_native {
    ($($t:ty => $put:ident, $get:ident);* $(;)?) => {$(
        impl WireNative for $t {
            const WIDTH: usize = size_of::<$t>();

            #[inline]
            fn put(self, buf: &mut BytesMut) {
                buf.$put(self)
            }

            #[inline]
            fn get(buf: &mut &[u8]) -> Self {
                buf.$get()
            }
        }
    )*};
}

impl_wire_native!(
    i8 => put_i8, get_i8;
    i16 => put_i16_le, get_i16_le;
    i32 => put_i32_le, get_i32_le;
    i64 => put_i64_le, get_i64_le;
    u8 => put_u8, get_u8;
    u16 => put_u16_le, get_u16_le;
    u32 => put_u32_le, get_u32_le;
    u64 => put_u64_le, get_u64_le;
    f32 => put_f32_le, get_f32_le;
    f64 => put_f64_le, get_f64_le;
    i128 => put_i128_le, get_i128_le;
);

pub(crate) fn put_values<T: WireNative>(buf: &mut BytesMut, values: &[T]) {
    buf.reserve(values.len() * T::WIDTH);
    for v in values {
        v.put(buf);
    }
}

/// Length-prefixed UTF-8.
pub(crate) fn put_str(buf: &mut BytesMut, s: &str) -> Result<(), MinframeError> {
    buf.put_u32_le(wire_u32(s.len(), "string length")?);
    buf.put_slice(s.as_bytes());
    Ok(())
}

pub(crate) fn wire_u32(n: usize, what: &str) -> Result<u32, MinframeError> {
    u32::try_from(n).map_err(|_| MinframeError::Wire(format!("{what} {n} exceeds u32")))
}

/// Bounds-checked cursor over an encoded payload.
pub(crate) struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    #[inline]
    pub(crate) fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    fn need(&self, n: usize, what: &str) -> Result<(), MinframeError> {
        if self.buf.remaining() < n {
            return Err(MinframeError::Wire(format!(
                "truncated {what}: need {n} bytes, {} left",
                self.buf.remaining()
            )));
        }
        Ok(())
    }

    pub(crate) fn value<T: WireNative>(&mut self, what: &str) -> Result<T, MinframeError> {
        self.need(T::WIDTH, what)?;
        Ok(T::get(&mut self.buf))
    }

    /// `n` values of `T`; the byte count is checked before anything is allocated.
    pub(crate) fn values<T: WireNative>(
        &mut self,
        n: usize,
        what: &str,
    ) -> Result<Vec<T>, MinframeError> {
        let bytes = n
            .checked_mul(T::WIDTH)
            .ok_or_else(|| MinframeError::Wire(format!("{what}: {n} values overflow")))?;
        self.need(bytes, what)?;
        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            out.push(T::get(&mut self.buf));
        }
        Ok(out)
    }

    pub(crate) fn bytes(&mut self, n: usize, what: &str) -> Result<&'a [u8], MinframeError> {
        self.need(n, what)?;
        let (head, tail) = self.buf.split_at(n);
        self.buf = tail;
        Ok(head)
    }

    pub(crate) fn str(&mut self, what: &str) -> Result<String, MinframeError> {
        let n = self.value::<u32>(what)? as usize;
        let raw = self.bytes(n, what)?;
        String::from_utf8(raw.to_vec())
            .map_err(|_| MinframeError::Wire(format!("{what} is not valid UTF-8")))
    }

    /// A `u64` length that must fit in `usize`.
    pub(crate) fn len(&mut self, what: &str) -> Result<usize, MinframeError> {
        let n = self.value::<u64>(what)?;
        usize::try_from(n).map_err(|_| MinframeError::Wire(format!("{what} {n} exceeds usize")))
    }

    pub(crate) fn flag(&mut self, what: &str) -> Result<bool, MinframeError> {
        match self.value::<u8>(what)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(MinframeError::Wire(format!("{what}: bad flag byte {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_is_bounds_checked() {
        let mut buf = BytesMut::new();
        put_str(&mut buf, "héllo").unwrap();
        put_values(&mut buf, &[1i16, -2]);
        buf.put_u8(2);
        let mut r = Reader::new(&buf);
        assert_eq!(r.str("name").unwrap(), "héllo");
        assert_eq!(r.values::<i16>(2, "vals").unwrap(), vec![1, -2]);
        assert!(matches!(r.flag("flag"), Err(MinframeError::Wire(_))));
        assert_eq!(r.remaining(), 0);
        assert!(matches!(r.value::<u32>("more"), Err(MinframeError::Wire(_))));
        assert!(r.values::<u64>(usize::MAX, "huge").is_err());
    }
}

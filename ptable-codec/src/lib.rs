//! Fixed-layout little-endian codec for on-disk structures.
//!
//! Every type implementing [`Codec`] has an exact encoded length, `SIZE`.
//! Structures are declared with [`codec!`], which lays the fields out
//! back-to-back in declaration order with no padding.

mod error;

pub use error::{DecodeError, EncodeError};

use std::mem::MaybeUninit;

pub trait Codec: Sized {
    /// The exact number of bytes produced by `encode` and consumed by `decode`.
    const SIZE: usize;

    /// Decodes a value from the front of `reader`, advancing it by `SIZE` bytes.
    fn decode(reader: &mut &[u8]) -> Result<Self, DecodeError>;

    /// Appends exactly `SIZE` bytes to `writer`.
    fn encode(&self, writer: &mut Vec<u8>);
}

/// Splits `len` bytes off the front of `reader`.
#[inline]
pub fn take<'a>(reader: &mut &'a [u8], len: usize) -> Result<&'a [u8], DecodeError> {
    if reader.len() < len {
        return Err(DecodeError::TooShort {
            needed: len,
            actual: reader.len(),
        });
    }

    let (head, tail) = reader.split_at(len);
    *reader = tail;
    Ok(head)
}

/// Decodes a `T` from the first `T::SIZE` bytes of `bytes`.
///
/// Trailing bytes are ignored.
pub fn decode<T: Codec>(bytes: &[u8]) -> Result<T, DecodeError> {
    let mut reader = take(&mut &bytes[..], T::SIZE)?;
    T::decode(&mut reader)
}

/// Encodes `value` into a freshly allocated buffer of exactly `T::SIZE` bytes.
pub fn encode<T: Codec>(value: &T) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(T::SIZE);
    value.encode(&mut buffer);
    debug_assert_eq!(buffer.len(), T::SIZE);
    buffer
}

impl<T: Codec, const N: usize> Codec for [T; N] {
    const SIZE: usize = T::SIZE * N;

    #[inline]
    fn decode(reader: &mut &[u8]) -> Result<Self, DecodeError> {
        let mut bytes = take(reader, Self::SIZE)?;
        let mut data = MaybeUninit::<[T; N]>::uninit();
        let first = data.as_mut_ptr() as *mut T;

        for i in 0..N {
            let x = T::decode(&mut bytes)?;

            // SAFETY: `i < N`, and each slot is written exactly once.
            unsafe { first.add(i).write(x) };
        }

        // SAFETY: the loop above initialized all `N` slots.
        Ok(unsafe { data.assume_init() })
    }

    #[inline]
    fn encode(&self, writer: &mut Vec<u8>) {
        for item in self {
            item.encode(writer);
        }
    }
}

macro_rules! implint {
    ($($t:ident)+) => {
        $(
            impl Codec for $t {
                const SIZE: usize = std::mem::size_of::<$t>();

                #[inline]
                fn decode(reader: &mut &[u8]) -> Result<Self, DecodeError> {
                    let mut bytes = Self::default().to_ne_bytes();
                    bytes.copy_from_slice(take(reader, Self::SIZE)?);
                    Ok(Self::from_le_bytes(bytes))
                }

                #[inline]
                fn encode(&self, writer: &mut Vec<u8>) {
                    writer.extend_from_slice(&self.to_le_bytes())
                }
            }
        )+
    };
}

implint! {
    u8 u16 u32 u64 u128
    i8 i16 i32 i64 i128
}

/// Declares one or more structs along with their [`Codec`] implementation.
///
/// Fields are encoded in declaration order and every field type must itself
/// implement [`Codec`].
#[macro_export]
macro_rules! codec {
    () => {};

    (
        $(#[$($sattr:meta)+])*
        $vis:vis struct $name:ident {
            $(
                $(#[$($fattr:meta)+])*
                $v:vis $field:ident: $kind:ty
            ),* $(,)?
        }
        $($next:tt)*
    ) => {
        $(#[$($sattr)+])*
        $vis struct $name {
            $(
                $(#[$($fattr)+])*
                $v $field: $kind
            ),*
        }

        impl $crate::Codec for $name {
            const SIZE: usize = 0 $(+ <$kind as $crate::Codec>::SIZE)*;

            fn decode(reader: &mut &[u8]) -> Result<Self, $crate::DecodeError> {
                Ok(Self {
                    $($field: <$kind as $crate::Codec>::decode(reader)?),*
                })
            }

            fn encode(&self, writer: &mut Vec<u8>) {
                $($crate::Codec::encode(&self.$field, writer);)*
            }
        }

        $crate::codec! { $($next)* }
    };
}

#[cfg(test)]
mod test {
    use super::*;

    codec! {
        #[derive(Clone, Debug, PartialEq)]
        struct Pair {
            tag: [u8; 3],
            value: u32,
        }

        #[derive(Clone, Debug, PartialEq)]
        struct Nested {
            pairs: [Pair; 2],
            tail: u16,
        }
    }

    #[test]
    fn integers() {
        assert_eq!(decode::<u16>(&[0x55, 0xaa]).unwrap(), 0xaa55);
        assert_eq!(decode::<u32>(&[1, 2, 3, 4, 5]).unwrap(), 0x0403_0201);
        assert_eq!(encode(&0x0102_0304_0506_0708u64), [8, 7, 6, 5, 4, 3, 2, 1]);
        assert_eq!(encode(&-2i16), [0xfe, 0xff]);
    }

    #[test]
    fn size() {
        assert_eq!(<[u8; 440]>::SIZE, 440);
        assert_eq!(<[u32; 4]>::SIZE, 16);
        assert_eq!(Pair::SIZE, 7);
        assert_eq!(Nested::SIZE, 16);
    }

    #[test]
    fn layout() {
        let nested = Nested {
            pairs: [
                Pair {
                    tag: *b"abc",
                    value: 0x11223344,
                },
                Pair {
                    tag: *b"xyz",
                    value: 1,
                },
            ],
            tail: 0xbeef,
        };

        let bytes = encode(&nested);
        assert_eq!(
            bytes,
            [
                b'a', b'b', b'c', 0x44, 0x33, 0x22, 0x11, //
                b'x', b'y', b'z', 1, 0, 0, 0, //
                0xef, 0xbe,
            ]
        );
        assert_eq!(decode::<Nested>(&bytes).unwrap(), nested);
    }

    #[test]
    fn reader_advances() {
        let bytes = [1u8, 0, 2, 0, 3];
        let mut reader = &bytes[..];
        assert_eq!(u16::decode(&mut reader).unwrap(), 1);
        assert_eq!(u16::decode(&mut reader).unwrap(), 2);
        assert_eq!(reader, &[3]);
    }

    #[test]
    fn too_short() {
        assert_eq!(
            decode::<Nested>(&[0; 15]).unwrap_err(),
            DecodeError::TooShort {
                needed: 16,
                actual: 15
            }
        );

        let mut reader = &[0u8; 3][..];
        assert_eq!(
            u32::decode(&mut reader).unwrap_err(),
            DecodeError::TooShort {
                needed: 4,
                actual: 3
            }
        );
        assert_eq!(reader.len(), 3);
    }

    #[test]
    fn trailing_ignored() {
        let mut bytes = vec![0xffu8; Nested::SIZE];
        bytes.extend_from_slice(&[0; 8]);
        let nested: Nested = decode(&bytes).unwrap();
        assert_eq!(nested.tail, 0xffff);
        assert_eq!(encode(&nested), &bytes[..Nested::SIZE]);
    }
}

//! Type descriptors: a type name followed by its parameters, recursively.

use bytes::{BufMut, BytesMut};

use super::codec::{Reader, put_str, wire_u32};
use crate::enums::error::MinframeError;
use crate::enums::logical_type::{IntegerType, LogicalType, StructField, TypeName};

/// Nesting limit for decoded types.
const MAX_DEPTH: usize = 64;

pub(crate) fn put_type(buf: &mut BytesMut, dtype: &LogicalType) -> Result<(), MinframeError> {
    put_str(buf, &dtype.type_name())?;
    match dtype {
        LogicalType::FixedSizeBinary(width) => buf.put_u32_le(wire_u32(*width, "opaque width")?),
        LogicalType::Decimal128 { precision, scale } => {
            buf.put_u8(*precision);
            buf.put_i8(*scale);
        }
        LogicalType::List(elem) => put_type(buf, elem)?,
        LogicalType::Struct(fields) => {
            buf.put_u32_le(wire_u32(fields.len(), "struct field count")?);
            for f in fields.iter() {
                put_str(buf, &f.name)?;
                put_type(buf, &f.dtype)?;
            }
        }
        LogicalType::Dictionary { value, index, .. } => {
            put_str(buf, &index.logical_type().type_name())?;
            put_type(buf, value)?;
        }
        LogicalType::Null
        | LogicalType::Boolean
        | LogicalType::Int8
        | LogicalType::Int16
        | LogicalType::Int32
        | LogicalType::Int64
        | LogicalType::UInt8
        | LogicalType::UInt16
        | LogicalType::UInt32
        | LogicalType::UInt64
        | LogicalType::Float32
        | LogicalType::Float64
        | LogicalType::Date32
        | LogicalType::Date64
        | LogicalType::Time32(_)
        | LogicalType::Time64(_)
        | LogicalType::Timestamp(_)
        | LogicalType::String
        | LogicalType::Binary => {}
    }
    Ok(())
}

pub(crate) fn read_type(r: &mut Reader<'_>) -> Result<LogicalType, MinframeError> {
    read_type_at(r, 0)
}

fn read_type_at(r: &mut Reader<'_>, depth: usize) -> Result<LogicalType, MinframeError> {
    if depth > MAX_DEPTH {
        return Err(MinframeError::Wire(format!(
            "type nesting deeper than {MAX_DEPTH}"
        )));
    }
    let name = r.str("type name")?;
    let dtype = match LogicalType::from_type_name(&name)? {
        TypeName::Complete(t) => t,
        TypeName::Opaque => LogicalType::FixedSizeBinary(r.value::<u32>("opaque width")? as usize),
        TypeName::Decimal128 => LogicalType::Decimal128 {
            precision: r.value::<u8>("decimal precision")?,
            scale: r.value::<i8>("decimal scale")?,
        },
        TypeName::List => LogicalType::list(read_type_at(r, depth + 1)?),
        TypeName::Struct => {
            let n = r.value::<u32>("struct field count")?;
            let mut fields = Vec::new();
            for _ in 0..n {
                let name = r.str("struct field name")?;
                fields.push(StructField::new(name, read_type_at(r, depth + 1)?));
            }
            LogicalType::Struct(fields.into())
        }
        kind @ (TypeName::Factor | TypeName::Ordered) => {
            let index_name = r.str("dictionary index type")?;
            let index = match LogicalType::from_type_name(&index_name)? {
                TypeName::Complete(t) => IntegerType::from_logical(&t),
                _ => None,
            }
            .ok_or_else(|| {
                MinframeError::Wire(format!("'{index_name}' is not a dictionary index type"))
            })?;
            let value = read_type_at(r, depth + 1)?;
            LogicalType::dictionary(value, index, kind == TypeName::Ordered)
        }
    };
    dtype.validate()?;
    Ok(dtype)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::time_units::TimeUnit;

    fn roundtrip(dtype: &LogicalType) -> LogicalType {
        let mut buf = BytesMut::new();
        put_type(&mut buf, dtype).unwrap();
        let mut r = Reader::new(&buf);
        let back = read_type(&mut r).unwrap();
        assert_eq!(r.remaining(), 0);
        back
    }

    #[test]
    fn test_nested_types_survive() {
        let dtype = LogicalType::struct_of([
            ("when", LogicalType::Timestamp(TimeUnit::Nanoseconds)),
            (
                "tags",
                LogicalType::list(LogicalType::dictionary(
                    LogicalType::String,
                    IntegerType::UInt16,
                    true,
                )),
            ),
            ("blob", LogicalType::FixedSizeBinary(16)),
            (
                "price",
                LogicalType::Decimal128 {
                    precision: 12,
                    scale: -2,
                },
            ),
        ]);
        assert_eq!(roundtrip(&dtype), dtype);
    }

    #[test]
    fn test_rejects_unknown_and_bad_index() {
        let mut buf = BytesMut::new();
        put_str(&mut buf, "map").unwrap();
        assert!(matches!(
            read_type(&mut Reader::new(&buf)),
            Err(MinframeError::UnsupportedType(_))
        ));

        let mut buf = BytesMut::new();
        put_str(&mut buf, "factor").unwrap();
        put_str(&mut buf, "float32").unwrap();
        put_str(&mut buf, "utf8").unwrap();
        assert!(matches!(
            read_type(&mut Reader::new(&buf)),
            Err(MinframeError::Wire(_))
        ));
    }

    #[test]
    fn test_depth_limit() {
        let mut buf = BytesMut::new();
        for _ in 0..=MAX_DEPTH + 1 {
            put_str(&mut buf, "list").unwrap();
        }
        put_str(&mut buf, "int8").unwrap();
        assert!(matches!(
            read_type(&mut Reader::new(&buf)),
            Err(MinframeError::Wire(_))
        ));
    }
}

//! # **LogicalType Module** - *Closed, parameterised runtime type tags*
//!
//! Runtime description of what an [`Array`](crate::Array) holds.
//!
//! ## Overview
//! - [`LogicalType`] is a closed sum type: primitives, temporal types with units, variable and
//!   fixed-width binary, decimals, and the nested `List`, `Struct`, and `Dictionary` forms.
//! - Equality is exact. Units, widths, precision/scale, field names and types, dictionary
//!   value and index types, and the ordering flag all take part. There is no coercion.
//! - Nested parameters sit behind `Arc`, so cloning a deep type is cheap and dictionary
//!   value types can be shared between arrays.
//!
//! ## Tags
//! [`TypeTag`] mirrors the variants without parameters. Typed access dispatches on the tag
//! first, then on the parameters.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::enums::error::MinframeError;
use crate::enums::time_units::TimeUnit;

/// # LogicalType
///
/// Runtime type of an array.
///
/// ## Behaviour
/// - Immutable once constructed; construct nested types with [`LogicalType::list`],
///   [`LogicalType::struct_of`], and [`LogicalType::dictionary`].
/// - `validate` rejects parameter combinations that no array can carry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogicalType {
    Null,
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    /// Days since the epoch.
    Date32,
    /// Milliseconds since the epoch.
    Date64,
    Time32(TimeUnit),
    Time64(TimeUnit),
    Timestamp(TimeUnit),
    String,
    Binary,
    FixedSizeBinary(usize),
    Decimal128 {
        precision: u8,
        scale: i8,
    },
    List(Arc<LogicalType>),
    Struct(Arc<[StructField]>),
    Dictionary {
        value: Arc<LogicalType>,
        index: IntegerType,
        ordered: bool,
    },
}

/// # StructField
///
/// A named child of a `Struct` logical type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructField {
    pub name: String,
    pub dtype: LogicalType,
}

impl StructField {
    pub fn new(name: impl Into<String>, dtype: LogicalType) -> Self {
        Self {
            name: name.into(),
            dtype,
        }
    }
}

/// # TypeName
///
/// Result of resolving a wire type name. Everything but `Complete` is followed by
/// parameters in the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeName {
    Complete(LogicalType),
    /// `u32` width.
    Opaque,
    /// `u8` precision, `i8` scale.
    Decimal128,
    /// Element type.
    List,
    /// Field count, then name and type per field.
    Struct,
    /// Index type name, then value type.
    Factor,
    Ordered,
}

/// # IntegerType
///
/// Integer widths usable as dictionary indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntegerType {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
}

impl IntegerType {
    /// The logical type of an index array with this width.
    pub fn logical_type(&self) -> LogicalType {
        match self {
            IntegerType::Int8 => LogicalType::Int8,
            IntegerType::Int16 => LogicalType::Int16,
            IntegerType::Int32 => LogicalType::Int32,
            IntegerType::Int64 => LogicalType::Int64,
            IntegerType::UInt8 => LogicalType::UInt8,
            IntegerType::UInt16 => LogicalType::UInt16,
            IntegerType::UInt32 => LogicalType::UInt32,
            IntegerType::UInt64 => LogicalType::UInt64,
        }
    }

    /// Inverse of [`IntegerType::logical_type`].
    pub fn from_logical(dtype: &LogicalType) -> Option<Self> {
        match dtype {
            LogicalType::Int8 => Some(IntegerType::Int8),
            LogicalType::Int16 => Some(IntegerType::Int16),
            LogicalType::Int32 => Some(IntegerType::Int32),
            LogicalType::Int64 => Some(IntegerType::Int64),
            LogicalType::UInt8 => Some(IntegerType::UInt8),
            LogicalType::UInt16 => Some(IntegerType::UInt16),
            LogicalType::UInt32 => Some(IntegerType::UInt32),
            LogicalType::UInt64 => Some(IntegerType::UInt64),
            _ => None,
        }
    }

    /// Largest index value representable, as `u64`.
    pub fn max_index(&self) -> u64 {
        match self {
            IntegerType::Int8 => i8::MAX as u64,
            IntegerType::Int16 => i16::MAX as u64,
            IntegerType::Int32 => i32::MAX as u64,
            IntegerType::Int64 => i64::MAX as u64,
            IntegerType::UInt8 => u8::MAX as u64,
            IntegerType::UInt16 => u16::MAX as u64,
            IntegerType::UInt32 => u32::MAX as u64,
            IntegerType::UInt64 => u64::MAX,
        }
    }
}

/// # TypeTag
///
/// Parameter-free discriminant of [`LogicalType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Null,
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Date32,
    Date64,
    Time32,
    Time64,
    Timestamp,
    String,
    Binary,
    FixedSizeBinary,
    Decimal128,
    List,
    Struct,
    Dictionary,
}

impl LogicalType {
    /// `List` of `elem`.
    pub fn list(elem: LogicalType) -> Self {
        LogicalType::List(Arc::new(elem))
    }

    /// `Struct` with the given `(name, type)` fields, in order.
    pub fn struct_of<N: Into<String>>(fields: impl IntoIterator<Item = (N, LogicalType)>) -> Self {
        LogicalType::Struct(
            fields
                .into_iter()
                .map(|(n, t)| StructField::new(n, t))
                .collect(),
        )
    }

    /// `Dictionary` of `value` entries addressed by `index` integers.
    pub fn dictionary(value: LogicalType, index: IntegerType, ordered: bool) -> Self {
        LogicalType::Dictionary {
            value: Arc::new(value),
            index,
            ordered,
        }
    }

    /// Parameter-free tag of this type.
    pub fn tag(&self) -> TypeTag {
        match self {
            LogicalType::Null => TypeTag::Null,
            LogicalType::Boolean => TypeTag::Boolean,
            LogicalType::Int8 => TypeTag::Int8,
            LogicalType::Int16 => TypeTag::Int16,
            LogicalType::Int32 => TypeTag::Int32,
            LogicalType::Int64 => TypeTag::Int64,
            LogicalType::UInt8 => TypeTag::UInt8,
            LogicalType::UInt16 => TypeTag::UInt16,
            LogicalType::UInt32 => TypeTag::UInt32,
            LogicalType::UInt64 => TypeTag::UInt64,
            LogicalType::Float32 => TypeTag::Float32,
            LogicalType::Float64 => TypeTag::Float64,
            LogicalType::Date32 => TypeTag::Date32,
            LogicalType::Date64 => TypeTag::Date64,
            LogicalType::Time32(_) => TypeTag::Time32,
            LogicalType::Time64(_) => TypeTag::Time64,
            LogicalType::Timestamp(_) => TypeTag::Timestamp,
            LogicalType::String => TypeTag::String,
            LogicalType::Binary => TypeTag::Binary,
            LogicalType::FixedSizeBinary(_) => TypeTag::FixedSizeBinary,
            LogicalType::Decimal128 { .. } => TypeTag::Decimal128,
            LogicalType::List(_) => TypeTag::List,
            LogicalType::Struct(_) => TypeTag::Struct,
            LogicalType::Dictionary { .. } => TypeTag::Dictionary,
        }
    }

    /// Checks parameters recursively.
    ///
    /// Fails with `UnsupportedType` for combinations outside the supported set.
    pub fn validate(&self) -> Result<(), MinframeError> {
        match self {
            LogicalType::Time32(u) if !matches!(u, TimeUnit::Seconds | TimeUnit::Milliseconds) => {
                Err(MinframeError::UnsupportedType(format!(
                    "time32 requires s or ms, got {u}"
                )))
            }
            LogicalType::Time64(u)
                if !matches!(u, TimeUnit::Microseconds | TimeUnit::Nanoseconds) =>
            {
                Err(MinframeError::UnsupportedType(format!(
                    "time64 requires us or ns, got {u}"
                )))
            }
            LogicalType::Timestamp(TimeUnit::Days) => Err(MinframeError::UnsupportedType(
                "timestamp cannot use a day unit".into(),
            )),
            LogicalType::FixedSizeBinary(0) => Err(MinframeError::UnsupportedType(
                "fixed size binary width must be positive".into(),
            )),
            LogicalType::Decimal128 { precision, scale } => {
                if *precision == 0 || *precision > 38 {
                    return Err(MinframeError::UnsupportedType(format!(
                        "decimal128 precision {precision} outside 1..=38"
                    )));
                }
                if *scale as i16 > *precision as i16 {
                    return Err(MinframeError::UnsupportedType(format!(
                        "decimal128 scale {scale} exceeds precision {precision}"
                    )));
                }
                Ok(())
            }
            LogicalType::List(elem) => elem.validate(),
            LogicalType::Struct(fields) => fields.iter().try_for_each(|f| f.dtype.validate()),
            LogicalType::Dictionary { value, .. } => {
                if matches!(**value, LogicalType::Dictionary { .. }) {
                    return Err(MinframeError::UnsupportedType(
                        "dictionary of dictionary".into(),
                    ));
                }
                value.validate()
            }
            _ => Ok(()),
        }
    }

    /// Name used by the wire schema. Nested types return their constructor name only.
    pub fn type_name(&self) -> String {
        match self {
            LogicalType::Null => "null".into(),
            LogicalType::Boolean => "bool".into(),
            LogicalType::Int8 => "int8".into(),
            LogicalType::Int16 => "int16".into(),
            LogicalType::Int32 => "int32".into(),
            LogicalType::Int64 => "int64".into(),
            LogicalType::UInt8 => "uint8".into(),
            LogicalType::UInt16 => "uint16".into(),
            LogicalType::UInt32 => "uint32".into(),
            LogicalType::UInt64 => "uint64".into(),
            LogicalType::Float32 => "float32".into(),
            LogicalType::Float64 => "float64".into(),
            LogicalType::Date32 => "date[d]".into(),
            LogicalType::Date64 => "date[ms]".into(),
            LogicalType::Time32(u) | LogicalType::Time64(u) => format!("time[{u}]"),
            LogicalType::Timestamp(u) => format!("timestamp[{u}]"),
            LogicalType::String => "utf8".into(),
            LogicalType::Binary => "bytes".into(),
            LogicalType::FixedSizeBinary(_) => "opaque".into(),
            LogicalType::Decimal128 { .. } => "decimal128".into(),
            LogicalType::List(_) => "list".into(),
            LogicalType::Struct(_) => "struct".into(),
            LogicalType::Dictionary { ordered: true, .. } => "ordered".into(),
            LogicalType::Dictionary { ordered: false, .. } => "factor".into(),
        }
    }

    /// Inverse of [`LogicalType::type_name`].
    ///
    /// Parameterised constructors come back as their [`TypeName`] so the caller can read
    /// the parameters. Names outside the closed set, including `union`, `interval`, `map`,
    /// `float16` and `duration`, fail with `UnsupportedType`.
    pub fn from_type_name(name: &str) -> Result<TypeName, MinframeError> {
        let plain = match name {
            "null" => LogicalType::Null,
            "bool" => LogicalType::Boolean,
            "int8" => LogicalType::Int8,
            "int16" => LogicalType::Int16,
            "int32" => LogicalType::Int32,
            "int64" => LogicalType::Int64,
            "uint8" => LogicalType::UInt8,
            "uint16" => LogicalType::UInt16,
            "uint32" => LogicalType::UInt32,
            "uint64" => LogicalType::UInt64,
            "float32" => LogicalType::Float32,
            "float64" => LogicalType::Float64,
            "date[d]" => LogicalType::Date32,
            "date[ms]" => LogicalType::Date64,
            "utf8" => LogicalType::String,
            "bytes" => LogicalType::Binary,
            "opaque" => return Ok(TypeName::Opaque),
            "decimal128" => return Ok(TypeName::Decimal128),
            "list" => return Ok(TypeName::List),
            "struct" => return Ok(TypeName::Struct),
            "factor" => return Ok(TypeName::Factor),
            "ordered" => return Ok(TypeName::Ordered),
            other => return Self::from_unit_name(other).map(TypeName::Complete),
        };
        Ok(TypeName::Complete(plain))
    }

    fn from_unit_name(name: &str) -> Result<LogicalType, MinframeError> {
        let unsupported = || MinframeError::UnsupportedType(format!("unknown type name '{name}'"));
        let (ctor, rest) = name.split_once('[').ok_or_else(unsupported)?;
        let unit = rest
            .strip_suffix(']')
            .and_then(TimeUnit::from_suffix)
            .ok_or_else(unsupported)?;
        let dtype = match (ctor, unit) {
            ("time", TimeUnit::Seconds | TimeUnit::Milliseconds) => LogicalType::Time32(unit),
            ("time", TimeUnit::Microseconds | TimeUnit::Nanoseconds) => LogicalType::Time64(unit),
            ("timestamp", _) => LogicalType::Timestamp(unit),
            _ => return Err(unsupported()),
        };
        dtype.validate()?;
        Ok(dtype)
    }

    /// Signed or unsigned integers.
    pub fn is_integer(&self) -> bool {
        IntegerType::from_logical(self).is_some()
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, LogicalType::Float32 | LogicalType::Float64)
    }

    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            LogicalType::Date32
                | LogicalType::Date64
                | LogicalType::Time32(_)
                | LogicalType::Time64(_)
                | LogicalType::Timestamp(_)
        )
    }

    /// Variable or fixed-width byte payloads.
    pub fn is_binary_like(&self) -> bool {
        matches!(
            self,
            LogicalType::String | LogicalType::Binary | LogicalType::FixedSizeBinary(_)
        )
    }

    pub fn is_nested(&self) -> bool {
        matches!(
            self,
            LogicalType::List(_) | LogicalType::Struct(_) | LogicalType::Dictionary { .. }
        )
    }
}

impl Display for IntegerType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.logical_type(), f)
    }
}

impl Display for LogicalType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            LogicalType::Null => f.write_str("Null"),
            LogicalType::Boolean => f.write_str("Boolean"),
            LogicalType::Int8 => f.write_str("Int8"),
            LogicalType::Int16 => f.write_str("Int16"),
            LogicalType::Int32 => f.write_str("Int32"),
            LogicalType::Int64 => f.write_str("Int64"),
            LogicalType::UInt8 => f.write_str("UInt8"),
            LogicalType::UInt16 => f.write_str("UInt16"),
            LogicalType::UInt32 => f.write_str("UInt32"),
            LogicalType::UInt64 => f.write_str("UInt64"),
            LogicalType::Float32 => f.write_str("Float32"),
            LogicalType::Float64 => f.write_str("Float64"),
            LogicalType::Date32 => f.write_str("Date32"),
            LogicalType::Date64 => f.write_str("Date64"),
            LogicalType::Time32(unit) => write!(f, "Time32({unit})"),
            LogicalType::Time64(unit) => write!(f, "Time64({unit})"),
            LogicalType::Timestamp(unit) => write!(f, "Timestamp({unit})"),
            LogicalType::String => f.write_str("String"),
            LogicalType::Binary => f.write_str("Binary"),
            LogicalType::FixedSizeBinary(w) => write!(f, "FixedSizeBinary({w})"),
            LogicalType::Decimal128 { precision, scale } => {
                write!(f, "Decimal128({precision}, {scale})")
            }
            LogicalType::List(elem) => write!(f, "List({elem})"),
            LogicalType::Struct(fields) => {
                f.write_str("Struct(")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", field.name, field.dtype)?;
                }
                f.write_str(")")
            }
            LogicalType::Dictionary {
                value,
                index,
                ordered,
            } => {
                let kind = if *ordered { "Ordered" } else { "Dictionary" };
                write!(f, "{kind}({value}, {index})")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_equality() {
        assert_ne!(LogicalType::Int32, LogicalType::Int64);
        assert_ne!(
            LogicalType::Timestamp(TimeUnit::Milliseconds),
            LogicalType::Timestamp(TimeUnit::Nanoseconds)
        );
        assert_ne!(
            LogicalType::dictionary(LogicalType::String, IntegerType::Int32, false),
            LogicalType::dictionary(LogicalType::String, IntegerType::UInt32, false)
        );
        assert_ne!(
            LogicalType::dictionary(LogicalType::String, IntegerType::Int32, false),
            LogicalType::dictionary(LogicalType::String, IntegerType::Int32, true)
        );
        assert_eq!(
            LogicalType::list(LogicalType::struct_of([("a", LogicalType::Float64)])),
            LogicalType::list(LogicalType::struct_of([("a", LogicalType::Float64)]))
        );
        assert_ne!(
            LogicalType::struct_of([("a", LogicalType::Float64)]),
            LogicalType::struct_of([("b", LogicalType::Float64)])
        );
    }

    #[test]
    fn test_validate() {
        assert!(LogicalType::Time32(TimeUnit::Milliseconds).validate().is_ok());
        assert!(matches!(
            LogicalType::Time32(TimeUnit::Nanoseconds).validate(),
            Err(MinframeError::UnsupportedType(_))
        ));
        assert!(LogicalType::Time64(TimeUnit::Seconds).validate().is_err());
        assert!(LogicalType::Timestamp(TimeUnit::Days).validate().is_err());
        assert!(LogicalType::FixedSizeBinary(0).validate().is_err());
        assert!(
            LogicalType::Decimal128 {
                precision: 39,
                scale: 0
            }
            .validate()
            .is_err()
        );
        assert!(
            LogicalType::Decimal128 {
                precision: 10,
                scale: 2
            }
            .validate()
            .is_ok()
        );
        let nested_dict = LogicalType::dictionary(
            LogicalType::dictionary(LogicalType::String, IntegerType::UInt8, false),
            IntegerType::UInt8,
            false,
        );
        assert!(nested_dict.validate().is_err());
        let deep = LogicalType::list(LogicalType::Time32(TimeUnit::Microseconds));
        assert!(deep.validate().is_err());
    }

    #[test]
    fn test_tags_and_categories() {
        assert_eq!(LogicalType::Time32(TimeUnit::Seconds).tag(), TypeTag::Time32);
        assert!(LogicalType::UInt16.is_integer());
        assert!(!LogicalType::Float32.is_integer());
        assert!(LogicalType::Date64.is_temporal());
        assert!(LogicalType::FixedSizeBinary(4).is_binary_like());
        assert!(LogicalType::list(LogicalType::Null).is_nested());
    }

    #[test]
    fn test_display_and_names() {
        let t = LogicalType::struct_of([
            ("x", LogicalType::Int32),
            ("y", LogicalType::list(LogicalType::String)),
        ]);
        assert_eq!(t.to_string(), "Struct(x: Int32, y: List(String))");
        assert_eq!(t.type_name(), "struct");
        assert_eq!(
            LogicalType::Timestamp(TimeUnit::Microseconds).type_name(),
            "timestamp[us]"
        );
        assert_eq!(LogicalType::Date32.type_name(), "date[d]");
        assert_eq!(
            LogicalType::dictionary(LogicalType::String, IntegerType::Int8, true).type_name(),
            "ordered"
        );
    }

    #[test]
    fn test_from_type_name() {
        for t in [
            LogicalType::Boolean,
            LogicalType::UInt64,
            LogicalType::Date64,
            LogicalType::Time32(TimeUnit::Milliseconds),
            LogicalType::Time64(TimeUnit::Nanoseconds),
            LogicalType::Timestamp(TimeUnit::Seconds),
            LogicalType::Binary,
        ] {
            assert_eq!(
                LogicalType::from_type_name(&t.type_name()).unwrap(),
                TypeName::Complete(t)
            );
        }
        assert_eq!(
            LogicalType::from_type_name("ordered").unwrap(),
            TypeName::Ordered
        );
        for bad in ["union", "interval", "map", "float16", "duration", "time[d]", "timestamp[d]", "bogus"] {
            assert!(matches!(
                LogicalType::from_type_name(bad),
                Err(MinframeError::UnsupportedType(_))
            ));
        }
    }

    #[test]
    fn test_index_limits() {
        assert_eq!(IntegerType::Int8.max_index(), 127);
        assert_eq!(IntegerType::UInt16.max_index(), 65_535);
        assert_eq!(
            IntegerType::from_logical(&LogicalType::UInt32),
            Some(IntegerType::UInt32)
        );
        assert_eq!(IntegerType::from_logical(&LogicalType::Float32), None);
    }
}

//! # Field Module - *Column metadata*
//!
//! A `Field` captures a column's name, logical type, nullability, and optional lightweight
//! key-value metadata. It holds no row data; pair it with a [`Column`](crate::Column).

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::Array;
use crate::enums::logical_type::LogicalType;

/// Global counter for unnamed fields
static UNNAMED_FIELD_COUNTER: AtomicUsize = AtomicUsize::new(1);

/// # Field
///
/// ## Description
/// - Column name, [`LogicalType`], nullability, and a few key-value pairs.
/// - Fields are cloned often; keep metadata small.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub dtype: LogicalType,
    pub nullable: bool,
    pub metadata: BTreeMap<String, String>,
}

impl Field {
    /// Constructs a new `Field`. If the provided name is empty or only whitespace,
    /// a globally unique name like `UnnamedField1` is generated.
    pub fn new<T: Into<String>>(
        name: T,
        dtype: LogicalType,
        nullable: bool,
        metadata: Option<BTreeMap<String, String>>,
    ) -> Self {
        let mut name = name.into();
        if name.trim().is_empty() {
            let id = UNNAMED_FIELD_COUNTER.fetch_add(1, Ordering::Relaxed);
            name = format!("UnnamedField{id}");
        }
        Field {
            name,
            dtype,
            nullable,
            metadata: metadata.unwrap_or_default(),
        }
    }

    /// Field describing `array`: its logical type, nullable when it holds any null.
    pub fn from_array(
        name: impl Into<String>,
        array: &Array,
        metadata: Option<BTreeMap<String, String>>,
    ) -> Self {
        Field::new(name, array.logical_type(), array.null_count() > 0, metadata)
    }

    /// Same field under another name.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Field {
            name: name.into(),
            ..self.clone()
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Field \"{}\": {}{}",
            self.name,
            self.dtype,
            if self.nullable { " (nullable)" } else { "" }
        )?;
        if !self.metadata.is_empty() {
            write!(f, " [")?;
            for (i, (k, v)) in self.metadata.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{k}: {v}")?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{arr_i32, arr_str_opt};

    #[test]
    fn test_unnamed_fields_get_unique_names() {
        let a = Field::new("", LogicalType::Int32, false, None);
        let b = Field::new("  ", LogicalType::Int32, false, None);
        assert!(a.name.starts_with("UnnamedField"));
        assert_ne!(a.name, b.name);
    }

    #[test]
    fn test_from_array() {
        let f = Field::from_array("ids", &arr_i32![1, 2], None);
        assert_eq!(f.dtype, LogicalType::Int32);
        assert!(!f.nullable);
        let f = Field::from_array("names", &arr_str_opt![None], None);
        assert!(f.nullable);
    }

    #[test]
    fn test_display() {
        let mut meta = BTreeMap::new();
        meta.insert("unit".to_string(), "kg".to_string());
        let f = Field::new("w", LogicalType::Float64, true, Some(meta));
        assert_eq!(f.to_string(), "Field \"w\": Float64 (nullable) [unit: kg]");
        assert_eq!(f.renamed("mass").name, "mass");
    }
}

//! Copyright © 2025 Peter Garfield Bower. All rights reserved.
//!
//! # **Minframe** - *Strongly-typed columnar tables*
//!
//! Tables of named, equal-length columns over nullable arrays that carry a runtime
//! [`LogicalType`], with a bridge to compile-time types on top.
//!
//! ## Layers
//! - **Arrays**: [`Array`] is a closed enum over inner arrays (`IntegerArray<T>`,
//!   `StringArray`, `ListArray`, `StructArray`, `DictionaryArray`, ...). Slicing is zero-copy.
//! - **Typed access**: [`LogicalTyped`] maps Rust types and markers (`i32`, `String`,
//!   [`List<T>`], [`Struct<(A, B)>`], [`Dict<T, I>`], ...) to logical types. [`cast`] checks an
//!   array's type exactly and returns a [`View`]; [`Builder`] constructs arrays from values.
//! - **Chunks**: [`bind`] concatenates same-typed chunks, recursing through nested types and
//!   re-unifying dictionaries; [`split`] partitions an array into zero-copy chunks.
//! - **Tables**: [`ChunkedArray`], [`Column`], and [`Table`], with [`Consolidate`] to bind
//!   chunked data into contiguous arrays.
//! - **Wire** (feature `wire`): binary table format in [`wire`].
//!
//! ## Example
//! ```rust
//! use minframe::{Builder, List, View, bind, split};
//!
//! let mut b = Builder::<List<i32>>::new().unwrap();
//! b.append(vec![Some(1), None]).unwrap();
//! b.append_null().unwrap();
//! b.append(vec![Some(3)]).unwrap();
//! let arr = b.finish().unwrap();
//!
//! let chunks = split(&arr, 2).unwrap();
//! let whole = bind(&chunks).unwrap().unwrap();
//! assert_eq!(whole, arr);
//!
//! let view = arr.view::<List<i32>>().unwrap();
//! assert_eq!(view.get(0).unwrap().to_vec(), vec![Some(1), None]);
//! assert!(view.is_null(1));
//! ```
//!
//! ## Features
//! - `wire` (default): binary table format, via `bytes`.
//! - `parallel_proc`: binds table columns on the Rayon pool.
//! - `fast_hash`: `ahash` maps for dictionary uniquing and re-unification.

pub mod enums {
    pub mod array;
    pub mod error;
    pub mod logical_type;
    pub mod time_units;
}

pub mod structs {
    pub mod chunked {
        pub mod chunked_array;
    }

    pub mod variants {
        pub mod boolean;
        pub mod datetime;
        pub mod decimal;
        pub mod dictionary;
        pub mod fixed_binary;
        pub mod float;
        pub mod integer;
        pub mod list;
        pub mod string;
        pub mod struct_array;
    }
    pub mod bitmask;
    pub mod buffer;
    pub mod column;
    pub mod field;
    pub mod table;
}

pub mod traits {
    pub mod concatenate;
    pub mod consolidate;
    pub mod masked_array;
    pub mod type_unions;
}

pub mod typed {
    pub mod access;
    pub mod builder;
    pub mod cast;
    pub mod registry;
    pub mod view;
}

pub mod kernels {
    pub mod bind;
    pub mod dict_key;
    pub mod equality;
    pub mod split;
}

#[cfg(feature = "wire")]
pub mod wire;

pub mod macros;
pub mod utils;

pub use enums::array::Array;
pub use enums::error::MinframeError;
pub use enums::logical_type::{IntegerType, LogicalType, StructField, TypeName, TypeTag};
pub use enums::time_units::TimeUnit;

pub use structs::bitmask::Bitmask;
pub use structs::buffer::Buffer;
pub use structs::chunked::chunked_array::ChunkedArray;
pub use structs::column::Column;
pub use structs::field::Field;
pub use structs::table::Table;
pub use structs::variants::boolean::BooleanArray;
pub use structs::variants::datetime::DatetimeArray;
pub use structs::variants::decimal::DecimalArray;
pub use structs::variants::dictionary::DictionaryArray;
pub use structs::variants::fixed_binary::FixedSizeBinaryArray;
pub use structs::variants::float::FloatArray;
pub use structs::variants::integer::IntegerArray;
pub use structs::variants::list::ListArray;
pub use structs::variants::string::{BinaryArray, StringArray};
pub use structs::variants::struct_array::StructArray;

pub use traits::concatenate::Concatenate;
pub use traits::consolidate::Consolidate;
pub use traits::masked_array::MaskedArray;
pub use traits::type_unions::{Float, Integer, Primitive};

pub use typed::builder::{ArrayBuilder, Builder};
pub use typed::cast::{cast, cast_native};
pub use typed::registry::{
    Binary, Date32, Date64, Decimal, Dict, DictEncodable, FixedBinary, IndexType, List,
    LogicalTyped, Microsecond, Millisecond, Nanosecond, Second, Struct, StructFields, Time32,
    Time64, Timestamp, ValueAccess,
};
pub use typed::view::{ValueOf, View, ViewIter};

pub use kernels::bind::bind;
pub use kernels::equality::array_equals;
pub use kernels::split::split;

#[cfg(feature = "wire")]
pub use wire::{WriterOptions, read_table, write_table};

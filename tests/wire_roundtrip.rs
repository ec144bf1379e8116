//! Tables survive the wire format regardless of how the writer chunks them.

use minframe::wire::{WriterOptions, read_table, write_table};
use minframe::{
    Builder, ChunkedArray, Consolidate, Date32, Dict, List, MinframeError, Nanosecond, Struct,
    Table, Time64, arr_i32, arr_str, bind, split,
};
use rstest::{fixture, rstest};

#[fixture]
fn table() -> Table {
    let _ = env_logger::builder().is_test(true).try_init();
    let n = 50;
    let mut t = Table::new("events", vec![]).unwrap();
    t.set_values::<i64, i64>("id", (0..n).map(Some)).unwrap();
    t.set_values::<String, String>(
        "label",
        (0..n).map(|i| (i % 6 != 0).then(|| format!("event-{i}"))),
    )
    .unwrap();
    t.set_values::<Date32, i32>("day", (0..n).map(|i| Some(19_000 + i as i32)))
        .unwrap();
    t.set_values::<Time64<Nanosecond>, i64>(
        "at",
        (0..n).map(|i| (i % 4 != 0).then_some(i * 1_000)),
    )
    .unwrap();
    t.set_values::<List<f64>, Vec<Option<f64>>>(
        "samples",
        (0..n).map(|i| (i % 10 != 9).then(|| (0..i % 3).map(|j| Some(j as f64)).collect())),
    )
    .unwrap();
    t.set_values::<Struct<(bool, String)>, (Option<bool>, Option<String>)>(
        "flags",
        (0..n).map(|i| Some((Some(i % 2 == 0), (i % 3 == 0).then(|| "x".to_string())))),
    )
    .unwrap();
    t.set_values::<Dict<String, i8, true>, String>(
        "level",
        (0..n).map(|i| Some(["low", "mid", "high"][i as usize % 3].to_string())),
    )
    .unwrap();
    t
}

#[rstest]
fn roundtrip_for_any_chunk_size(
    table: Table,
    #[values(None, Some(1), Some(3), Some(49), Some(50), Some(4096))] max_chunk_len: Option<usize>,
) {
    let opts = WriterOptions { max_chunk_len };
    let bytes = write_table(&table, &opts).unwrap();
    let back = read_table(&bytes).unwrap();
    assert_eq!(back, table);
    assert_eq!(back.name, "events");
    assert_eq!(back.schema(), table.schema());
    assert_eq!(back.n_rows(), 50);
}

#[rstest]
fn chunked_and_sliced_columns(table: Table) {
    let window = table.slice_rows(7, 31).unwrap().split_rows(5).unwrap();
    let back = read_table(&write_table(&window, &WriterOptions::default()).unwrap()).unwrap();
    assert_eq!(back, window);
    assert_eq!(back, window.clone().consolidate().unwrap());
    assert!(back.cols().iter().all(|c| c.data().n_chunks() == 1));
}

#[rstest]
fn payload_is_chunking_independent(table: Table) {
    let merged = write_table(&table, &WriterOptions::default()).unwrap();
    let rechunked = table.split_rows(8).unwrap().consolidate().unwrap();
    assert_eq!(
        write_table(&rechunked, &WriterOptions::default()).unwrap(),
        merged
    );
}

#[test]
fn column_assembled_from_separate_dictionaries() {
    let mut left = Builder::<Dict<String, u8>>::new().unwrap();
    left.extend(["a", "b"]).unwrap();
    let mut right = Builder::<Dict<String, u8>>::new().unwrap();
    right.extend(["c", "a"]).unwrap();
    let data =
        ChunkedArray::from_chunks(vec![left.finish().unwrap(), right.finish().unwrap()]).unwrap();
    let mut t = Table::new("dicts", vec![]).unwrap();
    t.set_column("d", data).unwrap();
    let back = read_table(&write_table(&t, &WriterOptions::default()).unwrap()).unwrap();
    assert_eq!(back, t);
}

#[test]
fn corrupt_payloads_fail_cleanly() {
    let t = Table::from_arrays("t", vec![("a", arr_i32![1, 2, 3]), ("b", arr_str!["x", "y", "z"])])
        .unwrap();
    let bytes = write_table(&t, &WriterOptions::with_max_chunk_len(2)).unwrap();
    for cut in [0, 3, 8, 20, bytes.len() / 2, bytes.len() - 1] {
        assert!(read_table(&bytes[..cut]).is_err(), "truncated at {cut}");
    }
    let mut wrong_magic = bytes.to_vec();
    wrong_magic[0] = b'X';
    assert!(matches!(read_table(&wrong_magic), Err(MinframeError::Wire(_))));

    // Overwrite the first column's type name with an unsupported one of equal length.
    let mut unknown = bytes.to_vec();
    let pos = unknown.windows(5).position(|w| w == b"int32").unwrap();
    unknown[pos..pos + 5].copy_from_slice(b"map32");
    assert!(matches!(
        read_table(&unknown),
        Err(MinframeError::UnsupportedType(_))
    ));
}

#[test]
fn writer_splits_do_not_leak_into_reader() {
    let array = arr_i32![1, 2, 3, 4, 5, 6, 7];
    let t = Table::from_arrays("s", vec![("v", array.clone())]).unwrap();
    let back = read_table(&write_table(&t, &WriterOptions::with_max_chunk_len(3)).unwrap()).unwrap();
    let col = back.column("v").unwrap().to_array().unwrap();
    assert_eq!(col, array);
    assert_eq!(bind(&split(&col, 3).unwrap()).unwrap().unwrap(), array);
}

#[test]
fn oversized_null_chunks_are_rejected() {
    fn put_str(buf: &mut Vec<u8>, s: &str) {
        buf.extend_from_slice(&(s.len() as u32).to_le_bytes());
        buf.extend_from_slice(s.as_bytes());
    }
    let mut payload = b"MFRM".to_vec();
    payload.extend_from_slice(&1u32.to_le_bytes());
    put_str(&mut payload, "t");
    payload.extend_from_slice(&1u32.to_le_bytes());
    put_str(&mut payload, "n");
    put_str(&mut payload, "null");
    payload.extend_from_slice(&2u32.to_le_bytes());
    for _ in 0..2 {
        payload.extend_from_slice(&(1u64 << 63).to_le_bytes());
        payload.push(0);
    }
    assert!(matches!(read_table(&payload), Err(MinframeError::Wire(_))));
}

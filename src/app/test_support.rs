//! Shared fixtures for unit tests

use std::path::Path;
use std::sync::Arc;

use parquet::data_type::Int32Type;
use parquet::file::properties::WriterProperties;
use parquet::file::writer::SerializedFileWriter;
use parquet::schema::parser::parse_message_type;

/// A small but fully well-formed parquet file as raw bytes
pub(crate) fn minimal_parquet_bytes() -> Vec<u8> {
    let schema = Arc::new(parse_message_type("message trip { required int32 id; }").unwrap());
    let props = Arc::new(WriterProperties::builder().build());

    let mut writer = SerializedFileWriter::new(Vec::new(), schema, props).unwrap();
    let mut row_group = writer.next_row_group().unwrap();
    let mut column = row_group.next_column().unwrap().unwrap();
    column
        .typed::<Int32Type>()
        .write_batch(&[1, 2, 3], None, None)
        .unwrap();
    column.close().unwrap();
    row_group.close().unwrap();
    writer.into_inner().unwrap()
}

/// Write a well-formed parquet file at the given path
pub(crate) fn write_minimal_parquet(path: &Path) {
    std::fs::write(path, minimal_parquet_bytes()).unwrap();
}

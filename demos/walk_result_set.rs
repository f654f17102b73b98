//! Walk a result set in both fetch modes.
//!
//! Run with: RUST_LOG=mariadb_resultset=debug cargo run --example walk_result_set

use mariadb_resultset::protocol::constants::*;
use mariadb_resultset::{
    ColumnMetadata, Execution, IterRowStream, RawField, RawRow, ResultSet, ResultSetOptions,
    RowSource,
};
use tracing_subscriber::EnvFilter;

fn columns() -> Vec<ColumnMetadata> {
    vec![
        ColumnMetadata::new("id", MYSQL_TYPE_LONG).with_flags(NOT_NULL_FLAG | PRI_KEY_FLAG),
        ColumnMetadata::new("name", MYSQL_TYPE_VAR_STRING),
        ColumnMetadata::new("born", MYSQL_TYPE_DATE),
        ColumnMetadata::new("avatar", MYSQL_TYPE_BLOB).with_charset(CHARSET_BINARY),
    ]
}

fn rows() -> Vec<RawRow> {
    vec![
        RawRow::new(vec![
            RawField::from("1"),
            RawField::from("alice"),
            RawField::from("1990-04-12"),
            RawField::new(vec![0x89u8, b'P', b'N', b'G']),
        ]),
        RawRow::new(vec![
            RawField::from("2"),
            RawField::null(),
            RawField::from("1985-11-30"),
            RawField::null(),
        ]),
        RawRow::new(vec![
            RawField::from("3"),
            RawField::from("carol"),
            RawField::null(),
            RawField::null(),
        ]),
    ]
}

fn print_rows(rs: &mut ResultSet) -> mariadb_resultset::Result<()> {
    println!("  columns: {}", rs.column_names().join(", "));
    for record in rs.records() {
        let record = record?;
        let fields: Vec<String> = record
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect();
        println!("  {}", fields.join(" "));
    }
    println!("  rows: {}", rs.row_count());
    Ok(())
}

fn main() -> mariadb_resultset::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .init();

    println!("--- buffered ---");
    let mut rs = ResultSet::buffered(columns(), rows())?;
    print_rows(&mut rs)?;

    rs.seek(1)?;
    let name: Option<String> = rs.get("name")?;
    println!("  row 2 name after seek: {:?}", name);

    println!("\n--- streaming ---");
    let execution = Execution::Rows {
        columns: columns(),
        rows: RowSource::stream(IterRowStream::from_rows(rows())),
    };
    let mut rs = ResultSet::new(execution, &ResultSetOptions::streaming())?;
    print_rows(&mut rs)?;
    if let Err(e) = rs.reset() {
        println!("  reset: {}", e);
    }
    rs.close();

    println!("\n--- command ---");
    let rs = ResultSet::new(
        Execution::Command { affected_rows: 7 },
        &ResultSetOptions::default(),
    )?;
    println!("  affected rows: {:?}", rs.affected_rows());

    Ok(())
}

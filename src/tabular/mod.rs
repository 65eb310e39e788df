// Generic delimited-table reading and standardized TSV writing.
pub mod parser;
pub mod writer;

pub use parser::{read_csv, read_delimited, read_tsv, Row, Table};
pub use writer::write_table;

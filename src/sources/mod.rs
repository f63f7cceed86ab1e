//! Input sources for the ingest pipeline.

mod csv_export;

pub use csv_export::CsvSource;

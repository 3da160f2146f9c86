pub mod csv;

pub use csv::write_batch_csv;

pub mod chart;
pub mod error;
pub mod labels;
pub mod naming;
pub mod report;
pub mod schema;
pub mod series;
pub mod table;

pub use error::TableError;
pub use table::{BenchmarkRecord, ResultTable};

pub mod report;

pub use report::{cor_da_linha, exportar_csv, RowColor};

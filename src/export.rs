//! 匯出模組
//!
//! 將日線序列序列化為逗號分隔文字，供下載或其他工具讀取。

pub mod csv_writer;

pub use csv_writer::{default_file_name, CsvExporter, ExportOptions};

/// 匯出錯誤
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV 寫入失敗: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O 錯誤: {0}")]
    Io(#[from] std::io::Error),

    #[error("輸出不是有效的 UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type ExportResult<T> = Result<T, ExportError>;

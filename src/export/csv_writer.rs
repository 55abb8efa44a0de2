use chrono::NaiveDate;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use super::ExportResult;
use crate::domain_types::{Bar, Series};

const BASE_HEADERS: [&str; 6] = ["Date", "Open", "High", "Low", "Close", "Volume"];
const PREDICTED_HEADER: &str = "Predicted";

/// 匯出選項
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// 是否輸出 Predicted 欄位
    pub include_predicted: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_predicted: true,
        }
    }
}

/// 預設檔名 `stock_data_{SYMBOL}_{YYYY-MM-DD}.csv`
pub fn default_file_name(symbol: &str, date: NaiveDate) -> String {
    format!("stock_data_{}_{}.csv", symbol, date.format("%Y-%m-%d"))
}

/// CSV 匯出器
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    options: ExportOptions,
}

impl CsvExporter {
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    fn headers(&self) -> Vec<&'static str> {
        let mut headers = BASE_HEADERS.to_vec();
        if self.options.include_predicted {
            headers.push(PREDICTED_HEADER);
        }
        headers
    }

    fn record(&self, bar: &Bar) -> Vec<String> {
        let mut record = vec![
            bar.date.format("%Y-%m-%d").to_string(),
            format!("{:.2}", bar.open),
            format!("{:.2}", bar.high),
            format!("{:.2}", bar.low),
            format!("{:.2}", bar.close),
            bar.volume.to_string(),
        ];
        if self.options.include_predicted {
            // 非預測列保留空欄位，維持欄數一致
            record.push(bar.predicted.map(|p| format!("{:.2}", p)).unwrap_or_default());
        }
        record
    }

    /// 寫入任意輸出端
    pub fn write_to<W: Write>(&self, series: &Series, writer: W) -> ExportResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(self.headers())?;
        for bar in series {
            csv_writer.write_record(self.record(bar))?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// 輸出為字串
    pub fn to_csv_string(&self, series: &Series) -> ExportResult<String> {
        let mut buffer = Vec::new();
        self.write_to(series, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// 寫入 `dir` 下的預設檔名，必要時建立目錄
    pub fn write_file(&self, series: &Series, dir: &Path, date: NaiveDate) -> ExportResult<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(default_file_name(series.symbol(), date));
        self.write_path(series, &path)?;
        Ok(path)
    }

    /// 寫入指定路徑
    pub fn write_path(&self, series: &Series, path: &Path) -> ExportResult<()> {
        let file = File::create(path)?;
        self.write_to(series, file)?;
        info!(path = %path.display(), rows = series.len(), "已匯出 CSV");
        Ok(())
    }
}

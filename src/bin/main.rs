use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use market_simulator::config::{self, ApplicationConfig, LogConfig};
use market_simulator::domain_types::{
    Accuracy, PredictionOutlook, Series, SeriesSummary, SymbolTable, TimeRange,
};
use market_simulator::export::{CsvExporter, ExportOptions};
use market_simulator::session::DashboardSession;
use market_simulator::simulation::{Clock, RngSource, SeriesGenerator, SystemClock};
use market_simulator::validator::SeriesValidator;
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// 合成股價數據產生器與簡易預測工具
#[derive(Debug, Parser)]
#[command(name = "market_simulator", version, about)]
struct Cli {
    /// 固定亂數種子，覆寫配置中的 generator.seed
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 生成日線數據
    Generate {
        #[command(flatten)]
        data: DataArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// 生成數據並預測下一個交易日收盤價
    Predict {
        #[command(flatten)]
        data: DataArgs,
        /// 指定模型準確率 (0, 100]
        #[arg(long, conflicts_with = "train")]
        accuracy: Option<f64>,
        /// 模擬訓練取得準確率
        #[arg(long)]
        train: bool,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// 生成數據並輸出區間統計
    Summary {
        #[command(flatten)]
        data: DataArgs,
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// 列出內建標的
    Symbols,
}

#[derive(Debug, Args)]
struct DataArgs {
    /// 股票代號，預設使用配置中的 generator.default_symbol
    #[arg(short, long)]
    symbol: Option<String>,
    /// 回溯天數，例如 7、14、30、90
    #[arg(short, long)]
    days: Option<TimeRange>,
}

#[derive(Debug, Args)]
struct OutputArgs {
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,
    /// 將 CSV 寫入指定檔案
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// 將 CSV 以預設檔名寫入 export.output_dir
    #[arg(long, conflicts_with = "output")]
    export: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Csv,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化配置
    let app_config = config::init_config()?;

    // 初始化日誌系統
    init_logging(&app_config.log)?;

    let seed = cli.seed.or(app_config.generator.seed);
    match cli.command {
        Command::Generate { data, output } => {
            let series = generate(app_config, &data, seed)?;
            write_series(app_config, &series, &output)?;
        }
        Command::Predict {
            data,
            accuracy,
            train,
            output,
        } => predict(app_config, &data, accuracy, train, seed, &output).await?,
        Command::Summary { data, format } => {
            let series = generate(app_config, &data, seed)?;
            print_summary(&series, format)?;
        }
        Command::Symbols => print_symbols(),
    }

    Ok(())
}

// 初始化日誌系統，輸出到 stderr 以免干擾 CSV/JSON 輸出
fn init_logging(log_config: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_config.level.to_lowercase()));

    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    let result = if log_config.format.eq_ignore_ascii_case("json") {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    result.map_err(|e| anyhow!("設置日誌系統失敗: {}", e))?;

    info!("日誌系統初始化完成");
    Ok(())
}

fn resolve_request(app_config: &ApplicationConfig, data: &DataArgs) -> Result<(String, TimeRange)> {
    let symbol = data
        .symbol
        .clone()
        .unwrap_or_else(|| app_config.generator.default_symbol.clone());
    let range = data.days.unwrap_or_else(|| app_config.generator.default_range());

    if range.days() > app_config.generator.max_days {
        return Err(anyhow!(
            "天數 {} 超過上限 {}",
            range.days(),
            app_config.generator.max_days
        ));
    }
    if !SymbolTable::builtin().is_known(&symbol) {
        warn!(symbol = %symbol, "未收錄的標的，使用預設起始價格");
    }
    Ok((symbol, range))
}

fn generate(app_config: &ApplicationConfig, data: &DataArgs, seed: Option<u64>) -> Result<Series> {
    let (symbol, range) = resolve_request(app_config, data)?;
    let generator = SeriesGenerator::new(SystemClock).with_walker(app_config.generator.walker());
    let mut rng = RngSource::from_optional_seed(seed);
    let series = generator.generate(range.days(), &symbol, &mut rng);
    check_series(&series);
    Ok(series)
}

async fn predict(
    app_config: &ApplicationConfig,
    data: &DataArgs,
    accuracy: Option<f64>,
    train: bool,
    seed: Option<u64>,
    output: &OutputArgs,
) -> Result<()> {
    let (symbol, range) = resolve_request(app_config, data)?;

    let session = DashboardSession::new(
        SeriesGenerator::new(SystemClock).with_walker(app_config.generator.walker()),
        RngSource::from_optional_seed(seed),
    )
    .with_defaults(symbol.clone(), range)
    .with_load_latency(app_config.generator.load_latency())
    .with_trainer(app_config.forecast.trainer())
    .with_forecaster(app_config.forecast.forecaster());

    session
        .load(&symbol, range)
        .await
        .ok_or_else(|| anyhow!("數據載入被取消"))?;

    if train {
        session
            .train_model()
            .await
            .ok_or_else(|| anyhow!("模型訓練被取消"))?;
    } else {
        let accuracy = match accuracy {
            Some(value) => Accuracy::new(value)?,
            None => app_config.forecast.default_accuracy(),
        };
        session.apply_accuracy(accuracy).await;
    }

    let state = session.snapshot().await;
    let series = state
        .predicted_series
        .ok_or_else(|| anyhow!("{} 沒有可用的預測", symbol))?;
    check_series(&series);

    let outlook = session
        .outlook()
        .await
        .map(|o| o.with_low_confidence_threshold(app_config.forecast.low_confidence_threshold));

    write_series(app_config, &series, output)?;
    if output.format == Format::Table {
        if let Some(outlook) = outlook {
            print_outlook(&symbol, &outlook);
        }
    }
    Ok(())
}

// 生成結果不應違反數據約束，發現時僅記錄警告
fn check_series(series: &Series) {
    let report = SeriesValidator::new().validate(series);
    if !report.is_valid() {
        warn!("{}", report.format_text());
    }
}

fn write_series(app_config: &ApplicationConfig, series: &Series, output: &OutputArgs) -> Result<()> {
    let exporter = CsvExporter::new(ExportOptions {
        include_predicted: app_config.export.include_predicted,
    });

    if let Some(path) = &output.output {
        exporter.write_path(series, path)?;
        return Ok(());
    }
    if output.export {
        let path = exporter.write_file(
            series,
            &app_config.export.output_dir(),
            SystemClock.today(),
        )?;
        println!("{}", path.display());
        return Ok(());
    }

    match output.format {
        Format::Csv => exporter.write_to(series, io::stdout().lock())?,
        Format::Json => println!("{}", serde_json::to_string_pretty(series)?),
        Format::Table => print_table(series),
    }
    Ok(())
}

fn print_table(series: &Series) {
    let market = SymbolTable::builtin().resolve(series.symbol()).market;
    println!(
        "{:<12} {:>12} {:>12} {:>12} {:>12} {:>14}",
        "Date", "Open", "High", "Low", "Close", "Volume"
    );
    for bar in series {
        let marker = if bar.is_predicted() { " *" } else { "" };
        println!(
            "{:<12} {:>12} {:>12} {:>12} {:>12} {:>14}{}",
            bar.date,
            market.format_price(bar.open),
            market.format_price(bar.high),
            market.format_price(bar.low),
            market.format_price(bar.close),
            bar.volume,
            marker
        );
    }
}

fn print_outlook(symbol: &str, outlook: &PredictionOutlook) {
    let market = SymbolTable::builtin().resolve(symbol).market;
    println!();
    println!("預測日期: {}", outlook.target_date);
    println!(
        "預測收盤: {} ({:+.2}, {:+.2}%)",
        market.format_price(outlook.predicted_close),
        outlook.change,
        outlook.change_percent
    );
    println!(
        "預期區間: {} - {}",
        market.format_price(outlook.expected_low),
        market.format_price(outlook.expected_high)
    );
    println!("模型準確率: {}", outlook.accuracy);
    if outlook.low_confidence {
        println!("準確率偏低，預測僅供參考");
    }
}

fn print_summary(series: &Series, format: Format) -> Result<()> {
    let Some(summary) = SeriesSummary::from_series(series) else {
        println!("{} 沒有數據", series.symbol());
        return Ok(());
    };

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        Format::Csv => {
            let mut writer = csv::Writer::from_writer(io::stdout().lock());
            writer.serialize(&summary)?;
            writer.flush()?;
        }
        Format::Table => {
            let market = SymbolTable::builtin().resolve(series.symbol()).market;
            println!("標的: {} ({} 筆)", series.symbol(), summary.bar_count);
            println!(
                "最新收盤: {} ({:+.2}, {:+.2}%)",
                market.format_price(summary.latest_close),
                summary.change,
                summary.percent_change
            );
            println!(
                "區間高低: {} / {} (振幅 {:.2}%)",
                market.format_price(summary.period_high),
                market.format_price(summary.period_low),
                summary.range_percent
            );
            println!("平均收盤: {}", market.format_price(summary.average_close));
            println!(
                "成交量: 平均 {:.0} / 最高 {} / 合計 {}",
                summary.average_volume, summary.highest_volume, summary.total_volume
            );
            println!("平均日振幅: {:.2}%", summary.average_daily_range_percent);
            println!("區間報酬: {:+.2}%", summary.period_return_percent);
        }
    }
    Ok(())
}

fn print_symbols() {
    println!("{:<12} {:<32} {:<8} {:>12}", "Symbol", "Name", "Market", "Base");
    for profile in SymbolTable::builtin().list() {
        println!(
            "{:<12} {:<32} {:<8} {:>12}",
            profile.symbol,
            profile.name,
            profile.market,
            profile.market.format_price(profile.base_price)
        );
    }
}

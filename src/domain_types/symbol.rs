use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 市場枚舉，決定價格顯示的貨幣符號
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum Market {
    Us,    // 美股
    India, // 印度股市
}

impl Market {
    pub fn currency_symbol(&self) -> &'static str {
        match self {
            Market::Us => "$",
            Market::India => "₹",
        }
    }

    /// 以市場貨幣格式化價格，例如 `$180.00`
    pub fn format_price(&self, price: f64) -> String {
        format!("{}{:.2}", self.currency_symbol(), price)
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Market::Us => write!(f, "US"),
            Market::India => write!(f, "India"),
        }
    }
}

/// 流動性等級，決定模擬成交量的基數
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum Liquidity {
    High,
    Standard,
}

impl Liquidity {
    /// 每日成交量基數
    pub fn volume_base(&self) -> f64 {
        match self {
            Liquidity::High => 80_000_000.0,
            Liquidity::Standard => 40_000_000.0,
        }
    }
}

/// 標的設定：名稱、市場、起始價格與流動性
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolProfile {
    pub symbol: &'static str,
    pub name: &'static str,
    pub market: Market,
    pub base_price: f64,
    pub liquidity: Liquidity,
}

impl SymbolProfile {
    const fn new(
        symbol: &'static str,
        name: &'static str,
        market: Market,
        base_price: f64,
        liquidity: Liquidity,
    ) -> Self {
        Self {
            symbol,
            name,
            market,
            base_price,
            liquidity,
        }
    }
}

/// 未知標的的預設設定
const DEFAULT_PROFILE: SymbolProfile =
    SymbolProfile::new("", "Unknown", Market::Us, 100.0, Liquidity::Standard);

static BUILTIN: Lazy<SymbolTable> = Lazy::new(|| {
    use Liquidity::{High, Standard};
    use Market::{India, Us};

    SymbolTable::new(
        vec![
            SymbolProfile::new("AAPL", "Apple Inc.", Us, 180.0, High),
            SymbolProfile::new("MSFT", "Microsoft Corporation", Us, 350.0, Standard),
            SymbolProfile::new("AMZN", "Amazon.com, Inc.", Us, 140.0, Standard),
            SymbolProfile::new("GOOGL", "Alphabet Inc.", Us, 130.0, Standard),
            SymbolProfile::new("TSLA", "Tesla, Inc.", Us, 220.0, Standard),
            SymbolProfile::new("RELIANCE", "Reliance Industries Ltd.", India, 2500.0, High),
            SymbolProfile::new("TCS", "Tata Consultancy Services Ltd.", India, 3700.0, High),
            SymbolProfile::new("HDFCBANK", "HDFC Bank Ltd.", India, 1600.0, Standard),
            SymbolProfile::new("INFY", "Infosys Ltd.", India, 1450.0, Standard),
            SymbolProfile::new("BHARTIARTL", "Bharti Airtel Ltd.", India, 950.0, Standard),
        ],
        DEFAULT_PROFILE,
    )
});

/// 標的查詢表，未收錄的代號一律解析為預設項目
#[derive(Debug, Clone)]
pub struct SymbolTable {
    entries: Vec<SymbolProfile>,
    fallback: SymbolProfile,
}

impl SymbolTable {
    pub fn new(entries: Vec<SymbolProfile>, fallback: SymbolProfile) -> Self {
        Self { entries, fallback }
    }

    /// 內建的美股與印度股票清單
    pub fn builtin() -> &'static SymbolTable {
        &BUILTIN
    }

    /// 精確比對代號（區分大小寫）
    pub fn get(&self, symbol: &str) -> Option<&SymbolProfile> {
        self.entries.iter().find(|profile| profile.symbol == symbol)
    }

    /// 解析代號；未知代號回傳預設項目
    pub fn resolve(&self, symbol: &str) -> &SymbolProfile {
        self.get(symbol).unwrap_or(&self.fallback)
    }

    pub fn is_known(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }

    pub fn fallback(&self) -> &SymbolProfile {
        &self.fallback
    }

    /// 依收錄順序列出所有標的
    pub fn list(&self) -> &[SymbolProfile] {
        &self.entries
    }
}

use config::ConfigError;
use once_cell::sync::OnceCell;
use std::path::Path;
use tracing::{debug, warn};

use crate::config::loader::{ConfigLoader, Environment};
use crate::config::types::ApplicationConfig;
use crate::config::validation::validate_config;

// 全局配置實例
static CONFIG: OnceCell<ApplicationConfig> = OnceCell::new();

/// 獲取應用程序配置實例；尚未初始化時使用預設值
pub fn get_config() -> &'static ApplicationConfig {
    CONFIG.get_or_init(|| {
        ApplicationConfig::load_from_env().unwrap_or_else(|err| {
            warn!("無法加載應用程序配置，使用預設值: {}", err);
            ApplicationConfig::default()
        })
    })
}

/// 初始化配置（在應用程序啟動時調用）
pub fn init_config() -> Result<&'static ApplicationConfig, ConfigError> {
    let app_config = ApplicationConfig::load_from_env()?;

    // 嘗試初始化全局配置
    if CONFIG.set(app_config).is_err() {
        warn!("配置已經被初始化，跳過重複初始化");
    } else {
        debug!("配置初始化成功，環境：{:?}", Environment::from_env());
    }

    Ok(get_config())
}

/// ApplicationConfig 加載方法實現
impl ApplicationConfig {
    /// 從環境變數指定的環境加載配置
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let env = Environment::from_env();
        debug!("從環境加載配置: {:?}", env);
        Self::load(env)
    }

    /// 從指定環境加載配置
    pub fn load(env: Environment) -> Result<Self, ConfigError> {
        Self::from_source(ConfigLoader::load(env)?)
    }

    /// 從指定目錄加載配置
    pub fn load_from(dir: &Path, env: Environment) -> Result<Self, ConfigError> {
        Self::from_source(ConfigLoader::load_from(dir, env)?)
    }

    fn from_source(config_source: config::Config) -> Result<Self, ConfigError> {
        // 使用 serde 反序列化配置
        let app_config: ApplicationConfig = config_source.try_deserialize()?;

        // 驗證失敗時拒絕啟動
        if let Err(err) = validate_config(&app_config) {
            warn!("配置驗證失敗: {}", err);
            return Err(ConfigError::Message(err.to_string()));
        }
        debug!("配置驗證通過");

        Ok(app_config)
    }
}

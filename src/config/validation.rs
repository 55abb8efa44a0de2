use thiserror::Error;

/// 配置驗證錯誤
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("缺少必要配置項: {0}")]
    MissingField(String),

    #[error("無效的配置值: {0}")]
    InvalidValue(String),

    #[error("配置範圍錯誤: {field} 的值 {value} 不在範圍 {min}..{max} 內")]
    RangeError {
        field: String,
        value: String,
        min: String,
        max: String,
    },
}

/// 配置驗證器trait
pub trait Validator {
    /// 驗證配置
    fn validate(&self) -> Result<(), ValidationError>;
}

/// 驗證配置區段
pub fn validate_config<T>(config: &T) -> Result<(), ValidationError>
where
    T: Validator,
{
    config.validate()
}

/// 驗證工具函數
pub struct ValidationUtils;

impl ValidationUtils {
    /// 驗證配置值是否在指定閉區間內
    pub fn in_range<T>(value: T, min: T, max: T, field_name: &str) -> Result<(), ValidationError>
    where
        T: PartialOrd + ToString,
    {
        // 以否定形式比較，使 NaN 也落入錯誤分支
        if !(value >= min && value <= max) {
            return Err(ValidationError::RangeError {
                field: field_name.to_string(),
                value: value.to_string(),
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        Ok(())
    }

    /// 驗證一個選項是否為某些值中的一個（不分大小寫）
    pub fn one_of(value: &str, options: &[&str], field_name: &str) -> Result<(), ValidationError> {
        if !options.iter().any(|option| option.eq_ignore_ascii_case(value)) {
            return Err(ValidationError::InvalidValue(format!(
                "{} 的值 {} 不是有效選項: {:?}",
                field_name, value, options
            )));
        }
        Ok(())
    }

    /// 檢查必要的字串欄位是否有值
    pub fn not_empty(value: &str, field_name: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::MissingField(field_name.to_string()));
        }
        Ok(())
    }

    /// 檢查 `lower <= upper`
    pub fn ordered(lower: f64, upper: f64, field_name: &str) -> Result<(), ValidationError> {
        if !(lower <= upper) {
            return Err(ValidationError::InvalidValue(format!(
                "{} 的下限 {} 大於上限 {}",
                field_name, lower, upper
            )));
        }
        Ok(())
    }
}

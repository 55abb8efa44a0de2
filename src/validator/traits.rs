use super::error::{ValidationError, ValidationResult};

/// 驗證器特徵
pub trait Validator {
    type Data;

    /// 驗證器名稱
    fn name(&self) -> &str;

    /// 驗證單筆記錄
    fn validate_record(&self, record: &Self::Data) -> ValidationResult<()>;

    /// 批量驗證，收集每筆失敗記錄的索引與錯誤
    fn validate_batch(&self, records: &[Self::Data]) -> Result<(), Vec<(usize, ValidationError)>> {
        let errors: Vec<_> = records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| self.validate_record(record).err().map(|e| (index, e)))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

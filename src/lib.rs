// 模組定義
pub mod config;
pub mod domain_types;
pub mod export;
pub mod session;
pub mod simulation;
pub mod utils;
pub mod validator;

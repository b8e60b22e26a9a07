//! 错误类型
//!
//! 抽取核心本身没有失败路径（畸形文档是常态，而不是异常），
//! 这里的错误只覆盖外围：文件读写、配置、序列化、指针存储。

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 序列化错误
    #[error("序列化错误: {0}")]
    Serialize(#[from] SerializeError),
    /// 指针存储错误
    #[error("指针存储错误: {0}")]
    Store(#[from] StoreError),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 配置值不合法
    #[error("配置项 {name} 不合法: {reason}")]
    InvalidValue { name: String, reason: String },
}

/// 序列化错误
#[derive(Debug, Error)]
pub enum SerializeError {
    /// JSON 编解码失败
    #[error("JSON 编解码失败: {0}")]
    Json(#[from] serde_json::Error),
    /// TOML 解析失败
    #[error("TOML 解析失败 ({path}): {source}")]
    TomlParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// TOML 生成失败
    #[error("TOML 生成失败: {0}")]
    TomlWrite(#[from] toml::ser::Error),
}

/// 指针存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    /// 锁被毒化（持锁线程 panic）
    #[error("指针存储锁已失效: {key}")]
    LockPoisoned { key: String },
}

// ========== 从常见错误类型转换 ==========

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialize(SerializeError::Json(err))
    }
}

impl From<toml::ser::Error> for AppError {
    fn from(err: toml::ser::Error) -> Self {
        AppError::Serialize(SerializeError::TomlWrite(err))
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建 TOML 解析错误
    pub fn toml_parse_failed(path: impl Into<String>, source: toml::de::Error) -> Self {
        AppError::Serialize(SerializeError::TomlParse {
            path: path.into(),
            source,
        })
    }

    /// 创建锁失效错误
    pub fn lock_poisoned(key: impl Into<String>) -> Self {
        AppError::Store(StoreError::LockPoisoned { key: key.into() })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

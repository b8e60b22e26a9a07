use crate::error::ConfigError;
use std::str::FromStr;
use tracing::warn;

/// 输出文件格式
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Toml,
    Json,
}

impl OutputFormat {
    /// 文件扩展名
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Toml => "toml",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "toml" => Ok(OutputFormat::Toml),
            "json" => Ok(OutputFormat::Json),
            other => Err(ConfigError::InvalidValue {
                name: "OUTPUT_FORMAT".to_string(),
                reason: format!("未知格式 '{}'，可选 toml / json", other),
            }),
        }
    }
}

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 同时解析的文档数量
    pub max_concurrent_documents: usize,
    /// 待解析文本（.txt）所在目录
    pub input_folder: String,
    /// 解析结果输出目录
    pub output_folder: String,
    /// 解析结果格式
    pub output_format: OutputFormat,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    // --- 抽取参数 ---
    /// 结构化抽取至少需要的题目数，低于此值走兜底切分
    pub min_structured_questions: usize,
    /// 兜底切分的目标块数
    pub fallback_chunk_target: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_documents: 8,
            input_folder: "input_text".to_string(),
            output_folder: "output_parsed".to_string(),
            output_format: OutputFormat::Toml,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            min_structured_questions: 5,
            fallback_chunk_target: 150,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        let config = Self {
            max_concurrent_documents: env_or("MAX_CONCURRENT_DOCUMENTS", default.max_concurrent_documents),
            input_folder: std::env::var("INPUT_FOLDER").unwrap_or(default.input_folder),
            output_folder: std::env::var("OUTPUT_FOLDER").unwrap_or(default.output_folder),
            output_format: env_or("OUTPUT_FORMAT", default.output_format),
            verbose_logging: env_or("VERBOSE_LOGGING", default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            min_structured_questions: env_or("MIN_STRUCTURED_QUESTIONS", default.min_structured_questions),
            fallback_chunk_target: env_or("FALLBACK_CHUNK_TARGET", default.fallback_chunk_target),
        };
        config.sanitized()
    }

    /// 并发数和切分目标为 0 时没有意义，退回默认值
    fn sanitized(mut self) -> Self {
        let default = Self::default();
        if self.max_concurrent_documents == 0 {
            warn!("⚠️ MAX_CONCURRENT_DOCUMENTS 不能为 0，使用默认值 {}", default.max_concurrent_documents);
            self.max_concurrent_documents = default.max_concurrent_documents;
        }
        if self.fallback_chunk_target == 0 {
            warn!("⚠️ FALLBACK_CHUNK_TARGET 不能为 0，使用默认值 {}", default.fallback_chunk_target);
            self.fallback_chunk_target = default.fallback_chunk_target;
        }
        self
    }
}

/// 读取并解析环境变量；不存在时用默认值，解析失败时告警后用默认值
fn env_or<T>(var_name: &str, default: T) -> T
where
    T: FromStr,
{
    match std::env::var(var_name) {
        Ok(value) => match parse_env_value::<T>(var_name, &value) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("⚠️ {}，使用默认值", e);
                default
            }
        },
        Err(_) => default,
    }
}

fn parse_env_value<T: FromStr>(var_name: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse::<T>().map_err(|_| ConfigError::EnvVarParseFailed {
        var_name: var_name.to_string(),
        value: value.to_string(),
        expected_type: std::any::type_name::<T>().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("TOML".parse::<OutputFormat>().unwrap(), OutputFormat::Toml);
        assert_eq!(" json ".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_parse_env_value_reports_type() {
        let err = parse_env_value::<usize>("FALLBACK_CHUNK_TARGET", "lots").unwrap_err();
        assert!(err.to_string().contains("FALLBACK_CHUNK_TARGET"));
        assert!(err.to_string().contains("lots"));
    }

    #[test]
    fn test_sanitized_restores_zero_values() {
        let config = Config {
            max_concurrent_documents: 0,
            fallback_chunk_target: 0,
            ..Config::default()
        }
        .sanitized();
        assert_eq!(config.max_concurrent_documents, 8);
        assert_eq!(config.fallback_chunk_target, 150);
    }
}

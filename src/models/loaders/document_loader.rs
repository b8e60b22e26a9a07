use crate::config::OutputFormat;
use crate::error::{AppError, AppResult, FileError};
use crate::models::{ParsedRecord, SourceDocument};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 从文本文件加载源文档
///
/// 文件名（去掉扩展名）作为文档名。
pub async fn load_text_document(text_file_path: &Path) -> AppResult<SourceDocument> {
    if !text_file_path.exists() {
        return Err(FileError::NotFound {
            path: text_file_path.display().to_string(),
        }
        .into());
    }

    let bytes = fs::read(text_file_path)
        .await
        .map_err(|e| AppError::file_read_failed(text_file_path.display().to_string(), e))?;
    // PDF 抽出来的文本经常夹杂非法 UTF-8 字节，宽松解码即可
    let text = String::from_utf8_lossy(&bytes).into_owned();

    let name = text_file_path
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    Ok(SourceDocument::new(name, text).with_file_path(text_file_path.to_string_lossy().to_string()))
}

/// 从文件夹中加载所有 .txt 文档，按文件名排序
pub async fn load_all_text_files(folder_path: &str) -> AppResult<Vec<SourceDocument>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        return Err(FileError::DirectoryNotFound {
            path: folder_path.to_string(),
        }
        .into());
    }

    let mut text_files = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?
    {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("txt") {
            text_files.push(path);
        }
    }
    text_files.sort();

    let mut documents = Vec::with_capacity(text_files.len());
    for path in text_files {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_text_document(&path).await {
            Ok(document) => {
                tracing::debug!("成功加载 {} 个字符", document.text.chars().count());
                documents.push(document);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {}", path.display(), e);
            }
        }
    }

    Ok(documents)
}

/// 把解析记录写入输出目录，返回写入的文件路径
pub async fn save_parsed_record(
    output_folder: &str,
    record: &ParsedRecord,
    format: OutputFormat,
) -> AppResult<PathBuf> {
    fs::create_dir_all(output_folder)
        .await
        .map_err(|e| AppError::file_write_failed(output_folder, e))?;

    let content = match format {
        OutputFormat::Toml => toml::to_string(record)?,
        OutputFormat::Json => serde_json::to_string_pretty(record)?,
    };

    let output_path = Path::new(output_folder).join(format!("{}.{}", record.source, format.extension()));
    fs::write(&output_path, content)
        .await
        .map_err(|e| AppError::file_write_failed(output_path.display().to_string(), e))?;

    Ok(output_path)
}

/// 读回一条 TOML 解析记录
pub async fn load_parsed_record(toml_file_path: &Path) -> AppResult<ParsedRecord> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|e| AppError::file_read_failed(toml_file_path.display().to_string(), e))?;

    toml::from_str(&content).map_err(|e| AppError::toml_parse_failed(toml_file_path.display().to_string(), e))
}

//! 开局库存储
//!
//! 整个开局库存为单个 JSON 文件，每次保存整体覆盖。

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use isolation_ai::OpeningBook;
use tracing::{debug, info};

/// 开局库存储
pub struct BookStorage {
    path: PathBuf,
}

impl BookStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 使用平台数据目录下的默认路径
    pub fn at_default_path() -> Result<Self> {
        Ok(Self::new(default_path()?))
    }

    /// 文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 加载开局库；文件不存在时返回空库
    pub fn load(&self, side: u8) -> Result<OpeningBook> {
        if !self.path.exists() {
            debug!(path = ?self.path, "no opening book file, starting empty");
            return Ok(OpeningBook::new(side));
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("读取开局库失败: {:?}", self.path))?;

        let book = OpeningBook::from_json(side, &content)
            .with_context(|| format!("解析开局库失败: {:?}", self.path))?;
        info!(path = ?self.path, entries = book.len(), "opening book loaded");
        Ok(book)
    }

    /// 保存开局库（整体覆盖）
    pub fn save(&self, book: &OpeningBook) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("无法创建存储目录: {:?}", dir))?;
            }
        }

        let json = book.to_json().context("序列化开局库失败")?;
        fs::write(&self.path, json)
            .with_context(|| format!("写入文件失败: {:?}", self.path))?;
        info!(path = ?self.path, entries = book.len(), "opening book saved");
        Ok(())
    }

    /// 删除开局库文件
    pub fn delete(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("删除文件失败: {:?}", self.path))?;
        }
        Ok(())
    }
}

/// 跨平台默认路径
pub fn default_path() -> Result<PathBuf> {
    let app_data_dir = dirs::data_dir().context("无法获取应用数据目录")?;

    Ok(app_data_dir.join("isolation").join("opening_book.json"))
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use parking_lot::Mutex;
use std::fs;
use std::io;
use std::path::PathBuf;

/// 端点配置存储
///
/// 保存唯一的远端存储地址，跨会话保留。
pub trait EndpointStore: Send + Sync {
    /// 读取已保存的端点，未保存时返回 `None`
    fn load(&self) -> io::Result<Option<String>>;

    /// 保存端点
    fn save(&self, url: &str) -> io::Result<()>;
}

/// 基于本地文件的端点存储
pub struct FileEndpointStore {
    path: PathBuf,
}

impl FileEndpointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl EndpointStore for FileEndpointStore {
    fn load(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                let url = raw.trim();
                Ok((!url.is_empty()).then(|| url.to_string()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&self, url: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        // Write then rename so a crash never leaves a truncated endpoint
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, format!("{url}\n"))?;
        fs::rename(&tmp, &self.path)
    }
}

/// 内存端点存储，用于测试和一次性会话
#[derive(Default)]
pub struct MemoryEndpointStore {
    value: Mutex<Option<String>>,
}

impl MemoryEndpointStore {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(url.into())),
        }
    }
}

impl EndpointStore for MemoryEndpointStore {
    fn load(&self) -> io::Result<Option<String>> {
        Ok(self.value.lock().clone())
    }

    fn save(&self, url: &str) -> io::Result<()> {
        *self.value.lock() = Some(url.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("endpoint");

        let store = FileEndpointStore::new(&path);
        assert_eq!(store.load().unwrap(), None);
        store.save("https://api.example.com/api.php").unwrap();

        let reopened = FileEndpointStore::new(&path);
        assert_eq!(
            reopened.load().unwrap().as_deref(),
            Some("https://api.example.com/api.php")
        );
    }

    #[test]
    fn test_blank_file_means_unconfigured() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("endpoint");
        fs::write(&path, "  \n").unwrap();
        assert_eq!(FileEndpointStore::new(path).load().unwrap(), None);
    }
}

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::constants::MODEL_SUBDIR;

#[derive(Error, Debug)]
pub enum ModelResolveError {
    #[error("failed to create cache directory: {0}")]
    CacheDir(#[source] std::io::Error),
    #[error("download failed for {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to write model to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not determine cache directory")]
    NoCacheDir,
    #[error("model {name} not found in {searched:?} and no download URL configured")]
    NotFound { name: String, searched: Vec<PathBuf> },
}

/// Progress callback: `(bytes_downloaded, total_bytes)`.
/// `total_bytes` is 0 if the server didn't provide Content-Length.
pub type ProgressFn = Box<dyn Fn(u64, u64) + Send>;

/// Where to look for a model file and how to fetch it when missing.
#[derive(Clone, Debug, Default)]
pub struct ModelLocation<'a> {
    /// Root directory holding one subdirectory per task.
    pub plugins_dir: Option<&'a Path>,
    pub task_name: &'a str,
    pub model_name: &'a str,
    pub url: Option<&'a str>,
}

/// Conventional model path: `<plugins_dir>/<task>/Model/<model file>`.
pub fn plugin_model_path(plugins_dir: &Path, task_name: &str, model_name: &str) -> PathBuf {
    plugins_dir
        .join(conform_name(task_name))
        .join(MODEL_SUBDIR)
        .join(model_name)
}

/// Makes a task name usable as a directory name.
pub fn conform_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Resolve a model file, checking local locations before downloading.
///
/// Resolution order:
/// 1. Per-task plugin directory
/// 2. User cache directory (platform-specific)
/// 3. Download from URL to cache, when a URL is configured
pub fn resolve(
    location: &ModelLocation<'_>,
    progress: Option<ProgressFn>,
) -> Result<PathBuf, ModelResolveError> {
    resolve_with_cache(location, &model_cache_dir()?, progress)
}

fn resolve_with_cache(
    location: &ModelLocation<'_>,
    cache_dir: &Path,
    progress: Option<ProgressFn>,
) -> Result<PathBuf, ModelResolveError> {
    let mut searched = Vec::with_capacity(2);

    if let Some(dir) = location.plugins_dir {
        let plugin_path = plugin_model_path(dir, location.task_name, location.model_name);
        if plugin_path.exists() {
            return Ok(plugin_path);
        }
        searched.push(plugin_path);
    }

    let cached_path = cache_dir.join(location.model_name);
    if cached_path.exists() {
        return Ok(cached_path);
    }
    searched.push(cached_path.clone());

    let Some(url) = location.url else {
        return Err(ModelResolveError::NotFound {
            name: location.model_name.to_string(),
            searched,
        });
    };

    fs::create_dir_all(cache_dir).map_err(ModelResolveError::CacheDir)?;
    log::info!("Downloading {} from {url}", location.model_name);
    download(url, &cached_path, progress)?;
    Ok(cached_path)
}

/// Platform-specific model cache directory.
///
/// - macOS: `~/Library/Application Support/Facemark/models/`
/// - Linux: `$XDG_CACHE_HOME/Facemark/models/` or `~/.cache/Facemark/models/`
/// - Windows: `%LOCALAPPDATA%/Facemark/models/`
pub fn model_cache_dir() -> Result<PathBuf, ModelResolveError> {
    #[cfg(target_os = "macos")]
    {
        dirs::data_dir()
            .map(|d| d.join("Facemark").join("models"))
            .ok_or(ModelResolveError::NoCacheDir)
    }
    #[cfg(not(target_os = "macos"))]
    {
        dirs::cache_dir()
            .map(|d| d.join("Facemark").join("models"))
            .ok_or(ModelResolveError::NoCacheDir)
    }
}

fn download(url: &str, dest: &Path, progress: Option<ProgressFn>) -> Result<(), ModelResolveError> {
    let temp_path = dest.with_extension("part");

    let result = download_inner(url, dest, &temp_path, progress);

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }

    result
}

fn download_inner(
    url: &str,
    dest: &Path,
    temp_path: &Path,
    progress: Option<ProgressFn>,
) -> Result<(), ModelResolveError> {
    let write_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| ModelResolveError::Write { path, source }
    };

    let mut response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(|e| ModelResolveError::Download {
            url: url.to_string(),
            source: e,
        })?;

    let total = response.content_length().unwrap_or(0);
    let mut downloaded: u64 = 0;

    let mut file = fs::File::create(temp_path).map_err(write_err(temp_path))?;

    let mut buf = vec![0u8; 256 * 1024];
    loop {
        let n = response.read(&mut buf).map_err(write_err(temp_path))?;
        if n == 0 {
            break;
        }
        file.write_all(&buf[..n]).map_err(write_err(temp_path))?;
        downloaded += n as u64;
        if let Some(ref cb) = progress {
            cb(downloaded, total);
        }
    }

    file.flush().map_err(write_err(temp_path))?;
    drop(file);

    fs::rename(temp_path, dest).map_err(write_err(dest))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TASK: &str = "infer_facemark_lbf";
    const MODEL: &str = "test_model.onnx";

    fn location<'a>(plugins_dir: Option<&'a Path>, url: Option<&'a str>) -> ModelLocation<'a> {
        ModelLocation {
            plugins_dir,
            task_name: TASK,
            model_name: MODEL,
            url,
        }
    }

    #[test]
    fn test_plugin_model_path_convention() {
        let path = plugin_model_path(Path::new("/plugins"), TASK, "lbf.onnx");
        assert_eq!(
            path,
            PathBuf::from("/plugins/infer_facemark_lbf/Model/lbf.onnx")
        );
    }

    #[test]
    fn test_conform_name_replaces_separators() {
        assert_eq!(conform_name(" Facemark LBF/v2 "), "Facemark_LBF_v2");
    }

    #[test]
    fn test_resolve_prefers_plugin_dir() {
        let tmp = TempDir::new().unwrap();
        let plugins = tmp.path().join("plugins");
        let cache = tmp.path().join("cache");
        let plugin_path = plugin_model_path(&plugins, TASK, MODEL);
        fs::create_dir_all(plugin_path.parent().unwrap()).unwrap();
        fs::write(&plugin_path, b"plugin model").unwrap();
        fs::create_dir_all(&cache).unwrap();
        fs::write(cache.join(MODEL), b"cached model").unwrap();

        let resolved = resolve_with_cache(&location(Some(&plugins), None), &cache, None).unwrap();
        assert_eq!(resolved, plugin_path);
    }

    #[test]
    fn test_resolve_falls_back_to_cache() {
        let tmp = TempDir::new().unwrap();
        let cache = tmp.path().join("cache");
        fs::create_dir_all(&cache).unwrap();
        fs::write(cache.join(MODEL), b"cached model").unwrap();

        let resolved =
            resolve_with_cache(&location(Some(tmp.path()), None), &cache, None).unwrap();
        assert_eq!(resolved, cache.join(MODEL));
    }

    #[test]
    fn test_resolve_without_url_reports_searched_paths() {
        let tmp = TempDir::new().unwrap();
        let cache = tmp.path().join("cache");
        let err = resolve_with_cache(&location(Some(tmp.path()), None), &cache, None).unwrap_err();
        match err {
            ModelResolveError::NotFound { name, searched } => {
                assert_eq!(name, MODEL);
                assert_eq!(searched.len(), 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_model_cache_dir_returns_path() {
        let path = model_cache_dir().unwrap();
        assert!(path.to_string_lossy().contains("Facemark"));
        assert!(path.to_string_lossy().contains("models"));
    }

    #[test]
    fn test_download_invalid_url_returns_error() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("model.onnx");
        let result = download("http://invalid.nonexistent.example.com/model", &dest, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_download_atomic_no_partial_on_failure() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("model.onnx");
        let _ = download("http://invalid.nonexistent.example.com/model", &dest, None);
        assert!(!dest.exists());
        assert!(!dest.with_extension("part").exists());
    }
}

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

use crate::codegen::{generate_code_with_options, GeneratorOptions};
use crate::dsl::UiDsl;
use crate::error::Result;

/// SHA-256 hex digest of the canonical JSON form of a document.
pub fn fingerprint(dsl: &UiDsl) -> String {
    let canonical = serde_json::to_string(dsl).unwrap_or_default();
    compute_hash(&canonical)
}

pub fn compute_hash(source: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    pub hash: String,
    pub code: String,
}

/// On-disk cache of generated sources keyed by document and options.
pub struct CodegenCache {
    cache_dir: PathBuf,
}

impl CodegenCache {
    pub fn new(cache_dir: impl AsRef<Path>) -> Result<Self> {
        let cache_dir = cache_dir.as_ref().to_path_buf();
        fs::create_dir_all(&cache_dir)?;
        Ok(Self { cache_dir })
    }

    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Key combining the document fingerprint with the generator options.
    pub fn key(dsl: &UiDsl, options: &GeneratorOptions) -> String {
        let options = serde_json::to_string(options).unwrap_or_default();
        compute_hash(&format!("{}:{}", fingerprint(dsl), options))
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let path = self.entry_path(key);
        let data = fs::read_to_string(&path).ok()?;

        let entry: CacheEntry = match serde_json::from_str(&data) {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "corrupt cache entry removed");
                fs::remove_file(&path).ok();
                return None;
            }
        };

        if entry.hash == compute_hash(&entry.code) {
            Some(entry.code)
        } else {
            tracing::warn!(path = %path.display(), "cache entry checksum mismatch; removed");
            fs::remove_file(&path).ok();
            None
        }
    }

    pub fn set(&self, key: &str, code: &str) -> Result<()> {
        let entry = CacheEntry {
            hash: compute_hash(code),
            code: code.to_string(),
        };
        fs::write(self.entry_path(key), serde_json::to_string(&entry)?)?;
        Ok(())
    }
}

/// Generates through the cache. A failed cache write is logged, never fatal.
pub fn generate_cached(dsl: &UiDsl, options: &GeneratorOptions, cache: &CodegenCache) -> String {
    let key = CodegenCache::key(dsl, options);
    if let Some(code) = cache.get(&key) {
        tracing::debug!(key = %key, "codegen cache hit");
        return code;
    }

    tracing::debug!(key = %key, "codegen cache miss");
    let code = generate_code_with_options(dsl, options);
    if let Err(e) = cache.set(&key, &code) {
        tracing::warn!(key = %key, error = %e, "failed to write codegen cache entry");
    }
    code
}

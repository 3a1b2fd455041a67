// store.rs - Named pattern lookup with an in-process cache

use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::codec::decode_pattern;
use crate::error::{LifeError, Result};
use crate::matrix::CellMatrix;
use crate::transform::{Orientation, transform};

/// Where pattern text comes from.
pub trait PatternSource {
    /// Returns the raw text of `name` and the location it was read from,
    /// or `None` when no location holds it.
    fn fetch(&self, name: &str) -> Result<Option<(String, PathBuf)>>;

    /// Locations consulted, for error reporting.
    fn searched(&self) -> Vec<PathBuf>;
}

/// Searches a root directory, then a fallback subdirectory of it.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
    fallback: PathBuf,
}

impl DirSource {
    pub const DEFAULT_FALLBACK: &'static str = "src";

    pub fn new(root: impl Into<PathBuf>, fallback: impl AsRef<Path>) -> Self {
        let root = root.into();
        let fallback = root.join(fallback);
        Self { root, fallback }
    }

    /// The current working directory with the `src` fallback.
    pub fn from_cwd() -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|source| LifeError::Io {
            path: PathBuf::from("."),
            source,
        })?;
        Ok(Self::new(cwd, Self::DEFAULT_FALLBACK))
    }
}

impl PatternSource for DirSource {
    fn fetch(&self, name: &str) -> Result<Option<(String, PathBuf)>> {
        // A name that is not a single plain file name could escape the search dirs.
        if name.is_empty() || Path::new(name).file_name() != Some(OsStr::new(name)) {
            return Ok(None);
        }
        for dir in [&self.root, &self.fallback] {
            let path = dir.join(name);
            if !path.is_file() {
                continue;
            }
            let text = std::fs::read_to_string(&path).map_err(|source| LifeError::Io {
                path: path.clone(),
                source,
            })?;
            return Ok(Some((text, path)));
        }
        Ok(None)
    }

    fn searched(&self) -> Vec<PathBuf> {
        vec![self.root.clone(), self.fallback.clone()]
    }
}

/// Memoizing pattern loader.
///
/// The cache never evicts. It sits behind a mutex so one store can be shared
/// between simulations through an `Arc`; two callers racing on the same
/// uncached name may both read it, which is harmless.
pub struct PatternStore<S = DirSource> {
    source: S,
    cache: Mutex<HashMap<String, Arc<CellMatrix>>>,
}

impl PatternStore<DirSource> {
    pub fn from_cwd() -> Result<Self> {
        Ok(Self::new(DirSource::from_cwd()?))
    }
}

impl<S: PatternSource> PatternStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Canonical matrix for `name`, read from the source on first use only.
    pub fn load(&self, name: &str) -> Result<Arc<CellMatrix>> {
        if let Some(hit) = self.cached(name) {
            tracing::debug!(pattern = name, "pattern cache hit");
            return Ok(hit);
        }

        let Some((text, path)) = self.source.fetch(name)? else {
            let searched = self.source.searched();
            tracing::warn!(pattern = name, ?searched, "pattern not found");
            return Err(LifeError::PatternNotFound {
                name: name.to_string(),
                searched,
            });
        };

        let matrix = Arc::new(decode_pattern(name, &text)?);
        tracing::info!(
            pattern = name,
            path = %path.display(),
            height = matrix.height(),
            width = matrix.width(),
            "loaded pattern"
        );

        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(cache.entry(name.to_string()).or_insert(matrix).clone())
    }

    /// Loads `name` through the cache and orients it. The transform is
    /// recomputed on every call.
    pub fn load_oriented(&self, name: &str, orientation: Orientation) -> Result<CellMatrix> {
        let canonical = self.load(name)?;
        Ok(transform(&canonical, orientation))
    }

    pub fn is_cached(&self, name: &str) -> bool {
        self.cached(name).is_some()
    }

    fn cached(&self, name: &str) -> Option<Arc<CellMatrix>> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::transform::{Angle, Flip};
    use std::cell::Cell;

    /// In-memory source that counts how often it is asked.
    #[derive(Default)]
    pub(crate) struct MemorySource {
        files: HashMap<String, String>,
        pub(crate) fetches: Cell<usize>,
    }

    impl MemorySource {
        pub(crate) fn with(mut self, name: &str, text: &str) -> Self {
            self.files.insert(name.to_string(), text.to_string());
            self
        }
    }

    impl PatternSource for MemorySource {
        fn fetch(&self, name: &str) -> Result<Option<(String, PathBuf)>> {
            self.fetches.set(self.fetches.get() + 1);
            Ok(self
                .files
                .get(name)
                .map(|text| (text.clone(), PathBuf::from(format!("mem:{name}")))))
        }

        fn searched(&self) -> Vec<PathBuf> {
            vec![PathBuf::from("mem:")]
        }
    }

    #[test]
    fn second_load_hits_the_cache() {
        let store = PatternStore::new(MemorySource::default().with("block", "OO\nOO\n"));

        let first = store.load("block").unwrap();
        let second = store.load("block").unwrap();

        assert_eq!(*first, *second);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.source().fetches.get(), 1);
        assert!(store.is_cached("block"));
    }

    #[test]
    fn oriented_loads_share_one_read() {
        let store = PatternStore::new(MemorySource::default().with("bar", "OOO\n"));

        let flat = store.load_oriented("bar", Orientation::default()).unwrap();
        let upright = store
            .load_oriented("bar", Orientation::new(Angle::Deg90, Flip::None))
            .unwrap();

        assert_eq!((flat.height(), flat.width()), (1, 3));
        assert_eq!((upright.height(), upright.width()), (3, 1));
        assert_eq!(store.source().fetches.get(), 1);
    }

    #[test]
    fn missing_pattern_is_reported() {
        let store = PatternStore::new(MemorySource::default());
        let err = store.load("ghost").unwrap_err();
        assert!(matches!(err, LifeError::PatternNotFound { ref name, .. } if name == "ghost"));
        assert!(!store.is_cached("ghost"));
    }

    #[test]
    fn decode_failure_is_not_cached() {
        let store = PatternStore::new(MemorySource::default().with("bad", "O?O\n"));
        assert!(matches!(store.load("bad"), Err(LifeError::PatternDecode { .. })));
        assert!(!store.is_cached("bad"));
        assert!(store.load("bad").is_err());
        assert_eq!(store.source().fetches.get(), 2);
    }
}

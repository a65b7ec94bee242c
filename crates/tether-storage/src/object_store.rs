use crate::error::{Result, StorageError};
use crate::key::{encode_for_fs, md5_hex};
use crate::util::atomic_write;
use std::fmt;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Resolves a logical key to the file holding its value.
pub trait PathMapper<K: ?Sized>: Send + Sync {
    fn path_for(&self, key: &K) -> PathBuf;
}

/// Every key maps to the same file. Used by stores holding one record.
#[derive(Clone, Debug)]
pub struct FixedPath(pub PathBuf);

impl<K: ?Sized> PathMapper<K> for FixedPath {
    fn path_for(&self, _key: &K) -> PathBuf {
        self.0.clone()
    }
}

/// `<base>/<encode_for_fs(key)>.<extension>`
#[derive(Clone, Debug)]
pub struct EncodedKeyMapper {
    base: PathBuf,
    extension: &'static str,
}

impl EncodedKeyMapper {
    pub fn new(base: impl Into<PathBuf>, extension: &'static str) -> Self {
        Self {
            base: base.into(),
            extension,
        }
    }
}

impl PathMapper<str> for EncodedKeyMapper {
    fn path_for(&self, key: &str) -> PathBuf {
        self.base
            .join(format!("{}.{}", encode_for_fs(key), self.extension))
    }
}

/// Spreads keys over nested directories named after the leading characters
/// of their MD5: with two levels, `key` lands in `<base>/a/b/ab....pb`.
///
/// Suited to keys of arbitrary length and shape, such as file paths.
#[derive(Clone, Debug)]
pub struct HashingPathMapper {
    base: PathBuf,
    levels: usize,
}

impl HashingPathMapper {
    pub fn new(base: impl Into<PathBuf>, levels: usize) -> Self {
        Self {
            base: base.into(),
            levels,
        }
    }
}

impl PathMapper<str> for HashingPathMapper {
    fn path_for(&self, key: &str) -> PathBuf {
        let hash = md5_hex(key.as_bytes());
        let mut path = self.base.clone();
        for c in hash.chars().take(self.levels) {
            path.push(c.to_string());
        }
        path.push(format!("{hash}.pb"));
        path
    }
}

pub type Reader<V> = fn(&Path, &[u8]) -> Result<V>;
pub type Writer<V> = fn(&V) -> Vec<u8>;

/// Key/value persistence over a directory.
///
/// Holds no lock of its own; callers serialize access to a given key.
pub struct ObjectStore<K: ?Sized, V, P> {
    mapper: P,
    reader: Reader<V>,
    writer: Writer<V>,
    _key: PhantomData<fn(&K)>,
}

impl<K: ?Sized, V, P> ObjectStore<K, V, P>
where
    P: PathMapper<K>,
{
    pub fn new(mapper: P, reader: Reader<V>, writer: Writer<V>) -> Self {
        Self {
            mapper,
            reader,
            writer,
            _key: PhantomData,
        }
    }

    pub fn path_for(&self, key: &K) -> PathBuf {
        self.mapper.path_for(key)
    }

    /// Overwrite the value of `key`, creating parent directories as needed.
    pub fn write(&self, key: &K, value: &V) -> Result<()> {
        let path = self.mapper.path_for(key);
        atomic_write(&path, &(self.writer)(value))
    }

    /// `Ok(None)` when nothing was ever written for `key`.
    pub fn read(&self, key: &K) -> Result<Option<V>> {
        let path = self.mapper.path_for(key);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StorageError::io(&path, err)),
        };
        (self.reader)(&path, &bytes).map(Some)
    }

    pub fn delete(&self, key: &K) -> Result<()> {
        let path = self.mapper.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::io(&path, err)),
        }
    }
}

impl<K: ?Sized, V, P: fmt::Debug> fmt::Debug for ObjectStore<K, V, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectStore")
            .field("mapper", &self.mapper)
            .finish_non_exhaustive()
    }
}

use std::{
    fs::{ self, File },
    io::{ BufReader, Read, Write },
    path::{ Path, PathBuf },
    time::SystemTime,
};

use serde::{ de::DeserializeOwned, Serialize };

use crate::core::errors::FudagenError;

/// Cache file kept next to the source it was parsed from.
pub fn cache_path_for(source: &Path) -> PathBuf {
    source.with_extension("cache.bin")
}

/// Fingerprint of a source file: crate version plus file size and mtime.
/// Editing the source or upgrading the crate invalidates the cache.
pub fn source_fingerprint(source: &Path) -> Result<String, FudagenError> {
    let metadata = fs::metadata(source)?;
    let modified = metadata
        .modified()?
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0);

    Ok(format!("{}:{}:{}", env!("CARGO_PKG_VERSION"), metadata.len(), modified))
}

pub fn load_cache<T: DeserializeOwned>(cache_path: &Path) -> Result<T, FudagenError> {
    let file = File::open(cache_path)?;
    let mut reader = BufReader::new(file);
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    let (value, _): (T, usize) =
        bincode::serde::decode_from_slice(&buffer, bincode::config::standard())?;

    Ok(value)
}

pub fn save_cache<T: Serialize>(value: &T, cache_path: &Path) -> Result<(), FudagenError> {
    let encoded = bincode::serde::encode_to_vec(value, bincode::config::standard())?;
    let mut file = File::create(cache_path)?;
    file.write_all(&encoded)?;
    Ok(())
}

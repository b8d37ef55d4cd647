use std::fs::File;
use std::io::Read;
use std::path::Path;
use crate::error::WatchError;

/// 256-bit BLAKE3 digest of a file's byte content.
pub type Digest = [u8; 32];

const BLOCK_SIZE: usize = 4096;

/// Hashes the full content of a single file, streaming in fixed-size blocks
/// so large files never land in memory whole.
pub fn hash_file(path: &Path) -> Result<Digest, WatchError> {
    let unreadable = |source: std::io::Error| WatchError::UnreadableFile {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(unreadable)?;
    let mut hasher = blake3::Hasher::new();
    let mut block = [0u8; BLOCK_SIZE];

    loop {
        let read = file.read(&mut block).map_err(unreadable)?;
        if read == 0 {
            break;
        }
        hasher.update(&block[..read]);
    }

    Ok(hasher.finalize().into())
}

use std::{
    fs::OpenOptions,
    io::Write,
    os::fd::AsRawFd,
    path::Path,
};

use nix::fcntl;

pub struct FileGuard {
    file: std::fs::File,
}

impl Drop for FileGuard {
    fn drop(&mut self) {
        _ = fcntl::flock(self.file.as_raw_fd(), nix::fcntl::FlockArg::Unlock);
    }
}

/// Exclusive, non-blocking advisory lock. The owning PID is written into
/// the file for post-mortem inspection; the lock itself is what matters.
pub fn flock(path: &Path) -> std::io::Result<FileGuard> {
    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .open(path)?;
    fcntl::flock(
        file.as_raw_fd(),
        nix::fcntl::FlockArg::LockExclusiveNonblock,
    )?;
    file.set_len(0)?;
    write!(file, "{}", std::process::id())?;
    Ok(FileGuard { file })
}

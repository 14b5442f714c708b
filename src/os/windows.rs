use std::{
    fs::{File, OpenOptions},
    io::{Error, Result, Write},
    mem,
    os::windows::io::AsRawHandle,
    path::Path,
};

use windows_sys::Win32::{
    Foundation::HANDLE,
    Storage::FileSystem::{
        LockFileEx, UnlockFile, LOCKFILE_EXCLUSIVE_LOCK, LOCKFILE_FAIL_IMMEDIATELY,
    },
};

pub struct FileGuard {
    file: File,
}

impl Drop for FileGuard {
    fn drop(&mut self) {
        if let Err(err) = unlock(&self.file) {
            tracing::warn!("failed to release the instance lock: {err}");
        }
    }
}

/// Exclusive, non-blocking lock over the whole file. The owning PID is
/// written into the file for post-mortem inspection.
pub fn flock(path: &Path) -> Result<FileGuard> {
    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .open(path)?;
    lock_whole_file(&file, LOCKFILE_EXCLUSIVE_LOCK | LOCKFILE_FAIL_IMMEDIATELY)?;
    file.set_len(0)?;
    write!(file, "{}", std::process::id())?;
    Ok(FileGuard { file })
}

fn lock_whole_file(file: &File, flags: u32) -> Result<()> {
    unsafe {
        let mut overlapped = mem::zeroed();
        let ret = LockFileEx(
            file.as_raw_handle() as HANDLE,
            flags,
            0,
            !0,
            !0,
            &mut overlapped,
        );
        if ret == 0 {
            Err(Error::last_os_error())
        } else {
            Ok(())
        }
    }
}

fn unlock(file: &File) -> Result<()> {
    unsafe {
        let ret = UnlockFile(file.as_raw_handle() as HANDLE, 0, 0, !0, !0);
        if ret == 0 {
            Err(Error::last_os_error())
        } else {
            Ok(())
        }
    }
}

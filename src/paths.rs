//! On-disk layout of period files: `<root>/CDRs/<NN>_CDR.txt`.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

pub const CDR_DIR: &str = "CDRs";

pub fn period_path(root: &Path, period: u32) -> PathBuf {
    root.join(CDR_DIR).join(format!("{:02}_CDR.txt", period))
}

/// Creates the `CDRs` directory and an empty period file when absent.
pub fn provision(root: &Path, period: u32) -> io::Result<PathBuf> {
    let path = period_path(root, period);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(&path)?;
    log::trace!("provisioned {}", path.display());
    Ok(path)
}

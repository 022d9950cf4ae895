//! SHA-256 checksum files in the `sha256sum` format: `<hex>  <filename>`.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, Result};
use crate::paths::with_suffix;

const BUF_SIZE: usize = 64 * 1024;

/// Compute SHA-256 of a file and return the digest as lowercase hex.
/// Reads in chunks to keep memory use bounded; suitable for large files.
pub fn sha256_path(path: &Path) -> Result<String> {
    let mut f = File::open(path).map_err(|e| open_error(path, e))?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = f
            .read(&mut buf)
            .map_err(|e| PipelineError::io(format!("read {}", path.display()), e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

fn open_error(path: &Path, e: std::io::Error) -> PipelineError {
    if e.kind() == std::io::ErrorKind::NotFound {
        PipelineError::MissingFile {
            path: path.to_path_buf(),
        }
    } else {
        PipelineError::io(format!("open {}", path.display()), e)
    }
}

/// A `.sha256` path and the line it holds (without newline).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ChecksumFile {
    pub path: PathBuf,
    pub line: String,
}

/// Hash `path` and build the line for `<path>.sha256` without writing it.
/// The line names the file by its basename so the pair can be moved together.
pub fn compute_checksum(path: &Path) -> Result<ChecksumFile> {
    let digest = sha256_path(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(ChecksumFile {
        path: with_suffix(path, ".sha256"),
        line: format!("{digest}  {name}"),
    })
}

/// Write a computed checksum to a temporary sibling and rename it into
/// place. The file is created 0644 (subject to the umask), like a shell
/// redirect would.
pub fn write_checksum(sum: &ChecksumFile) -> Result<()> {
    let dir = match sum.path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let write_err =
        |e: std::io::Error| PipelineError::io(format!("write {}", sum.path.display()), e);

    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o644));
    }
    let mut tmp = builder.tempfile_in(&dir).map_err(write_err)?;
    writeln!(tmp, "{}", sum.line).map_err(write_err)?;
    tmp.persist(&sum.path).map_err(|e| write_err(e.error))?;

    tracing::debug!(path = %sum.path.display(), "wrote checksum");
    Ok(())
}

/// Hash `path` and write `<path>.sha256`.
pub fn write_sha256_file(path: &Path) -> Result<ChecksumFile> {
    let sum = compute_checksum(path)?;
    write_checksum(&sum)?;
    Ok(sum)
}

/// Parse one `sha256sum` line into `(digest, filename)`. Accepts the binary
/// marker (`*name`) as well as the text form.
pub fn parse_line(line: &str) -> Option<(&str, &str)> {
    let (digest, rest) = line.split_once(' ')?;
    let name = rest.strip_prefix(' ').or_else(|| rest.strip_prefix('*'))?;
    let valid = digest.len() == 64 && digest.bytes().all(|b| b.is_ascii_hexdigit());
    if !valid || name.is_empty() {
        return None;
    }
    Some((digest, name))
}

/// Re-hash every file listed in `sum_path` (relative to its directory) and
/// compare. Blank lines are skipped; any other unparsable line makes the
/// whole file malformed. Returns the verified paths in file order.
pub fn verify_sha256_file(sum_path: &Path) -> Result<Vec<PathBuf>> {
    let text = std::fs::read_to_string(sum_path).map_err(|e| open_error(sum_path, e))?;
    let malformed = || PipelineError::MalformedChecksum {
        path: sum_path.to_path_buf(),
    };
    let entries = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| parse_line(line).ok_or_else(malformed))
        .collect::<Result<Vec<_>>>()?;
    if entries.is_empty() {
        return Err(malformed());
    }

    let mut verified = Vec::with_capacity(entries.len());
    for (expected, name) in entries {
        let target = match sum_path.parent() {
            Some(dir) => dir.join(name),
            None => PathBuf::from(name),
        };
        let actual = sha256_path(&target)?;
        if !actual.eq_ignore_ascii_case(expected) {
            return Err(PipelineError::ChecksumMismatch {
                path: target,
                expected: expected.to_string(),
                actual,
            });
        }
        verified.push(target);
    }
    Ok(verified)
}

//! Stand-in executables for the build tool and the decompressor.
//!
//! Each stub is a small `sh` script written into a temp directory, so the
//! pipeline runs through the real process runner.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Write an executable script named `name` into `dir`.
pub fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

/// Fake `mehari`: records its argv one per line to `<dir>/mehari.args`,
/// then writes `<path-out>` and `<path-out>.report` unless told otherwise.
pub fn mehari(dir: &Path, exit_code: i32, write_report: bool) -> PathBuf {
    let args_file = dir.join("mehari.args");
    let report = if write_report {
        r#"printf 'report\n' > "$out.report""#
    } else {
        ":"
    };
    let body = format!(
        r#"for a in "$@"; do printf '%s\n' "$a"; done > '{args}'
out=""
prev=""
for a in "$@"; do
  if [ "$prev" = "--path-out" ]; then out="$a"; fi
  prev="$a"
done
if [ {code} -ne 0 ]; then exit {code}; fi
printf 'transcripts\n' > "$out"
{report}
exit 0"#,
        args = args_file.display(),
        code = exit_code,
        report = report,
    );
    script(dir, "mehari", &body)
}

/// Fake `zstd -d -c`: prints something to stdout and exits with `exit_code`.
pub fn zstd(dir: &Path, exit_code: i32) -> PathBuf {
    let body = format!(
        r#"printf 'decompressed %s\n' "$3"
touch '{marker}'
exit {exit_code}"#,
        marker = dir.join("zstd.ran").display(),
    );
    script(dir, "zstd", &body)
}

pub fn recorded_args(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("mehari.args"))
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

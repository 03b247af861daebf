/*!
 * Blank-line normalization of the finished artifact
 *
 * A second pass over the artifact that collapses runs of blank lines down
 * to a configured ceiling. The artifact is streamed line by line into a
 * temporary sibling which is atomically renamed over the original, so a
 * failed or cancelled pass leaves the original byte-for-byte intact.
 */

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cancel::CancellationToken;
use crate::error::{GlobberError, Result};
use crate::utils::{set_restrictive_permissions, ARTIFACT_MODE};

/// Collapse runs of more than `max_consecutive` blank lines in place.
///
/// Only pure-newline lines count as blank; a line holding any byte passes
/// through unchanged and resets the run counter. The pass is idempotent on
/// an artifact that already satisfies the ceiling.
pub fn collapse_blank_lines(
    path: &Path,
    max_consecutive: usize,
    cancel: &CancellationToken,
) -> Result<()> {
    let temp_path = temp_sibling(path);

    match rewrite(path, &temp_path, max_consecutive, cancel) {
        Ok(()) => {
            fs::rename(&temp_path, path)?;
            debug!("normalized blank lines in {}", path.display());
            Ok(())
        }
        Err(err) => {
            // The original stays untouched; only the temp is discarded.
            let _ = fs::remove_file(&temp_path);
            Err(err)
        }
    }
}

/// Temporary sibling used during the rewrite (`<artifact>.tmp`)
fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

fn rewrite(
    source: &Path,
    target: &Path,
    max_consecutive: usize,
    cancel: &CancellationToken,
) -> Result<()> {
    let reader = BufReader::new(File::open(source)?);
    let temp_file = File::create(target)?;
    set_restrictive_permissions(target, ARTIFACT_MODE)?;
    let mut writer = BufWriter::new(temp_file);

    let mut consecutive_blank = 0usize;
    for line in reader.lines() {
        if cancel.is_cancelled() {
            return Err(GlobberError::Interrupted);
        }

        let line = line?;
        if line.is_empty() {
            consecutive_blank += 1;
            if consecutive_blank <= max_consecutive {
                writeln!(writer)?;
            }
        } else {
            consecutive_blank = 0;
            writeln!(writer, "{}", line)?;
        }
    }

    writer.flush()?;
    Ok(())
}

/*!
 * Binary-vs-text classification from a bounded byte sample
 */

/// Number of leading bytes examined when classifying a file
pub const SAMPLE_SIZE: usize = 4096;

/// Ratio of suspect bytes (percent) above which a sample is binary
const BINARY_RATIO_PERCENT: usize = 10;

/// Minimum suspect-byte count before the early exit may trigger
const EARLY_EXIT_FLOOR: usize = 5;

/// Decide whether a byte sample looks binary.
///
/// Any NUL classifies the sample as binary outright. Otherwise control bytes
/// other than `\n`, `\r` and `\t` are counted, and the sample is binary when
/// they exceed 10% of its length; once both the absolute floor and the ratio
/// are exceeded the scan stops early. Only the first [`SAMPLE_SIZE`] bytes
/// are examined. An empty sample is text.
pub fn is_binary_data(data: &[u8]) -> bool {
    let limit = data.len().min(SAMPLE_SIZE);
    if limit == 0 {
        return false;
    }

    let mut suspect = 0usize;
    for &byte in &data[..limit] {
        if byte == 0 {
            return true;
        }
        if byte < 0x20 && !matches!(byte, b'\n' | b'\r' | b'\t') {
            suspect += 1;
            if suspect > EARLY_EXIT_FLOOR && suspect * 100 / limit > BINARY_RATIO_PERCENT {
                return true;
            }
        }
    }

    suspect * 100 / limit > BINARY_RATIO_PERCENT
}

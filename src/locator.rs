//! Active line lookup for timed lyrics.

use crate::types::TimedLyricLine;

/// Index of the last line whose time has been reached.
///
/// `lines` must be in ascending time order, as LRC files are; the scan
/// stops at the first line still in the future. Returns `None` when there
/// are no lines or playback has not reached the first one yet.
///
/// ```
/// use lyricsync::{find_active_index, TimedLyricLine};
///
/// let lines = vec![
///     TimedLyricLine::new(1.0, "one"),
///     TimedLyricLine::new(2.0, "two"),
///     TimedLyricLine::new(3.0, "three"),
/// ];
/// assert_eq!(find_active_index(&lines, 2.5), Some(1));
/// assert_eq!(find_active_index(&lines, 0.5), None);
/// assert_eq!(find_active_index(&lines, 10.0), Some(2));
/// ```
pub fn find_active_index(lines: &[TimedLyricLine], current_time: f64) -> Option<usize> {
    let mut active = None;
    for (i, line) in lines.iter().enumerate() {
        if line.time > current_time {
            break;
        }
        active = Some(i);
    }
    active
}

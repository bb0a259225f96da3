use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::types::Transcript;

const FALLBACK_NAME: &str = "transcript";

/// Where the transcript for `input` goes when no output path is given.
///
/// A local file gets `.txt` appended to its full name (`talk.mp3` → `talk.mp3.txt`),
/// next to the input. A URL uses its last path segment, in the current directory.
pub fn default_output_path(input: &str) -> PathBuf {
    if crate::is_url(input) {
        let name = url_file_name(input).unwrap_or(FALLBACK_NAME);
        PathBuf::from(format!("{name}.txt"))
    } else {
        let mut name = OsString::from(input);
        name.push(".txt");
        PathBuf::from(name)
    }
}

/// Last usable path segment of a URL, ignoring query and fragment.
fn url_file_name(url: &str) -> Option<&str> {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let rest = rest.split(|c: char| c == '?' || c == '#').next().unwrap_or_default();
    let (_, path) = rest.split_once('/')?;
    path.rsplit('/')
        .find(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
}

/// Write the transcript text to `path`, byte for byte.
pub fn write_transcript(path: &Path, transcript: &Transcript) -> Result<()> {
    std::fs::write(path, transcript.text())?;
    info!(path = %path.display(), bytes = transcript.text().len(), "transcript written");
    Ok(())
}

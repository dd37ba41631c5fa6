//! Output folder naming and artifact writing.

use chrono::{DateTime, Local};
use rackham_error::RackhamResult;
use rackham_render::RenderedFile;
use rackham_storage::ContentStore;
use tracing::{debug, info, instrument};

/// Folder name for a run: the title slugged, then a local timestamp.
///
/// Only alphanumerics, spaces, `-` and `_` survive; spaces become `-` and the
/// result is lowercased. A title with nothing left becomes `story`.
///
/// ```
/// use chrono::{Local, TimeZone};
/// use rackham::output_folder_name;
///
/// let at = Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
/// assert_eq!(output_folder_name("The Lost Kite!", at), "the-lost-kite-20240501-093000");
/// ```
pub fn output_folder_name(title: &str, at: DateTime<Local>) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    let slug = kept.trim().replace(' ', "-").to_lowercase();
    let slug = if slug.is_empty() { "story".to_string() } else { slug };
    format!("{slug}-{}", at.format("%Y%m%d-%H%M%S"))
}

/// Create `folder` and write every file into it.
///
/// Returns the logical path of each file written, in order.
///
/// # Errors
///
/// Returns the first storage error; files written before it remain.
#[instrument(skip(store, files), fields(files = files.len()))]
pub async fn write_outputs<S: ContentStore + ?Sized>(
    store: &S,
    folder: &str,
    files: &[RenderedFile],
) -> RackhamResult<Vec<String>> {
    store.create_folder(folder).await?;

    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = format!("{folder}/{}", file.name());
        store.write_text(&path, file.content()).await?;
        debug!(path, bytes = file.content().len(), "Wrote artifact");
        written.push(path);
    }

    info!(folder, "Outputs written");
    Ok(written)
}

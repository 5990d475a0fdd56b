//! Script and image loading against a document.

use crate::fetcher::ResourceFetcher;
use bytes::Bytes;
use common::{PageError, PageResult};
use dom::Document;
use tracing::{debug, warn};

/// Load a script by inserting a `script` element and fetching its source.
///
/// The element (carrying `src`, and `id` when given) is appended to the
/// head-or-body parent before the fetch. On success it is removed again and
/// the payload returned; on failure it stays attached — there is no
/// error-path release — and the fetch error is returned as-is. One
/// completion, no retry, no timeout beyond the fetcher's own.
pub async fn load_script(
    document: &mut Document,
    fetcher: &dyn ResourceFetcher,
    src: &str,
    id: Option<&str>,
) -> PageResult<Bytes> {
    let url = document.url.join(src)?;
    let parent = document
        .script_parent()
        .ok_or_else(|| PageError::not_found("script parent"))?;

    let script = document.create_element("script");
    if let Some(element) = document.tree.get_element_mut(script) {
        element.set_attribute("src", src);
        if let Some(id) = id {
            element.set_attribute("id", id);
        }
    }
    document.tree.append_child(parent, script);

    debug!(%url, "loading script");
    match fetcher.fetch(url.as_str()).await {
        Ok(data) => {
            document.tree.remove(script);
            debug!(%url, bytes = data.len(), "script loaded");
            Ok(data)
        }
        Err(err) => {
            warn!(%url, error = %err, "script load failed, element left attached");
            Err(err)
        }
    }
}

/// Load an image resource.
///
/// Completes on both the success and the failure path, the way an image
/// handler wired to both load and error events does; the caller's single
/// await point is the completion callback.
pub async fn load_image(
    document: &Document,
    fetcher: &dyn ResourceFetcher,
    src: &str,
) -> PageResult<Bytes> {
    let url = document.url.join(src)?;

    debug!(%url, "loading image");
    let result = fetcher.fetch(url.as_str()).await;
    if let Err(err) = &result {
        debug!(%url, error = %err, "image load failed");
    }
    result
}

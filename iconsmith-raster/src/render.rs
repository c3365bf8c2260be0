//! Drawing normalized SVG markup into a pixmap.

use iconsmith_core::RasterError;
use resvg::usvg;
use tiny_skia::{Pixmap, Transform};

/// Parses normalized markup and draws it into a fresh `size × size` pixmap.
///
/// The markup must already declare `width`/`height` equal to `size` (see
/// [`crate::normalize_svg`]), so it is drawn with an identity transform.
/// Sizes are not capped here; a surface tiny-skia cannot describe is
/// reported as [`RasterError::RasterizerUnavailable`].
pub fn render_pixmap(
    normalized: &str,
    size: u32,
    options: &usvg::Options<'_>,
) -> Result<Pixmap, RasterError> {
    if size == 0 {
        return Err(RasterError::InvalidSize(size));
    }

    let tree = usvg::Tree::from_str(normalized, options).map_err(map_usvg_error)?;

    let mut pixmap = Pixmap::new(size, size).ok_or_else(|| {
        RasterError::RasterizerUnavailable(format!("cannot allocate a {size}x{size} surface"))
    })?;

    resvg::render(&tree, Transform::identity(), &mut pixmap.as_mut());

    Ok(pixmap)
}

/// XML-level failures mean the source is not SVG at all; anything else is
/// well-formed markup the renderer cannot handle.
fn map_usvg_error(err: usvg::Error) -> RasterError {
    match err {
        usvg::Error::ParsingFailed(e) => RasterError::InvalidSource(e.to_string()),
        other => RasterError::Render(other.to_string()),
    }
}

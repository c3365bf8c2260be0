//! SVG frame normalization.
//!
//! Design tools often export SVGs with a fixed `width="24" height="24"` and no
//! `viewBox`. Rendering such a file into a 512×512 surface draws the content
//! at 24×24 in the top-left corner. Normalization fixes the root element so
//! the renderer scales the content to the full frame:
//!
//! 1. synthesize `viewBox="0 0 W H"` from the declared size when missing
//!    (a missing axis counts as 100; an unusable one makes it `0 0 100 100`)
//! 2. force `width` and `height` to the requested pixel size
//! 3. declare the SVG namespace when an unprefixed root omits it, as inline
//!    SVG copied out of HTML usually does
//!
//! Everything outside the root start tag passes through byte-for-byte.

use iconsmith_core::RasterError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};

/// Fallback coordinate system extent when the source declares no usable size.
pub const FALLBACK_DIMENSION: f64 = 100.0;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Rewrites `source` so it renders at exactly `size × size` pixels.
///
/// Idempotent: normalizing an already normalized source for the same size
/// returns it unchanged.
pub fn normalize_svg(source: &str, size: u32) -> Result<String, RasterError> {
    let mut reader = Reader::from_str(source);
    let mut writer = Writer::new(Vec::with_capacity(source.len() + 64));
    let mut root_seen = false;

    loop {
        let event = match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(Event::Start(start)) if !root_seen => {
                root_seen = true;
                Event::Start(rewrite_root(&start, size)?)
            }
            Ok(Event::Empty(start)) if !root_seen => {
                root_seen = true;
                Event::Empty(rewrite_root(&start, size)?)
            }
            Ok(event) => event,
            Err(e) => {
                return Err(RasterError::InvalidSource(format!(
                    "{} (at byte {})",
                    e,
                    reader.buffer_position()
                )));
            }
        };

        writer
            .write_event(event)
            .map_err(|e| RasterError::InvalidSource(e.to_string()))?;
    }

    if !root_seen {
        return Err(RasterError::InvalidSource(
            "no <svg> root element found".to_string(),
        ));
    }

    String::from_utf8(writer.into_inner()).map_err(|e| RasterError::InvalidSource(e.to_string()))
}

/// Builds the replacement root start tag.
fn rewrite_root(start: &BytesStart<'_>, size: u32) -> Result<BytesStart<'static>, RasterError> {
    if start.local_name().as_ref() != b"svg" {
        return Err(RasterError::InvalidSource(format!(
            "root element is <{}>, expected <svg>",
            String::from_utf8_lossy(start.name().as_ref())
        )));
    }

    let mut attrs: Vec<(String, String)> = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| RasterError::InvalidSource(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| RasterError::InvalidSource(e.to_string()))?
            .into_owned();
        attrs.push((key, value));
    }

    let has_view_box = attribute(&attrs, "viewBox").is_some_and(|v| !v.trim().is_empty());
    if !has_view_box {
        let (width, height) =
            intrinsic_dimensions(attribute(&attrs, "width"), attribute(&attrs, "height"));
        set_attribute(&mut attrs, "viewBox", format!("0 0 {width} {height}"));
    }

    set_attribute(&mut attrs, "width", size.to_string());
    set_attribute(&mut attrs, "height", size.to_string());

    if start.name().prefix().is_none() && attribute(&attrs, "xmlns").is_none() {
        attrs.insert(0, ("xmlns".to_string(), SVG_NAMESPACE.to_string()));
    }

    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut root = BytesStart::new(name);
    for (key, value) in &attrs {
        root.push_attribute((key.as_str(), value.as_str()));
    }
    Ok(root)
}

fn attribute<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

/// Replaces an attribute in place, or appends it when absent.
fn set_attribute(attrs: &mut Vec<(String, String)>, name: &str, value: String) {
    match attrs.iter_mut().find(|(key, _)| key == name) {
        Some((_, existing)) => *existing = value,
        None => attrs.push((name.to_string(), value)),
    }
}

/// Resolves the declared intrinsic size.
///
/// A missing or empty axis defaults to 100 on its own. A declared axis that
/// is unparsable or non-positive sends both axes to 100×100.
fn intrinsic_dimensions(width: Option<&str>, height: Option<&str>) -> (f64, f64) {
    let resolve = |v: Option<&str>| match v.map(str::trim).filter(|v| !v.is_empty()) {
        None => Some(FALLBACK_DIMENSION),
        Some(declared) => parse_leading_number(declared).filter(|n| n.is_finite() && *n > 0.0),
    };

    match (resolve(width), resolve(height)) {
        (Some(w), Some(h)) => (w, h),
        _ => (FALLBACK_DIMENSION, FALLBACK_DIMENSION),
    }
}

/// Parses the leading number of a length such as `"24px"` or `" 12.5mm"`.
fn parse_leading_number(value: &str) -> Option<f64> {
    let trimmed = value.trim_start();
    let end = trimmed
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
        .unwrap_or(trimmed.len());

    (1..=end)
        .rev()
        .find_map(|len| trimmed[..len].parse::<f64>().ok())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const ICON_24: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24"><rect width="24" height="24"/></svg>"#;

    #[test]
    fn test_synthesizes_view_box_from_declared_size() {
        let out = normalize_svg(ICON_24, 64).unwrap();
        assert_eq!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="64" viewBox="0 0 24 24"><rect width="24" height="24"/></svg>"#
        );
    }

    #[test]
    fn test_keeps_existing_view_box() {
        let src = r#"<svg viewBox="0 0 512 256" width="10" height="5"/>"#;
        let out = normalize_svg(src, 32).unwrap();
        assert_eq!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 512 256" width="32" height="32"/>"#
        );
    }

    #[test]
    fn test_empty_view_box_is_replaced() {
        let src = r#"<svg viewBox="" width="16" height="8"/>"#;
        let out = normalize_svg(src, 16).unwrap();
        assert!(out.contains(r#"viewBox="0 0 16 8""#), "{out}");
    }

    #[test]
    fn test_fallback_when_no_dimensions() {
        let out = normalize_svg("<svg/>", 48).unwrap();
        assert_eq!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100" width="48" height="48"/>"#
        );
    }

    #[test]
    fn test_fallback_for_unusable_dimensions() {
        for (w, h) in [("auto", "24"), ("0", "0"), ("-5", "10"), ("24", "none")] {
            let src = format!(r#"<svg width="{w}" height="{h}"/>"#);
            let out = normalize_svg(&src, 16).unwrap();
            assert!(
                out.contains(r#"viewBox="0 0 100 100""#),
                "width={w} height={h}: {out}"
            );
        }
    }

    #[test]
    fn test_missing_axis_defaults_alone() {
        let out = normalize_svg(r#"<svg width="24"/>"#, 16).unwrap();
        assert_eq!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="16" viewBox="0 0 24 100" height="16"/>"#
        );

        let out = normalize_svg(r#"<svg height="12px"/>"#, 16).unwrap();
        assert!(out.contains(r#"viewBox="0 0 100 12""#), "{out}");

        let out = normalize_svg(r#"<svg width="24" height=""/>"#, 16).unwrap();
        assert!(out.contains(r#"viewBox="0 0 24 100""#), "{out}");
    }

    #[test]
    fn test_unit_suffixes_use_leading_number() {
        let src = r#"<svg width="24px" height="12.5pt"/>"#;
        let out = normalize_svg(src, 16).unwrap();
        assert!(out.contains(r#"viewBox="0 0 24 12.5""#), "{out}");
    }

    #[test]
    fn test_idempotent() {
        let once = normalize_svg(ICON_24, 180).unwrap();
        let twice = normalize_svg(&once, 180).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_prolog_and_children_pass_through() {
        let src = "<?xml version=\"1.0\"?>\n<!-- logo -->\n<svg width=\"24\" height=\"24\">\n  <path d=\"M0 0h24v24H0z\" fill=\"#f00\"/>\n</svg>\n";
        let out = normalize_svg(src, 32).unwrap();

        assert!(out.starts_with("<?xml version=\"1.0\"?>\n<!-- logo -->\n<svg "));
        assert!(out.ends_with(">\n  <path d=\"M0 0h24v24H0z\" fill=\"#f00\"/>\n</svg>\n"));
    }

    #[test]
    fn test_escaped_attribute_values_survive() {
        let src = r#"<svg data-title="a &amp; b" width="24" height="24"/>"#;
        let once = normalize_svg(src, 16).unwrap();
        assert!(once.contains(r#"data-title="a &amp; b""#), "{once}");
        assert_eq!(normalize_svg(&once, 16).unwrap(), once);
    }

    #[test]
    fn test_existing_namespace_untouched() {
        let src = r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink"/>"#;
        let out = normalize_svg(src, 16).unwrap();
        assert_eq!(out.matches("xmlns=").count(), 1, "{out}");
        assert!(out.contains("xmlns:xlink"));
    }

    #[test]
    fn test_rejects_non_svg_root() {
        let err = normalize_svg("<html><body/></html>", 16).unwrap_err();
        assert!(matches!(err, RasterError::InvalidSource(_)));
    }

    #[test]
    fn test_rejects_empty_and_plain_text() {
        assert!(matches!(
            normalize_svg("", 16),
            Err(RasterError::InvalidSource(_))
        ));
        assert!(matches!(
            normalize_svg("definitely not markup", 16),
            Err(RasterError::InvalidSource(_))
        ));
    }

    #[test]
    fn test_rejects_mismatched_tags() {
        let err = normalize_svg("<svg><g></svg>", 16).unwrap_err();
        assert!(matches!(err, RasterError::InvalidSource(_)));
    }

    #[test]
    fn test_parse_leading_number() {
        assert_eq!(parse_leading_number("24"), Some(24.0));
        assert_eq!(parse_leading_number(" 24px"), Some(24.0));
        assert_eq!(parse_leading_number("1e2"), Some(100.0));
        assert_eq!(parse_leading_number("1e"), Some(1.0));
        assert_eq!(parse_leading_number("100%"), Some(100.0));
        assert_eq!(parse_leading_number("auto"), None);
        assert_eq!(parse_leading_number(""), None);
    }
}

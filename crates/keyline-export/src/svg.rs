//! SVG serialization.
//!
//! Converts fitted segment lists into an SVG string with `<path>`
//! elements using the [`svg`] crate for document construction, XML
//! escaping, and path data formatting.
//!
//! Each contour becomes one closed `<path>` with an explicit fill, so
//! the transparency post-processor can later declare `fill="none"` on
//! the root without hiding the traced shapes.
//!
//! This is a pure function with no I/O -- it returns a `String`.

use svg::Document;
use svg::node::Value;
use svg::node::element::Path;
use svg::node::element::path::Data;

use keyline_trace::{Dimensions, Segment, TraceOptions};

/// Fill color used when [`TraceOptions::fill_color`] is unset.
pub const DEFAULT_FILL: &str = "black";

/// Build an SVG path `d` attribute string from a segment list.
///
/// Returns an empty string for an empty segment list. Coordinates are
/// formatted by the [`svg`] crate, so identical input always produces
/// identical text.
#[must_use]
pub fn build_path_data(segments: &[Segment]) -> String {
    if segments.is_empty() {
        return String::new();
    }

    let mut data = Data::new();
    for segment in segments {
        data = match *segment {
            Segment::MoveTo(p) => data.move_to((p.x, p.y)),
            Segment::LineTo(p) => data.line_to((p.x, p.y)),
            Segment::QuadTo { control, end } => {
                data.quadratic_curve_to((control.x, control.y, end.x, end.y))
            }
            Segment::Close => data.close(),
        };
    }
    String::from(Value::from(data))
}

/// Serialize fitted paths into an SVG document string.
///
/// The `viewBox` is set from [`Dimensions`] so the SVG coordinate space
/// matches the source image pixel grid. Zero paths produce a valid,
/// empty document rather than an error. When
/// [`TraceOptions::background_color`] is set, it is declared as an
/// inline style on the root element; otherwise the background is left
/// for the transparency post-processor.
#[must_use]
pub fn render_svg(paths: &[Vec<Segment>], dimensions: Dimensions, options: &TraceOptions) -> String {
    let w = dimensions.width;
    let h = dimensions.height;
    let mut doc = Document::new()
        .set("width", w)
        .set("height", h)
        .set("viewBox", (0, 0, w, h));

    if let Some(background) = &options.background_color {
        doc = doc.set("style", format!("background-color: {background}"));
    }

    let fill = options.fill_color.as_deref().unwrap_or(DEFAULT_FILL);

    for segments in paths {
        let d = build_path_data(segments);
        if d.is_empty() {
            continue;
        }

        let path = Path::new()
            .set("d", d)
            .set("fill", fill)
            .set("fill-rule", "evenodd");
        doc = doc.add(path);
    }

    // The svg crate omits the XML declaration, so we prepend it.
    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{doc}\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use keyline_trace::Point;

    use super::*;

    fn dims(width: u32, height: u32) -> Dimensions {
        Dimensions { width, height }
    }

    fn square_path() -> Vec<Segment> {
        vec![
            Segment::MoveTo(Point::new(0.0, 0.0)),
            Segment::LineTo(Point::new(4.0, 0.0)),
            Segment::LineTo(Point::new(4.0, 4.0)),
            Segment::LineTo(Point::new(0.0, 4.0)),
            Segment::Close,
        ]
    }

    // --- build_path_data ---

    #[test]
    fn empty_segments_produce_empty_data() {
        assert_eq!(build_path_data(&[]), "");
    }

    #[test]
    fn line_segments_use_move_line_close() {
        let d = build_path_data(&square_path());
        assert!(d.starts_with("M0,0"));
        assert!(d.contains("L4,0"));
        assert!(d.contains("L0,4"));
        assert!(d.ends_with('z') || d.ends_with('Z'));
    }

    #[test]
    fn quad_segments_emit_q_commands() {
        let segments = vec![
            Segment::MoveTo(Point::new(0.0, 2.0)),
            Segment::QuadTo {
                control: Point::new(0.0, 0.0),
                end: Point::new(2.0, 0.0),
            },
            Segment::Close,
        ];
        let d = build_path_data(&segments);
        assert!(d.contains('Q'), "expected a quadratic command in {d}");
    }

    // --- render_svg ---

    #[test]
    fn empty_paths_produce_valid_svg_with_no_paths() {
        let svg = render_svg(&[], dims(100, 50), &TraceOptions::default());
        assert!(svg.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(svg.contains(r#"xmlns="http://www.w3.org/2000/svg""#));
        assert!(svg.contains(r#"width="100""#));
        assert!(svg.contains(r#"height="50""#));
        assert!(svg.contains(r#"viewBox="0 0 100 50""#));
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn paths_carry_explicit_fill() {
        let svg = render_svg(
            &[square_path()],
            dims(10, 10),
            &TraceOptions::default(),
        );
        assert_eq!(svg.matches("<path").count(), 1);
        assert!(svg.contains(r#"fill="black""#));
        assert!(svg.contains(r#"fill-rule="evenodd""#));
    }

    #[test]
    fn custom_fill_color_is_used() {
        let options = TraceOptions {
            fill_color: Some("#336699".to_owned()),
            ..TraceOptions::default()
        };
        let svg = render_svg(&[square_path()], dims(10, 10), &options);
        assert!(svg.contains(r##"fill="#336699""##));
    }

    #[test]
    fn background_color_declared_when_set() {
        let options = TraceOptions {
            background_color: Some("white".to_owned()),
            ..TraceOptions::default()
        };
        let svg = render_svg(&[], dims(10, 10), &options);
        assert!(svg.contains("background-color: white"));
    }

    #[test]
    fn empty_segment_lists_are_skipped() {
        let paths = vec![vec![], square_path(), vec![]];
        let svg = render_svg(&paths, dims(10, 10), &TraceOptions::default());
        assert_eq!(svg.matches("<path").count(), 1);
    }

    #[test]
    fn viewbox_reflects_dimensions() {
        let svg = render_svg(&[], dims(1920, 1080), &TraceOptions::default());
        assert!(svg.contains(r#"viewBox="0 0 1920 1080""#));
    }

    #[test]
    fn rendering_is_deterministic() {
        let paths = vec![square_path()];
        let options = TraceOptions::default();
        let first = render_svg(&paths, dims(10, 10), &options);
        let second = render_svg(&paths, dims(10, 10), &options);
        assert_eq!(first, second);
    }
}

use std::fmt::Write;

const FONT: &str = "Helvetica, Arial, 'Noto Sans CJK TC', sans-serif";

/// Minimal SVG writer holding the document body as it is built.
pub(super) struct SvgDocument {
    width: f64,
    height: f64,
    body: String,
}

impl SvgDocument {
    pub(super) fn new(width: f64, height: f64) -> Self {
        let mut doc = Self {
            width,
            height,
            body: String::new(),
        };
        doc.rect(0.0, 0.0, width, height, "#ffffff");
        doc
    }

    pub(super) fn title(&mut self, title: &str) {
        let x = self.width / 2.0;
        self.text(x, 30.0, title, "middle", 18.0, "#222222");
    }

    pub(super) fn empty_notice(&mut self) {
        let (x, y) = (self.width / 2.0, self.height / 2.0);
        self.text(x, y, "No data", "middle", 16.0, "#888888");
    }

    pub(super) fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: &str) {
        let _ = writeln!(
            self.body,
            r#"<rect x="{x:.2}" y="{y:.2}" width="{width:.2}" height="{height:.2}" fill="{}"/>"#,
            escape(fill)
        );
    }

    pub(super) fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str) {
        let _ = writeln!(
            self.body,
            r#"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}" stroke="{}" stroke-width="1"/>"#,
            escape(stroke)
        );
    }

    pub(super) fn text(&mut self, x: f64, y: f64, content: &str, anchor: &str, size: f64, fill: &str) {
        let _ = writeln!(
            self.body,
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="{anchor}" font-family="{FONT}" font-size="{size}" fill="{}">{}</text>"#,
            escape(fill),
            escape(content)
        );
    }

    /// Annular sector between two angles (radians, clockwise from +x).
    #[allow(clippy::too_many_arguments)]
    pub(super) fn donut_slice(
        &mut self,
        cx: f64,
        cy: f64,
        outer: f64,
        inner: f64,
        start: f64,
        end: f64,
        fill: &str,
    ) {
        let large_arc = u8::from(end - start > std::f64::consts::PI);
        let point = |radius: f64, angle: f64| (cx + radius * angle.cos(), cy + radius * angle.sin());
        let (ox1, oy1) = point(outer, start);
        let (ox2, oy2) = point(outer, end);
        let (ix1, iy1) = point(inner, end);
        let (ix2, iy2) = point(inner, start);
        let _ = writeln!(
            self.body,
            r##"<path d="M {ox1:.2} {oy1:.2} A {outer:.2} {outer:.2} 0 {large_arc} 1 {ox2:.2} {oy2:.2} L {ix1:.2} {iy1:.2} A {inner:.2} {inner:.2} 0 {large_arc} 0 {ix2:.2} {iy2:.2} Z" fill="{}" stroke="#ffffff" stroke-width="2"/>"##,
            escape(fill)
        );
    }

    /// Full ring, used when a single slice covers the whole donut.
    pub(super) fn ring(&mut self, cx: f64, cy: f64, outer: f64, inner: f64, fill: &str) {
        let _ = writeln!(
            self.body,
            r#"<path d="{} {}" fill="{}" fill-rule="evenodd"/>"#,
            circle_path(cx, cy, outer),
            circle_path(cx, cy, inner),
            escape(fill)
        );
    }

    pub(super) fn legend_entry(&mut self, x: f64, y: f64, fill: &str, label: &str) {
        self.rect(x, y - 11.0, 14.0, 14.0, fill);
        self.text(x + 20.0, y, label, "start", 12.0, "#333333");
    }

    pub(super) fn finish(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{body}</svg>\n",
            w = self.width,
            h = self.height,
            body = self.body
        )
    }
}

fn circle_path(cx: f64, cy: f64, r: f64) -> String {
    format!(
        "M {:.2} {cy:.2} A {r:.2} {r:.2} 0 1 1 {:.2} {cy:.2} A {r:.2} {r:.2} 0 1 1 {:.2} {cy:.2} Z",
        cx - r,
        cx + r,
        cx - r
    )
}

pub(super) fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_is_wrapped_in_svg_root() {
        let mut doc = SvgDocument::new(100.0, 50.0);
        doc.line(0.0, 0.0, 10.0, 10.0, "#000");
        let svg = doc.finish();
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"100\""));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("<line"));
    }
}

//! SVG line chart.

use std::fmt::Write;

/// Plot dimensions in SVG user units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineChart {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for LineChart {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 500.0,
            padding: 20.0,
        }
    }
}

/// Colours of a rendered chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartStyle {
    pub stroke: String,
    pub background: String,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            stroke: "black".to_string(),
            background: "white".to_string(),
        }
    }
}

impl LineChart {
    /// Map values to SVG coordinates.
    ///
    /// Values are spread evenly along x. The smallest value sits on the
    /// bottom padding line and the largest on the top one; y grows
    /// downwards. A flat series is drawn along the bottom.
    pub fn points(&self, data: &[f64]) -> Vec<(f64, f64)> {
        let Some(min) = data.iter().copied().reduce(f64::min) else {
            return Vec::new();
        };
        let max = data.iter().copied().fold(min, f64::max);
        let range = if max - min == 0.0 { 1.0 } else { max - min };

        let inner_width = self.width - 2.0 * self.padding;
        let inner_height = self.height - 2.0 * self.padding;
        let steps = data.len().saturating_sub(1).max(1) as f64;

        data.iter()
            .enumerate()
            .map(|(index, value)| {
                let x = index as f64 / steps * inner_width + self.padding;
                let y = self.height - self.padding - (value - min) / range * inner_height;
                (x, y)
            })
            .collect()
    }

    /// Render a standalone SVG document: the polyline, the first value in
    /// the bottom-left corner and the last value in the top-right corner.
    pub fn render_svg(&self, data: &[f64], style: &ChartStyle) -> String {
        let points = self
            .points(data)
            .iter()
            .map(|(x, y)| format!("{},{}", x, y))
            .collect::<Vec<_>>()
            .join(" ");
        let stroke = escape_attr(&style.stroke);
        let background = escape_attr(&style.background);

        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="300" height="300" style="background-color: {}">"#,
            self.width, self.height, background
        );
        let _ = writeln!(
            svg,
            r#"  <polyline points="{}" fill="none" stroke="{}" stroke-width="4" stroke-linecap="round" stroke-linejoin="round"/>"#,
            points, stroke
        );

        if let (Some(first), Some(last)) = (data.first(), data.last()) {
            let _ = writeln!(
                svg,
                r#"  <text x="{}" y="{}" fill="{}" font-size="20" font-family="sans-serif" text-anchor="start">{}</text>"#,
                self.padding,
                self.height - self.padding + 15.0,
                stroke,
                first
            );
            let _ = writeln!(
                svg,
                r#"  <text x="{}" y="{}" fill="{}" font-size="20" font-family="sans-serif" text-anchor="end" dominant-baseline="hanging">{}</text>"#,
                self.width - self.padding,
                self.padding,
                stroke,
                last
            );
        }

        svg.push_str("</svg>\n");
        svg
    }
}

/// Escape a value for a double-quoted XML attribute.
fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_span_the_padded_area() {
        let chart = LineChart::default();
        let points = chart.points(&[0.0, 5.0, 10.0]);
        assert_eq!(points, vec![(20.0, 480.0), (250.0, 250.0), (480.0, 20.0)]);
    }

    #[test]
    fn test_flat_and_degenerate_series() {
        let chart = LineChart::default();
        assert!(chart.points(&[]).is_empty());
        assert_eq!(chart.points(&[7.0]), vec![(20.0, 480.0)]);
        assert_eq!(chart.points(&[3.0, 3.0]), vec![(20.0, 480.0), (480.0, 480.0)]);
    }

    #[test]
    fn test_svg_labels_first_and_last_value() {
        let svg = LineChart::default().render_svg(&[1.0, 4.0, 2.5], &ChartStyle::default());
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"points="20,480 250,20 480,250""#));
        assert!(svg.contains(r#"text-anchor="start">1</text>"#));
        assert!(svg.contains(r#"text-anchor="end" dominant-baseline="hanging">2.5</text>"#));
        assert!(svg.contains("background-color: white"));
    }

    #[test]
    fn test_colours_cannot_break_out_of_attributes() {
        let style = ChartStyle {
            stroke: r#"red"/><script>alert(1)</script><x a=""#.to_string(),
            background: "a&b".to_string(),
        };
        let svg = LineChart::default().render_svg(&[1.0, 2.0], &style);
        assert!(!svg.contains("<script>"));
        assert!(svg.contains(r#"stroke="red&quot;/&gt;&lt;script&gt;alert(1)&lt;/script&gt;&lt;x a=&quot;""#));
        assert!(svg.contains("background-color: a&amp;b"));
        assert_eq!(svg.matches("<text").count(), 2);
    }
}

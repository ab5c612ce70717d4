//! SVG chart geometry.
//!
//! Turns a `(label, value)` series into view-box coordinates. Rendering is
//! left to the UI; everything here is plain arithmetic.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartFrame {
    pub width: f64,
    pub height: f64,
    /// Space kept free on every side for axis labels.
    pub padding: f64,
}

impl Default for ChartFrame {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 280.0,
            padding: 36.0,
        }
    }
}

impl ChartFrame {
    pub fn plot_width(&self) -> f64 {
        (self.width - 2.0 * self.padding).max(0.0)
    }

    pub fn plot_height(&self) -> f64 {
        (self.height - 2.0 * self.padding).max(0.0)
    }

    /// y coordinate of the zero line.
    pub fn baseline(&self) -> f64 {
        self.height - self.padding
    }

    pub fn view_box(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartGeometry {
    pub frame: ChartFrame,
    pub points: Vec<ChartPoint>,
    /// Top of the y axis after rounding up.
    pub max_value: f64,
    /// Horizontal grid lines as `(y, value)`.
    pub ticks: Vec<(f64, f64)>,
}

impl ChartGeometry {
    /// `points` attribute for an SVG `<polyline>`.
    pub fn polyline(&self) -> String {
        self.points
            .iter()
            .map(|p| format!("{:.1},{:.1}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Width of one bar, leaving a gap between neighbours.
    pub fn bar_width(&self) -> f64 {
        let slots = self.points.len().max(1) as f64;
        (self.frame.plot_width() / slots * 0.6).max(1.0)
    }
}

/// Round up to 1, 2, 2.5 or 5 times a power of ten.
pub fn nice_ceiling(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(value.log10().floor());
    let fraction = value / magnitude;
    let nice = [1.0, 2.0, 2.5, 5.0, 10.0]
        .into_iter()
        .find(|step| fraction <= *step)
        .unwrap_or(10.0);
    nice * magnitude
}

/// Lay out one point per bucket. Points are spread evenly across the plot
/// width; a single point sits in the middle. Negative values clamp to the
/// baseline.
pub fn layout(series: &[(String, f64)], frame: ChartFrame, tick_count: usize) -> ChartGeometry {
    let peak = series.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    let max_value = nice_ceiling(peak);
    let plot_w = frame.plot_width();
    let plot_h = frame.plot_height();

    let x_at = |i: usize| -> f64 {
        if series.len() <= 1 {
            frame.padding + plot_w / 2.0
        } else {
            frame.padding + plot_w * i as f64 / (series.len() - 1) as f64
        }
    };
    let y_at = |v: f64| -> f64 { frame.baseline() - plot_h * (v.max(0.0) / max_value) };

    let points = series
        .iter()
        .enumerate()
        .map(|(i, (label, value))| ChartPoint {
            label: label.clone(),
            value: *value,
            x: x_at(i),
            y: y_at(*value),
        })
        .collect();

    let ticks = (0..=tick_count)
        .map(|i| {
            let value = max_value * i as f64 / tick_count.max(1) as f64;
            (y_at(value), value)
        })
        .collect();

    ChartGeometry {
        frame,
        points,
        max_value,
        ticks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> Vec<(String, f64)> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| (format!("b{i}"), *v))
            .collect()
    }

    #[test]
    fn test_nice_ceiling() {
        assert_eq!(nice_ceiling(0.0), 1.0);
        assert_eq!(nice_ceiling(7.0), 10.0);
        assert_eq!(nice_ceiling(1800.0), 2000.0);
        assert_eq!(nice_ceiling(2100.0), 2500.0);
        assert_eq!(nice_ceiling(4000.0), 5000.0);
        assert_eq!(nice_ceiling(f64::NAN), 1.0);
    }

    #[test]
    fn test_one_point_per_bucket() {
        let geometry = layout(&series(&[1.0; 12]), ChartFrame::default(), 4);
        assert_eq!(geometry.points.len(), 12);
        assert_eq!(geometry.ticks.len(), 5);
    }

    #[test]
    fn test_points_span_plot_area() {
        let frame = ChartFrame {
            width: 200.0,
            height: 100.0,
            padding: 10.0,
        };
        let geometry = layout(&series(&[0.0, 5.0, 10.0]), frame, 2);

        assert_eq!(geometry.max_value, 10.0);
        assert_eq!(geometry.points[0].x, 10.0);
        assert_eq!(geometry.points[2].x, 190.0);
        assert_eq!(geometry.points[0].y, 90.0);
        assert_eq!(geometry.points[1].y, 50.0);
        assert_eq!(geometry.points[2].y, 10.0);
        assert_eq!(geometry.polyline(), "10.0,90.0 100.0,50.0 190.0,10.0");
        assert_eq!(geometry.ticks, vec![(90.0, 0.0), (50.0, 5.0), (10.0, 10.0)]);
    }

    #[test]
    fn test_single_point_is_centered() {
        let frame = ChartFrame {
            width: 200.0,
            height: 100.0,
            padding: 10.0,
        };
        let geometry = layout(&series(&[3.0]), frame, 1);
        assert_eq!(geometry.points[0].x, 100.0);
    }

    #[test]
    fn test_empty_and_negative_series() {
        let frame = ChartFrame::default();
        assert!(layout(&[], frame, 4).points.is_empty());

        let geometry = layout(&series(&[-5.0]), frame, 4);
        assert_eq!(geometry.points[0].y, frame.baseline());
    }

    #[test]
    fn test_view_box_and_bar_width() {
        let frame = ChartFrame {
            width: 200.0,
            height: 100.0,
            padding: 10.0,
        };
        assert_eq!(frame.view_box(), "0 0 200 100");
        let geometry = layout(&series(&[1.0, 2.0, 3.0, 4.0]), frame, 2);
        assert!((geometry.bar_width() - 27.0).abs() < 1e-9);
    }
}

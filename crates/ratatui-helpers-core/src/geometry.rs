use ratatui::layout::Rect;

/// Target resting height of a bottom sheet.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum SheetHeight {
    #[default]
    Half,
    Quarter,
    ThreeQuarter,
    Custom(f64),
}

impl SheetHeight {
    /// Resolves the height in points against the current viewport height.
    ///
    /// Never cache the result: it has to follow the viewport.
    pub fn resolve(self, viewport_height: f64) -> f64 {
        match self {
            SheetHeight::Half => viewport_height / 2.0,
            SheetHeight::Quarter => viewport_height / 4.0,
            SheetHeight::ThreeQuarter => viewport_height * 0.75,
            SheetHeight::Custom(height) => height,
        }
    }
}

/// Visible area and bottom safe-area inset, in points.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub safe_area_bottom: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, safe_area_bottom: f64) -> Self {
        Self {
            width,
            height,
            safe_area_bottom,
        }
    }

    /// Converts a terminal area into points, `row_height` points per row.
    ///
    /// `height` excludes the bottom `safe_area_rows`, so a presented sheet's bottom edge lands
    /// on the area's last row. Columns are scaled by the same factor; only the vertical axis
    /// matters to the sheet.
    pub fn from_area(area: Rect, row_height: f64, safe_area_rows: u16) -> Self {
        let safe_area_rows = safe_area_rows.min(area.height);
        Self {
            width: area.width as f64 * row_height,
            height: (area.height - safe_area_rows) as f64 * row_height,
            safe_area_bottom: safe_area_rows as f64 * row_height,
        }
    }
}

/// Converts a length in points back into whole terminal rows.
pub fn points_to_rows(points: f64, row_height: f64) -> i32 {
    if row_height <= 0.0 || !points.is_finite() {
        return 0;
    }
    (points / row_height).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_fractions_of_viewport() {
        assert_eq!(SheetHeight::Half.resolve(800.0), 400.0);
        assert_eq!(SheetHeight::Quarter.resolve(800.0), 200.0);
        assert_eq!(SheetHeight::ThreeQuarter.resolve(800.0), 600.0);
    }

    #[test]
    fn custom_height_ignores_viewport() {
        assert_eq!(SheetHeight::Custom(123.0).resolve(800.0), 123.0);
        assert_eq!(SheetHeight::Custom(123.0).resolve(10.0), 123.0);
    }

    #[test]
    fn area_converts_with_row_height() {
        let vp = Viewport::from_area(Rect::new(0, 0, 80, 40), 16.0, 0);
        assert_eq!(vp.height, 640.0);
        assert_eq!(vp.width, 1280.0);
        assert_eq!(vp.safe_area_bottom, 0.0);
    }

    #[test]
    fn safe_area_rows_come_out_of_the_height() {
        let vp = Viewport::from_area(Rect::new(0, 0, 80, 40), 16.0, 2);
        assert_eq!(vp.height, 608.0);
        assert_eq!(vp.safe_area_bottom, 32.0);
        // The presented bottom edge, H + B, is the area's bottom edge.
        assert_eq!(vp.height + vp.safe_area_bottom, 640.0);

        let tiny = Viewport::from_area(Rect::new(0, 0, 80, 1), 16.0, 3);
        assert_eq!(tiny.height, 0.0);
        assert_eq!(tiny.safe_area_bottom, 16.0);
    }

    #[test]
    fn rounds_points_to_rows() {
        assert_eq!(points_to_rows(330.0, 16.0), 21);
        assert_eq!(points_to_rows(10.0, 0.0), 0);
    }
}

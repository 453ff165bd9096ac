//! The GNS3 scene and the mapping from source to display coordinates.
//!
//! EVE-NG positions are measured from the top-left corner of the lab, while
//! GNS3 measures from the center of its scene. A [`Canvas`] is computed once
//! from every node position and is immutable afterwards, so all nodes, links
//! and drawings are placed with the same transform.

use log::debug;

use eve2gns_core::{
    geometry::{Point, Size},
    record::SourcePosition,
};

use crate::config::CanvasConfig;

/// Frozen scene geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    size: Size,
    scale: f64,
    /// Size that percentage source positions are resolved against
    reference: Size,
}

impl Canvas {
    /// Creates a canvas with an explicit size.
    pub fn new(size: Size, scale: f64, reference: Size) -> Self {
        Self {
            size,
            scale,
            reference,
        }
    }

    /// Computes the scene that fits all `positions`.
    ///
    /// Each axis is `ceil((max * scale + margin) / grid) * grid`, clamped up
    /// to the configured default size. Without positions the default size is
    /// used.
    ///
    /// # Examples
    ///
    /// ```
    /// # use eve2gns::{Canvas, config::CanvasConfig};
    /// # use eve2gns_core::{geometry::Size, record::SourcePosition};
    /// let positions = [
    ///     SourcePosition::absolute(2100.0, 300.0),
    ///     SourcePosition::absolute(450.0, 1250.0),
    /// ];
    /// let canvas = Canvas::compute(positions, &CanvasConfig::default());
    ///
    /// assert_eq!(canvas.size(), Size::new(2500.0, 1500.0));
    /// ```
    pub fn compute<I>(positions: I, config: &CanvasConfig) -> Self
    where
        I: IntoIterator<Item = SourcePosition>,
    {
        let reference = config.default_size();
        let mut max: Option<Point> = None;

        for position in positions {
            let point = position.resolve(reference);
            max = Some(match max {
                None => point,
                Some(max) => Point::new(max.x().max(point.x()), max.y().max(point.y())),
            });
        }

        let size = match max {
            None => reference,
            Some(max) => {
                let fit = |extent: f64| {
                    let grid = config.grid();
                    let padded = extent * config.scale() + config.margin();
                    if grid > 0.0 {
                        (padded / grid).ceil() * grid
                    } else {
                        padded.ceil()
                    }
                };
                Size::new(fit(max.x()), fit(max.y())).max(reference)
            }
        };

        debug!(width = size.width(), height = size.height(); "Canvas size computed");

        Self::new(size, config.scale(), reference)
    }

    /// Scene dimensions.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Resolves percentage coordinates against the reference size.
    pub fn resolve(&self, position: SourcePosition) -> Point {
        position.resolve(self.reference)
    }

    /// Maps a source position to integer display coordinates:
    /// `round(position) * scale - size / 2`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use eve2gns::Canvas;
    /// # use eve2gns_core::{geometry::{Point, Size}, record::SourcePosition};
    /// let size = Size::new(2000.0, 1000.0);
    /// let canvas = Canvas::new(size, 1.0, size);
    ///
    /// let display = canvas.transform(SourcePosition::absolute(363.4, 240.0));
    /// assert_eq!(display, Point::new(-637.0, -260.0));
    /// ```
    pub fn transform(&self, position: SourcePosition) -> Point {
        (self.resolve(position).round().scale(self.scale) - self.size.half()).round()
    }

    /// Maps display coordinates back to the source space.
    ///
    /// Inverse of [`Canvas::transform`] up to rounding.
    pub fn inverse_transform(&self, display: Point) -> Point {
        (display + self.size.half()) / self.scale
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn check_canvas_is_grid_multiple_and_at_least_default(positions: &[(f64, f64)]) {
        let config = CanvasConfig::default();
        let canvas = Canvas::compute(
            positions
                .iter()
                .map(|&(x, y)| SourcePosition::absolute(x, y)),
            &config,
        );
        let size = canvas.size();

        assert_eq!(size.width() % 500.0, 0.0, "width {} not a multiple", size.width());
        assert_eq!(size.height() % 500.0, 0.0, "height {} not a multiple", size.height());
        assert!(size.width() >= 2000.0);
        assert!(size.height() >= 1000.0);

        for &(x, y) in positions {
            assert!(size.width() >= x + 200.0);
            assert!(size.height() >= y + 200.0);
        }
    }

    fn check_transform_inverse_within_one_unit(x: f64, y: f64, scale: f64) {
        let size = Size::new(3000.0, 2000.0);
        let canvas = Canvas::new(size, scale, size);
        let display = canvas.transform(SourcePosition::absolute(x, y));

        assert_eq!(display, display.round(), "display coordinates must be integers");

        let back = canvas.inverse_transform(display);
        assert!((back.x() - x).abs() <= 1.0 + 1e-9, "x: {x} -> {}", back.x());
        assert!((back.y() - y).abs() <= 1.0 + 1e-9, "y: {y} -> {}", back.y());
    }

    proptest! {
        #[test]
        fn canvas_is_grid_multiple_and_at_least_default(
            positions in prop::collection::vec((0.0f64..10_000.0, 0.0f64..10_000.0), 0..20)
        ) {
            check_canvas_is_grid_multiple_and_at_least_default(&positions);
        }

        #[test]
        fn transform_inverse_within_one_unit(
            x in -5_000.0f64..5_000.0,
            y in -5_000.0f64..5_000.0,
            scale in 1.0f64..4.0,
        ) {
            check_transform_inverse_within_one_unit(x, y, scale);
        }
    }
}

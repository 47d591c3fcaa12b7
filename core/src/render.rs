use image::{GrayImage, Luma, Rgb, RgbImage};
use palette::{Gradient, LinSrgb};

use crate::NoiseError;
use crate::sampler::Grid;

// Colour lookup over [0, 1] built from (position, linear rgb) stops
pub struct ColorRamp {
    gradient: Gradient<LinSrgb>,
}

impl ColorRamp {
    // Stops are sorted by position; None when there are none
    pub fn new(mut stops: Vec<(f32, [f32; 3])>) -> Option<Self> {
        if stops.is_empty() {
            return None;
        }
        stops.sort_by(|a, b| a.0.total_cmp(&b.0));
        let stops = stops
            .into_iter()
            .map(|(t, [r, g, b])| (t, LinSrgb::new(r, g, b)))
            .collect();
        Some(Self {
            gradient: Gradient::with_domain(stops),
        })
    }

    // Deep water to beach to grass to rock to snow
    pub fn terrain() -> Self {
        Self {
            gradient: Gradient::with_domain(vec![
                (0.00, LinSrgb::new(0.0, 0.0, 0.5)),
                (0.30, LinSrgb::new(0.8, 0.8, 0.5)),
                (0.50, LinSrgb::new(0.1, 0.6, 0.2)),
                (0.75, LinSrgb::new(0.5, 0.4, 0.3)),
                (1.00, LinSrgb::new(1.0, 1.0, 1.0)),
            ]),
        }
    }

    pub fn grayscale() -> Self {
        Self {
            gradient: Gradient::with_domain(vec![
                (0.0, LinSrgb::new(0.0, 0.0, 0.0)),
                (1.0, LinSrgb::new(1.0, 1.0, 1.0)),
            ]),
        }
    }

    pub fn color_at(&self, t: f64) -> Rgb<u8> {
        let col: LinSrgb = self.gradient.get(t.clamp(0.0, 1.0) as f32);
        let rgb = col.into_format::<u8>();
        Rgb([rgb.red, rgb.green, rgb.blue])
    }
}

fn dims(grid: &Grid<2>) -> Result<(u32, u32), NoiseError> {
    grid.check_len()?;
    let side = |axis: usize| {
        let len = grid.shape[axis];
        u32::try_from(len).map_err(|_| NoiseError::SamplerShape { axis, len })
    };
    Ok((side(0)?, side(1)?))
}

impl Grid<2> {
    // Values min–max normalised into [0, 1]; a flat grid maps to 0.5
    pub fn normalized_values(&self) -> Vec<f64> {
        let (min, max) = self.min_max();
        let span = max - min;
        self.values
            .iter()
            .map(|&v| {
                if span.abs() < f64::EPSILON {
                    0.5
                } else {
                    (v - min) / span
                }
            })
            .collect()
    }

    pub fn to_gray_image(&self) -> Result<GrayImage, NoiseError> {
        let (w, h) = dims(self)?;
        let norm = self.normalized_values();
        Ok(GrayImage::from_fn(w, h, |x, y| {
            let v = norm[y as usize * w as usize + x as usize];
            Luma([(v * 255.0).round() as u8])
        }))
    }

    pub fn to_color_image(&self, ramp: &ColorRamp) -> Result<RgbImage, NoiseError> {
        let (w, h) = dims(self)?;
        let norm = self.normalized_values();
        Ok(RgbImage::from_fn(w, h, |x, y| {
            ramp.color_at(norm[y as usize * w as usize + x as usize])
        }))
    }
}

#[cfg(test)]
mod tests {
    use image::{Luma, Rgb};

    use super::ColorRamp;
    use crate::NoiseError;
    use crate::generator::Generator;
    use crate::sampler::{Domain, Grid, sample_grid2};

    fn ramp_grid() -> Grid<2> {
        Grid {
            shape: [3, 2],
            domain: Domain::unit(),
            values: vec![-1.0, 0.0, 1.0, 1.0, 0.0, -1.0],
            failed_cells: 0,
        }
    }

    #[test]
    fn gray_image_spans_full_range() {
        let img = ramp_grid().to_gray_image().unwrap();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(*img.get_pixel(0, 0), Luma([0]));
        assert_eq!(*img.get_pixel(1, 0), Luma([128]));
        assert_eq!(*img.get_pixel(2, 0), Luma([255]));
        assert_eq!(*img.get_pixel(0, 1), Luma([255]));
    }

    #[test]
    fn flat_grid_is_mid_gray() {
        let mut grid = ramp_grid();
        grid.values = vec![0.25; 6];
        let img = grid.to_gray_image().unwrap();
        assert!(img.pixels().all(|p| *p == Luma([128])));
    }

    #[test]
    fn mismatched_grid_is_an_error_not_a_panic() {
        let mut grid = ramp_grid();
        grid.values.truncate(5);
        let expected = NoiseError::GridLength {
            expected: 6,
            found: 5,
        };
        assert_eq!(grid.to_gray_image().err(), Some(expected.clone()));
        assert_eq!(
            grid.to_color_image(&ColorRamp::terrain()).err(),
            Some(expected)
        );
    }

    #[test]
    fn terrain_ramp_endpoints() {
        let ramp = ColorRamp::terrain();
        assert_eq!(ramp.color_at(1.0), Rgb([255, 255, 255]));
        assert_eq!(ramp.color_at(7.0), Rgb([255, 255, 255]));
        let deep = ramp.color_at(0.0);
        assert_eq!((deep[0], deep[1]), (0, 0));
        assert!(deep[2] > 100);
    }

    #[test]
    fn custom_ramp_needs_stops() {
        assert!(ColorRamp::new(Vec::new()).is_none());
        let ramp = ColorRamp::new(vec![(1.0, [1.0, 0.0, 0.0]), (0.0, [0.0, 0.0, 1.0])]).unwrap();
        assert_eq!(ramp.color_at(0.0), Rgb([0, 0, 255]));
        assert_eq!(ramp.color_at(1.0), Rgb([255, 0, 0]));
    }

    #[test]
    fn sampled_grid_renders_in_colour() {
        let g = Generator::make(2025, 4.0, 1.0, 5, 0.5, 2.0).unwrap();
        let grid = sample_grid2(&g, Domain::unit(), [32, 16]).unwrap();
        let img = grid.to_color_image(&ColorRamp::terrain()).unwrap();
        assert_eq!(img.dimensions(), (32, 16));
        let gray = grid.to_gray_image().unwrap();
        assert!(gray.pixels().any(|p| p[0] == 0));
        assert!(gray.pixels().any(|p| p[0] == 255));
        assert_eq!(ColorRamp::grayscale().color_at(0.0), Rgb([0, 0, 0]));
    }
}

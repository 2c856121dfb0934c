//! Viewport and orthographic projection for the plot surface.
//!
//! The projection always maps the square [-1, 1] x [-1, 1] onto the whole
//! viewport, regardless of aspect ratio. The y axis is flipped so data-space
//! (-1, -1) lands in the top-left corner of the window.

/// Viewport rectangle in GL window coordinates (origin bottom-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Viewport covering a whole `width` x `height` window.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    /// Map normalized device coordinates to GL window coordinates.
    pub fn ndc_to_window(&self, ndc: [f32; 2]) -> [f32; 2] {
        [
            self.x as f32 + (ndc[0] + 1.0) * 0.5 * self.width as f32,
            self.y as f32 + (ndc[1] + 1.0) * 0.5 * self.height as f32,
        ]
    }
}

/// Column-major 4x4 orthographic projection matrix, as uploaded to GL.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    matrix: [[f32; 4]; 4],
}

impl Default for Projection {
    fn default() -> Self {
        Self::unit_square()
    }
}

impl Projection {
    /// Same matrix as `glOrtho(left, right, bottom, top, near, far)`.
    pub fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let tx = -(right + left) / (right - left);
        let ty = -(top + bottom) / (top - bottom);
        let tz = -(far + near) / (far - near);
        Self {
            matrix: [
                [2.0 / (right - left), 0.0, 0.0, 0.0],
                [0.0, 2.0 / (top - bottom), 0.0, 0.0],
                [0.0, 0.0, -2.0 / (far - near), 0.0],
                [tx, ty, tz, 1.0],
            ],
        }
    }

    /// The plot projection: x in [-1, 1] left to right, y in [-1, 1] top to
    /// bottom.
    pub fn unit_square() -> Self {
        Self::ortho(-1.0, 1.0, 1.0, -1.0, -1.0, 1.0)
    }

    pub fn matrix(&self) -> [[f32; 4]; 4] {
        self.matrix
    }

    /// Transform a data-space point (z = 0) to normalized device coordinates.
    pub fn project(&self, point: [f32; 2]) -> [f32; 2] {
        let m = &self.matrix;
        let clip_x = m[0][0] * point[0] + m[1][0] * point[1] + m[3][0];
        let clip_y = m[0][1] * point[0] + m[1][1] * point[1] + m[3][1];
        let w = m[0][3] * point[0] + m[1][3] * point[1] + m[3][3];
        [clip_x / w, clip_y / w]
    }

    /// Pixel (column, row) hit by a data-space point, counting rows from the
    /// top of the window. Points on the far edges land on the last pixel.
    pub fn window_pixel(&self, viewport: &Viewport, point: [f32; 2]) -> (u32, u32) {
        let [wx, wy] = viewport.ndc_to_window(self.project(point));
        let window_height = (viewport.y as f32 + viewport.height as f32).max(0.0);
        let col = wx.floor().max(0.0) as u32;
        let row = (window_height - wy).floor().max(0.0) as u32;
        let max_col = (viewport.x.max(0) as u32 + viewport.width).saturating_sub(1);
        let max_row = (viewport.y.max(0) as u32 + viewport.height).saturating_sub(1);
        (col.min(max_col), row.min(max_row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_square_flips_y() {
        let p = Projection::unit_square();
        assert_eq!(p.project([-1.0, -1.0]), [-1.0, 1.0]);
        assert_eq!(p.project([1.0, 1.0]), [1.0, -1.0]);
        assert_eq!(p.project([0.0, 0.0]), [0.0, 0.0]);
    }

    #[test]
    fn corners_map_to_window_corners() {
        let p = Projection::unit_square();
        let vp = Viewport::full(800, 400);
        assert_eq!(p.window_pixel(&vp, [-1.0, -1.0]), (0, 0));
        assert_eq!(p.window_pixel(&vp, [1.0, 1.0]), (799, 399));
        assert_eq!(p.window_pixel(&vp, [1.0, -1.0]), (799, 0));
        assert_eq!(p.window_pixel(&vp, [-1.0, 1.0]), (0, 399));
    }

    #[test]
    fn centre_is_aspect_independent() {
        let p = Projection::unit_square();
        assert_eq!(p.window_pixel(&Viewport::full(600, 600), [0.0, 0.0]), (300, 300));
        assert_eq!(p.window_pixel(&Viewport::full(800, 400), [0.0, 0.0]), (400, 200));
    }

    #[test]
    fn ortho_matches_gl_reference() {
        let m = Projection::ortho(0.0, 10.0, 0.0, 5.0, -1.0, 1.0).matrix();
        assert_eq!(m[0][0], 0.2);
        assert_eq!(m[1][1], 0.4);
        assert_eq!(m[2][2], -1.0);
        assert_eq!(m[3], [-1.0, -1.0, 0.0, 1.0]);
    }
}

//! 4x4 transform matrix.
//!
//! [`Matrix`] stores sixteen `f32` values in the same order they are uploaded
//! to the shaders. Translation lives in entries 12..14, so a row vector times
//! the matrix applies the transform, and `a.multiply(&b)` applies `a` first and
//! `b` second. WGSL reads the uploaded list column-major, which turns
//! `projection * view * model * position` in the shader into the same order.

use std::ops::Mul;

#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Matrix([[f32; 4]; 4]);

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix {
    pub fn identity() -> Matrix {
        Matrix([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Right-handed perspective projection with an explicit depth range.
    ///
    /// Maps view-space `z` using `(far + near) / (near - far)` and writes `-1`
    /// into the `w` column, so the perspective divide is by `-z`. Degenerate
    /// inputs (`aspect == 0`, `near == far`) are not guarded.
    pub fn projection(field_of_view_in_radians: f32, aspect: f32, near: f32, far: f32) -> Matrix {
        let f = 1.0 / (field_of_view_in_radians / 2.0).tan();
        Matrix([
            [f / aspect, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, (far + near) / (near - far), -1.0],
            [0.0, 0.0, (2.0 * far * near) / (near - far), 0.0],
        ])
    }

    pub fn translation(tx: f32, ty: f32, tz: f32) -> Matrix {
        Matrix([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [tx, ty, tz, 1.0],
        ])
    }

    pub fn scaling(sx: f32, sy: f32, sz: f32) -> Matrix {
        Matrix([
            [sx, 0.0, 0.0, 0.0],
            [0.0, sy, 0.0, 0.0],
            [0.0, 0.0, sz, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_x(angle_in_radians: f32) -> Matrix {
        let c = angle_in_radians.cos();
        let s = angle_in_radians.sin();
        Matrix([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_y(angle_in_radians: f32) -> Matrix {
        let c = angle_in_radians.cos();
        let s = angle_in_radians.sin();
        Matrix([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_z(angle_in_radians: f32) -> Matrix {
        let c = angle_in_radians.cos();
        let s = angle_in_radians.sin();
        Matrix([
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Full 4x4 product `self * other`.
    pub fn multiply(&self, other: &Matrix) -> Matrix {
        let mut result = [[0.0; 4]; 4];
        for (i, row) in result.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = self.0[i][0] * other.0[0][j]
                    + self.0[i][1] * other.0[1][j]
                    + self.0[i][2] * other.0[2][j]
                    + self.0[i][3] * other.0[3][j];
            }
        }
        Matrix(result)
    }

    pub fn translate(&self, tx: f32, ty: f32, tz: f32) -> Matrix {
        self.multiply(&Matrix::translation(tx, ty, tz))
    }

    pub fn scale(&self, sx: f32, sy: f32, sz: f32) -> Matrix {
        self.multiply(&Matrix::scaling(sx, sy, sz))
    }

    pub fn rotate_x(&self, angle_in_radians: f32) -> Matrix {
        self.multiply(&Matrix::rotation_x(angle_in_radians))
    }

    pub fn rotate_y(&self, angle_in_radians: f32) -> Matrix {
        self.multiply(&Matrix::rotation_y(angle_in_radians))
    }

    pub fn rotate_z(&self, angle_in_radians: f32) -> Matrix {
        self.multiply(&Matrix::rotation_z(angle_in_radians))
    }

    /// Transforms a point as a row vector `[x, y, z, 1] * self`.
    pub fn transform_point(&self, point: [f32; 3]) -> [f32; 4] {
        let v = [point[0], point[1], point[2], 1.0];
        let mut out = [0.0; 4];
        for (j, cell) in out.iter_mut().enumerate() {
            *cell = (0..4).map(|k| v[k] * self.0[k][j]).sum();
        }
        out
    }

    /// Element-wise comparison within `epsilon`.
    pub fn approx_eq(&self, other: &Matrix, epsilon: f32) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }

    /// Copy of the sixteen entries in upload order.
    pub fn to_array(&self) -> [f32; 16] {
        bytemuck::cast(self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        self.multiply(&rhs)
    }
}

impl From<[f32; 16]> for Matrix {
    fn from(list: [f32; 16]) -> Self {
        Matrix(bytemuck::cast(list))
    }
}

impl From<Matrix> for [[f32; 4]; 4] {
    fn from(matrix: Matrix) -> Self {
        matrix.0
    }
}

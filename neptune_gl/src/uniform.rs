use crate::driver::{MatrixShape, UniformLocation, UniformValue};
use crate::handle::ShaderProgram;

/// A value that can be uploaded to a uniform.
///
/// Arrays and tuples both map to vectors, `[[f32; R]; C]` maps to a `matCxR` in
/// column-major order.
pub trait Uniform {
    fn to_uniform_value(&self) -> UniformValue;
}

impl<U: Uniform + ?Sized> Uniform for &U {
    fn to_uniform_value(&self) -> UniformValue {
        (**self).to_uniform_value()
    }
}

macro_rules! impl_vector_uniform {
    ($ty:ty, $constructor:ident) => {
        impl Uniform for $ty {
            fn to_uniform_value(&self) -> UniformValue {
                UniformValue::$constructor(&[*self])
            }
        }

        impl Uniform for [$ty; 2] {
            fn to_uniform_value(&self) -> UniformValue {
                UniformValue::$constructor(self)
            }
        }

        impl Uniform for [$ty; 3] {
            fn to_uniform_value(&self) -> UniformValue {
                UniformValue::$constructor(self)
            }
        }

        impl Uniform for [$ty; 4] {
            fn to_uniform_value(&self) -> UniformValue {
                UniformValue::$constructor(self)
            }
        }

        impl Uniform for ($ty, $ty) {
            fn to_uniform_value(&self) -> UniformValue {
                UniformValue::$constructor(&[self.0, self.1])
            }
        }

        impl Uniform for ($ty, $ty, $ty) {
            fn to_uniform_value(&self) -> UniformValue {
                UniformValue::$constructor(&[self.0, self.1, self.2])
            }
        }

        impl Uniform for ($ty, $ty, $ty, $ty) {
            fn to_uniform_value(&self) -> UniformValue {
                UniformValue::$constructor(&[self.0, self.1, self.2, self.3])
            }
        }
    };
}

impl_vector_uniform!(f32, float);
impl_vector_uniform!(i32, int);
impl_vector_uniform!(u32, uint);

macro_rules! impl_matrix_uniform {
    ($columns:literal, $rows:literal, $shape:ident) => {
        impl Uniform for [[f32; $rows]; $columns] {
            fn to_uniform_value(&self) -> UniformValue {
                let mut values = [0.0; $columns * $rows];
                for (column, data) in self.iter().enumerate() {
                    values[column * $rows..(column + 1) * $rows].copy_from_slice(data);
                }
                UniformValue::matrix(MatrixShape::$shape, &values)
            }
        }
    };
}

impl_matrix_uniform!(2, 2, Mat2);
impl_matrix_uniform!(2, 3, Mat2x3);
impl_matrix_uniform!(2, 4, Mat2x4);
impl_matrix_uniform!(3, 2, Mat3x2);
impl_matrix_uniform!(3, 3, Mat3);
impl_matrix_uniform!(3, 4, Mat3x4);
impl_matrix_uniform!(4, 2, Mat4x2);
impl_matrix_uniform!(4, 3, Mat4x3);
impl_matrix_uniform!(4, 4, Mat4);

macro_rules! impl_glam_uniform {
    ($ty:ty, $constructor:ident) => {
        impl Uniform for $ty {
            fn to_uniform_value(&self) -> UniformValue {
                UniformValue::$constructor(&self.to_array())
            }
        }
    };
}

impl_glam_uniform!(glam::Vec2, float);
impl_glam_uniform!(glam::Vec3, float);
impl_glam_uniform!(glam::Vec4, float);
impl_glam_uniform!(glam::IVec2, int);
impl_glam_uniform!(glam::IVec3, int);
impl_glam_uniform!(glam::IVec4, int);
impl_glam_uniform!(glam::UVec2, uint);
impl_glam_uniform!(glam::UVec3, uint);
impl_glam_uniform!(glam::UVec4, uint);

impl Uniform for glam::Mat2 {
    fn to_uniform_value(&self) -> UniformValue {
        UniformValue::matrix(MatrixShape::Mat2, &self.to_cols_array())
    }
}

impl Uniform for glam::Mat3 {
    fn to_uniform_value(&self) -> UniformValue {
        UniformValue::matrix(MatrixShape::Mat3, &self.to_cols_array())
    }
}

impl Uniform for glam::Mat4 {
    fn to_uniform_value(&self) -> UniformValue {
        UniformValue::matrix(MatrixShape::Mat4, &self.to_cols_array())
    }
}

impl ShaderProgram {
    /// Looks the location up on every call, returns `NOT_FOUND` for the empty program
    pub fn uniform_location(&self, name: &str) -> UniformLocation {
        match self.live_object() {
            Some(object) => object.driver().get_uniform_location(object.id(), name),
            None => UniformLocation::NOT_FOUND,
        }
    }

    /// Resolves `name` and uploads `value`, the location is looked up again on every call.
    ///
    /// Unknown names are silently ignored, same as GL does: only the location query reaches
    /// the driver. The empty program makes no driver call at all, not even the location query.
    /// Values with an out of range component count are dropped with a warning.
    pub fn set_uniform<U: Uniform + ?Sized>(&self, name: &str, value: &U) {
        let Some(object) = self.live_object() else {
            return;
        };

        let location = object.driver().get_uniform_location(object.id(), name);
        if !location.is_found() {
            trace!("Uniform \"{}\" not found in Program({})", name, object.id());
            return;
        }

        let value = value.to_uniform_value();
        if !value.is_valid() {
            warn!("Uniform \"{}\" has an invalid value: {:?}", name, value);
            return;
        }

        object.driver().set_uniform(location, &value);
    }
}

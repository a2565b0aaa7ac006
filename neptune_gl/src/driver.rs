use std::fmt::{Display, Formatter};

pub type ShaderId = u32;
pub type ProgramId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStageKind {
    Vertex,
    Fragment,
}

impl Display for ShaderStageKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStageKind::Vertex => write!(f, "vertex"),
            ShaderStageKind::Fragment => write!(f, "fragment"),
        }
    }
}

/// Location of a uniform inside one linked program, only meaningful until that program is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub i32);

impl UniformLocation {
    pub const NOT_FOUND: Self = Self(-1);

    pub fn is_found(&self) -> bool {
        self.0 >= 0
    }
}

/// GL naming: `MatCxR` has C columns and R rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatrixShape {
    Mat2,
    Mat2x3,
    Mat2x4,
    Mat3x2,
    Mat3,
    Mat3x4,
    Mat4x2,
    Mat4x3,
    Mat4,
}

impl MatrixShape {
    pub fn columns(&self) -> usize {
        match self {
            MatrixShape::Mat2 | MatrixShape::Mat2x3 | MatrixShape::Mat2x4 => 2,
            MatrixShape::Mat3x2 | MatrixShape::Mat3 | MatrixShape::Mat3x4 => 3,
            MatrixShape::Mat4x2 | MatrixShape::Mat4x3 | MatrixShape::Mat4 => 4,
        }
    }

    pub fn rows(&self) -> usize {
        match self {
            MatrixShape::Mat2 | MatrixShape::Mat3x2 | MatrixShape::Mat4x2 => 2,
            MatrixShape::Mat2x3 | MatrixShape::Mat3 | MatrixShape::Mat4x3 => 3,
            MatrixShape::Mat2x4 | MatrixShape::Mat3x4 | MatrixShape::Mat4 => 4,
        }
    }

    pub fn len(&self) -> usize {
        self.columns() * self.rows()
    }
}

/// One uniform upload. Only the first `count` (or `shape.len()`) values are used,
/// matrices are column-major.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float { count: usize, values: [f32; 4] },
    Int { count: usize, values: [i32; 4] },
    UInt { count: usize, values: [u32; 4] },
    Matrix { shape: MatrixShape, values: [f32; 16] },
}

impl UniformValue {
    pub(crate) fn float(data: &[f32]) -> Self {
        let mut values = [0.0; 4];
        values[..data.len()].copy_from_slice(data);
        UniformValue::Float {
            count: data.len(),
            values,
        }
    }

    pub(crate) fn int(data: &[i32]) -> Self {
        let mut values = [0; 4];
        values[..data.len()].copy_from_slice(data);
        UniformValue::Int {
            count: data.len(),
            values,
        }
    }

    pub(crate) fn uint(data: &[u32]) -> Self {
        let mut values = [0; 4];
        values[..data.len()].copy_from_slice(data);
        UniformValue::UInt {
            count: data.len(),
            values,
        }
    }

    pub(crate) fn matrix(shape: MatrixShape, data: &[f32]) -> Self {
        let mut values = [0.0; 16];
        values[..shape.len()].copy_from_slice(&data[..shape.len()]);
        UniformValue::Matrix { shape, values }
    }

    /// Vectors carry 1 to 4 components, anything else is dropped by the uniform layer
    pub fn is_valid(&self) -> bool {
        match self {
            UniformValue::Float { count, .. }
            | UniformValue::Int { count, .. }
            | UniformValue::UInt { count, .. } => (1..=4).contains(count),
            UniformValue::Matrix { .. } => true,
        }
    }

    pub fn as_f32_slice(&self) -> Option<&[f32]> {
        match self {
            UniformValue::Float { count, values } => values.get(..*count),
            UniformValue::Matrix { shape, values } => values.get(..shape.len()),
            _ => None,
        }
    }

    pub fn as_i32_slice(&self) -> Option<&[i32]> {
        match self {
            UniformValue::Int { count, values } => values.get(..*count),
            _ => None,
        }
    }

    pub fn as_u32_slice(&self) -> Option<&[u32]> {
        match self {
            UniformValue::UInt { count, values } => values.get(..*count),
            _ => None,
        }
    }
}

/// The subset of the GL api needed to build, bind, and feed shader programs.
///
/// Every call must happen on the thread that has the GL context current. Object ids use `0`
/// as "no object", both as a return value on creation failure and as an argument.
pub trait GlDriver {
    fn create_shader(&self, kind: ShaderStageKind) -> ShaderId;
    fn shader_source(&self, shader: ShaderId, source: &str);
    fn compile_shader(&self, shader: ShaderId);
    fn get_shader_compile_status(&self, shader: ShaderId) -> bool;
    fn get_shader_info_log(&self, shader: ShaderId) -> String;
    fn delete_shader(&self, shader: ShaderId);

    fn create_program(&self) -> ProgramId;
    fn attach_shader(&self, program: ProgramId, shader: ShaderId);
    fn link_program(&self, program: ProgramId);
    fn get_program_link_status(&self, program: ProgramId) -> bool;
    fn get_program_info_log(&self, program: ProgramId) -> String;
    fn delete_program(&self, program: ProgramId);

    /// Passing `0` unbinds the current program
    fn use_program(&self, program: ProgramId);

    fn get_uniform_location(&self, program: ProgramId, name: &str) -> UniformLocation;
    fn set_uniform(&self, location: UniformLocation, value: &UniformValue);

    fn object_label(&self, program: ProgramId, name: &str) {
        let _ = (program, name);
    }
}

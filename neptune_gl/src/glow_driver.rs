use crate::driver::{
    GlDriver, MatrixShape, ProgramId, ShaderId, ShaderStageKind, UniformLocation, UniformValue,
};
use glow::HasContext;
use std::num::NonZeroU32;
use std::rc::Rc;

impl ShaderStageKind {
    fn to_gl(self) -> u32 {
        match self {
            ShaderStageKind::Vertex => glow::VERTEX_SHADER,
            ShaderStageKind::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

/// [`GlDriver`] over a native `glow` context.
///
/// The context must be current on the calling thread for the lifetime of this driver and of
/// every program created through it.
pub struct GlowDriver {
    gl: Rc<glow::Context>,
}

impl GlowDriver {
    pub fn new(gl: Rc<glow::Context>) -> Self {
        Self { gl }
    }

    pub fn context(&self) -> &Rc<glow::Context> {
        &self.gl
    }

    fn shader(&self, shader: ShaderId) -> Option<glow::NativeShader> {
        let shader = NonZeroU32::new(shader).map(glow::NativeShader);
        if shader.is_none() {
            warn!("Shader id 0 passed to GlowDriver");
        }
        shader
    }

    fn program(&self, program: ProgramId) -> Option<glow::NativeProgram> {
        let program = NonZeroU32::new(program).map(glow::NativeProgram);
        if program.is_none() {
            warn!("Program id 0 passed to GlowDriver");
        }
        program
    }
}

impl GlDriver for GlowDriver {
    fn create_shader(&self, kind: ShaderStageKind) -> ShaderId {
        match unsafe { self.gl.create_shader(kind.to_gl()) } {
            Ok(shader) => shader.0.get(),
            Err(err) => {
                error!("glCreateShader({}) failed: {}", kind, err);
                0
            }
        }
    }

    fn shader_source(&self, shader: ShaderId, source: &str) {
        if let Some(shader) = self.shader(shader) {
            unsafe { self.gl.shader_source(shader, source) };
        }
    }

    fn compile_shader(&self, shader: ShaderId) {
        if let Some(shader) = self.shader(shader) {
            unsafe { self.gl.compile_shader(shader) };
        }
    }

    fn get_shader_compile_status(&self, shader: ShaderId) -> bool {
        self.shader(shader)
            .map(|shader| unsafe { self.gl.get_shader_compile_status(shader) })
            .unwrap_or(false)
    }

    fn get_shader_info_log(&self, shader: ShaderId) -> String {
        self.shader(shader)
            .map(|shader| unsafe { self.gl.get_shader_info_log(shader) })
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: ShaderId) {
        if let Some(shader) = self.shader(shader) {
            unsafe { self.gl.delete_shader(shader) };
        }
    }

    fn create_program(&self) -> ProgramId {
        match unsafe { self.gl.create_program() } {
            Ok(program) => program.0.get(),
            Err(err) => {
                error!("glCreateProgram failed: {}", err);
                0
            }
        }
    }

    fn attach_shader(&self, program: ProgramId, shader: ShaderId) {
        if let (Some(program), Some(shader)) = (self.program(program), self.shader(shader)) {
            unsafe { self.gl.attach_shader(program, shader) };
        }
    }

    fn link_program(&self, program: ProgramId) {
        if let Some(program) = self.program(program) {
            unsafe { self.gl.link_program(program) };
        }
    }

    fn get_program_link_status(&self, program: ProgramId) -> bool {
        self.program(program)
            .map(|program| unsafe { self.gl.get_program_link_status(program) })
            .unwrap_or(false)
    }

    fn get_program_info_log(&self, program: ProgramId) -> String {
        self.program(program)
            .map(|program| unsafe { self.gl.get_program_info_log(program) })
            .unwrap_or_default()
    }

    fn delete_program(&self, program: ProgramId) {
        if let Some(program) = self.program(program) {
            unsafe { self.gl.delete_program(program) };
        }
    }

    fn use_program(&self, program: ProgramId) {
        let program = NonZeroU32::new(program).map(glow::NativeProgram);
        unsafe { self.gl.use_program(program) };
    }

    fn get_uniform_location(&self, program: ProgramId, name: &str) -> UniformLocation {
        self.program(program)
            .and_then(|program| unsafe { self.gl.get_uniform_location(program, name) })
            .map(|location| UniformLocation(location.0 as i32))
            .unwrap_or(UniformLocation::NOT_FOUND)
    }

    fn set_uniform(&self, location: UniformLocation, value: &UniformValue) {
        if !location.is_found() {
            return;
        }

        let location = glow::NativeUniformLocation(location.0 as u32);
        let location = Some(&location);
        let gl = &self.gl;

        unsafe {
            match value {
                UniformValue::Float { count, .. } => match (*count, value.as_f32_slice()) {
                    (1, Some(values)) => gl.uniform_1_f32_slice(location, values),
                    (2, Some(values)) => gl.uniform_2_f32_slice(location, values),
                    (3, Some(values)) => gl.uniform_3_f32_slice(location, values),
                    (4, Some(values)) => gl.uniform_4_f32_slice(location, values),
                    _ => warn!("Invalid float uniform component count {}", count),
                },
                UniformValue::Int { count, .. } => match (*count, value.as_i32_slice()) {
                    (1, Some(values)) => gl.uniform_1_i32_slice(location, values),
                    (2, Some(values)) => gl.uniform_2_i32_slice(location, values),
                    (3, Some(values)) => gl.uniform_3_i32_slice(location, values),
                    (4, Some(values)) => gl.uniform_4_i32_slice(location, values),
                    _ => warn!("Invalid int uniform component count {}", count),
                },
                UniformValue::UInt { count, .. } => match (*count, value.as_u32_slice()) {
                    (1, Some(values)) => gl.uniform_1_u32_slice(location, values),
                    (2, Some(values)) => gl.uniform_2_u32_slice(location, values),
                    (3, Some(values)) => gl.uniform_3_u32_slice(location, values),
                    (4, Some(values)) => gl.uniform_4_u32_slice(location, values),
                    _ => warn!("Invalid uint uniform component count {}", count),
                },
                UniformValue::Matrix { shape, values } => {
                    let values = &values[..shape.len()];
                    match shape {
                        MatrixShape::Mat2 => gl.uniform_matrix_2_f32_slice(location, false, values),
                        MatrixShape::Mat2x3 => {
                            gl.uniform_matrix_2x3_f32_slice(location, false, values)
                        }
                        MatrixShape::Mat2x4 => {
                            gl.uniform_matrix_2x4_f32_slice(location, false, values)
                        }
                        MatrixShape::Mat3x2 => {
                            gl.uniform_matrix_3x2_f32_slice(location, false, values)
                        }
                        MatrixShape::Mat3 => gl.uniform_matrix_3_f32_slice(location, false, values),
                        MatrixShape::Mat3x4 => {
                            gl.uniform_matrix_3x4_f32_slice(location, false, values)
                        }
                        MatrixShape::Mat4x2 => {
                            gl.uniform_matrix_4x2_f32_slice(location, false, values)
                        }
                        MatrixShape::Mat4x3 => {
                            gl.uniform_matrix_4x3_f32_slice(location, false, values)
                        }
                        MatrixShape::Mat4 => gl.uniform_matrix_4_f32_slice(location, false, values),
                    }
                }
            }
        }
    }

    fn object_label(&self, program: ProgramId, name: &str) {
        if program != 0 && self.gl.supports_debug() {
            unsafe { self.gl.object_label(glow::PROGRAM, program, Some(name)) };
        }
    }
}

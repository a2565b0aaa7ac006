//! In-memory [`GlDriver`] that records every call, for testing code that builds or feeds
//! shader programs without a GL context.

use crate::driver::{
    GlDriver, ProgramId, ShaderId, ShaderStageKind, UniformLocation, UniformValue,
};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq)]
pub enum DriverCall {
    CreateShader(ShaderStageKind, ShaderId),
    ShaderSource(ShaderId),
    CompileShader(ShaderId),
    GetShaderCompileStatus(ShaderId),
    GetShaderInfoLog(ShaderId),
    DeleteShader(ShaderId),
    CreateProgram(ProgramId),
    AttachShader(ProgramId, ShaderId),
    LinkProgram(ProgramId),
    GetProgramLinkStatus(ProgramId),
    GetProgramInfoLog(ProgramId),
    DeleteProgram(ProgramId),
    UseProgram(ProgramId),
    GetUniformLocation(ProgramId, String),
    SetUniform(UniformLocation, UniformValue),
    ObjectLabel(ProgramId, String),
}

#[derive(Default)]
struct TestDriverState {
    //Use same handle "pool" for stages and programs
    next_handle: u32,
    calls: Vec<DriverCall>,

    shaders: HashMap<ShaderId, ShaderStageKind>,
    compiled_shaders: HashSet<ShaderId>,
    programs: HashMap<ProgramId, Vec<ShaderId>>,
    linked_programs: HashSet<ProgramId>,

    deleted_shaders: HashMap<ShaderId, usize>,
    deleted_programs: HashMap<ProgramId, usize>,
}

impl TestDriverState {
    fn next_handle(&mut self) -> u32 {
        self.next_handle += 1;
        self.next_handle
    }
}

#[derive(Default)]
pub struct TestDriver {
    failing_stages: HashSet<ShaderStageKind>,
    fail_link: bool,
    fail_object_creation: bool,
    fail_program_creation: bool,
    uniforms: Vec<String>,
    state: RefCell<TestDriverState>,
}

impl TestDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stage of `kind` reports a compile failure
    pub fn fail_compile(mut self, kind: ShaderStageKind) -> Self {
        let _ = self.failing_stages.insert(kind);
        self
    }

    pub fn fail_link(mut self) -> Self {
        self.fail_link = true;
        self
    }

    /// `create_shader` and `create_program` return `0`
    pub fn fail_object_creation(mut self) -> Self {
        self.fail_object_creation = true;
        self
    }

    /// Only `create_program` returns `0`, stages are still created and compiled
    pub fn fail_program_creation(mut self) -> Self {
        self.fail_program_creation = true;
        self
    }

    /// Declares an active uniform, every linked program exposes all declared uniforms
    pub fn with_uniform(mut self, name: &str) -> Self {
        self.uniforms.push(name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<DriverCall> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub fn live_shaders(&self) -> Vec<ShaderId> {
        let mut shaders: Vec<ShaderId> = self.state.borrow().shaders.keys().copied().collect();
        shaders.sort_unstable();
        shaders
    }

    pub fn live_programs(&self) -> Vec<ProgramId> {
        let mut programs: Vec<ProgramId> =
            self.state.borrow().programs.keys().copied().collect();
        programs.sort_unstable();
        programs
    }

    pub fn created_shader_count(&self) -> usize {
        self.count_calls(|call| matches!(call, DriverCall::CreateShader(..)))
    }

    pub fn deleted_shader_count(&self) -> usize {
        self.state.borrow().deleted_shaders.values().sum()
    }

    pub fn delete_shader_count(&self, shader: ShaderId) -> usize {
        self.state
            .borrow()
            .deleted_shaders
            .get(&shader)
            .copied()
            .unwrap_or(0)
    }

    pub fn created_program_count(&self) -> usize {
        self.count_calls(|call| matches!(call, DriverCall::CreateProgram(id) if *id != 0))
    }

    pub fn deleted_program_count(&self) -> usize {
        self.state.borrow().deleted_programs.values().sum()
    }

    pub fn delete_program_count(&self, program: ProgramId) -> usize {
        self.state
            .borrow()
            .deleted_programs
            .get(&program)
            .copied()
            .unwrap_or(0)
    }

    pub fn uniform_writes(&self) -> Vec<(UniformLocation, UniformValue)> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|call| match call {
                DriverCall::SetUniform(location, value) => Some((*location, *value)),
                _ => None,
            })
            .collect()
    }

    fn count_calls(&self, filter: impl Fn(&DriverCall) -> bool) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|call| filter(call))
            .count()
    }

    fn record(&self, call: DriverCall) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl GlDriver for TestDriver {
    fn create_shader(&self, kind: ShaderStageKind) -> ShaderId {
        let mut state = self.state.borrow_mut();
        let id = if self.fail_object_creation {
            0
        } else {
            let id = state.next_handle();
            let _ = state.shaders.insert(id, kind);
            id
        };
        state.calls.push(DriverCall::CreateShader(kind, id));
        id
    }

    fn shader_source(&self, shader: ShaderId, source: &str) {
        let _ = source;
        self.record(DriverCall::ShaderSource(shader));
    }

    fn compile_shader(&self, shader: ShaderId) {
        let mut state = self.state.borrow_mut();
        let compiles = state
            .shaders
            .get(&shader)
            .map(|kind| !self.failing_stages.contains(kind))
            .unwrap_or(false);
        if compiles {
            let _ = state.compiled_shaders.insert(shader);
        }
        state.calls.push(DriverCall::CompileShader(shader));
    }

    fn get_shader_compile_status(&self, shader: ShaderId) -> bool {
        self.record(DriverCall::GetShaderCompileStatus(shader));
        self.state.borrow().compiled_shaders.contains(&shader)
    }

    fn get_shader_info_log(&self, shader: ShaderId) -> String {
        self.record(DriverCall::GetShaderInfoLog(shader));
        match self.state.borrow().shaders.get(&shader) {
            Some(kind) => format!("ERROR: 0:1: {} stage rejected by TestDriver\n\0", kind),
            None => String::new(),
        }
    }

    fn delete_shader(&self, shader: ShaderId) {
        let mut state = self.state.borrow_mut();
        if state.shaders.remove(&shader).is_none() {
            warn!("Tried to delete invalid Shader({})", shader);
        }
        let _ = state.compiled_shaders.remove(&shader);
        *state.deleted_shaders.entry(shader).or_default() += 1;
        state.calls.push(DriverCall::DeleteShader(shader));
    }

    fn create_program(&self) -> ProgramId {
        let mut state = self.state.borrow_mut();
        let id = if self.fail_object_creation || self.fail_program_creation {
            0
        } else {
            let id = state.next_handle();
            let _ = state.programs.insert(id, Vec::new());
            id
        };
        state.calls.push(DriverCall::CreateProgram(id));
        id
    }

    fn attach_shader(&self, program: ProgramId, shader: ShaderId) {
        let mut state = self.state.borrow_mut();
        if let Some(attached) = state.programs.get_mut(&program) {
            attached.push(shader);
        }
        state.calls.push(DriverCall::AttachShader(program, shader));
    }

    fn link_program(&self, program: ProgramId) {
        let mut state = self.state.borrow_mut();
        let links = !self.fail_link
            && state
                .programs
                .get(&program)
                .map(|attached| {
                    !attached.is_empty()
                        && attached
                            .iter()
                            .all(|shader| state.compiled_shaders.contains(shader))
                })
                .unwrap_or(false);
        if links {
            let _ = state.linked_programs.insert(program);
        }
        state.calls.push(DriverCall::LinkProgram(program));
    }

    fn get_program_link_status(&self, program: ProgramId) -> bool {
        self.record(DriverCall::GetProgramLinkStatus(program));
        self.state.borrow().linked_programs.contains(&program)
    }

    fn get_program_info_log(&self, program: ProgramId) -> String {
        self.record(DriverCall::GetProgramInfoLog(program));
        if self.state.borrow().programs.contains_key(&program) {
            String::from("error: program rejected by TestDriver\n")
        } else {
            String::new()
        }
    }

    fn delete_program(&self, program: ProgramId) {
        let mut state = self.state.borrow_mut();
        if state.programs.remove(&program).is_none() {
            warn!("Tried to delete invalid Program({})", program);
        }
        let _ = state.linked_programs.remove(&program);
        *state.deleted_programs.entry(program).or_default() += 1;
        state.calls.push(DriverCall::DeleteProgram(program));
    }

    fn use_program(&self, program: ProgramId) {
        self.record(DriverCall::UseProgram(program));
    }

    fn get_uniform_location(&self, program: ProgramId, name: &str) -> UniformLocation {
        self.record(DriverCall::GetUniformLocation(program, name.to_string()));
        if !self.state.borrow().linked_programs.contains(&program) {
            return UniformLocation::NOT_FOUND;
        }

        self.uniforms
            .iter()
            .position(|uniform| uniform == name)
            .map(|index| UniformLocation(index as i32))
            .unwrap_or(UniformLocation::NOT_FOUND)
    }

    fn set_uniform(&self, location: UniformLocation, value: &UniformValue) {
        self.record(DriverCall::SetUniform(location, *value));
    }

    fn object_label(&self, program: ProgramId, name: &str) {
        self.record(DriverCall::ObjectLabel(program, name.to_string()));
    }
}

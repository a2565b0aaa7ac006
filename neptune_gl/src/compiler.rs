use crate::driver::{GlDriver, ShaderStageKind};
use crate::handle::{ProgramObject, ShaderProgram};
use crate::shader::{clean_info_log, ShaderStage};
use std::path::Path;
use std::rc::Rc;

#[derive(Debug, Clone)]
pub struct CompilerSettings {
    /// Max bytes of a compile/link info log kept in errors, `None` keeps the whole log
    pub info_log_limit: Option<usize>,
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            info_log_limit: Some(512),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ProgramDescription<'a> {
    /// Debug label, leave empty for none
    pub name: &'a str,
    pub vertex_source: &'a str,
    pub fragment_source: &'a str,
}

pub struct ProgramCompiler {
    driver: Rc<dyn GlDriver>,
    settings: CompilerSettings,
}

impl ProgramCompiler {
    pub fn new(driver: Rc<dyn GlDriver>) -> Self {
        Self::with_settings(driver, CompilerSettings::default())
    }

    pub fn with_settings(driver: Rc<dyn GlDriver>, settings: CompilerSettings) -> Self {
        Self { driver, settings }
    }

    pub fn settings(&self) -> &CompilerSettings {
        &self.settings
    }

    pub fn try_create_program(
        &self,
        description: &ProgramDescription,
    ) -> crate::Result<ShaderProgram> {
        let limit = self.settings.info_log_limit;

        let vertex_stage = ShaderStage::compile(
            &self.driver,
            ShaderStageKind::Vertex,
            description.vertex_source,
            limit,
        )?;
        let fragment_stage = ShaderStage::compile(
            &self.driver,
            ShaderStageKind::Fragment,
            description.fragment_source,
            limit,
        )?;

        let id = self.driver.create_program();
        if id == 0 {
            return Err(crate::Error::ProgramCreation);
        }
        let program = ShaderProgram::from_object(ProgramObject::new(id, self.driver.clone()));

        self.driver.attach_shader(id, vertex_stage.id());
        self.driver.attach_shader(id, fragment_stage.id());
        self.driver.link_program(id);

        if !self.driver.get_program_link_status(id) {
            return Err(crate::Error::Link(clean_info_log(
                self.driver.get_program_info_log(id),
                limit,
            )));
        }

        if !description.name.is_empty() {
            self.driver.object_label(id, description.name);
        }

        Ok(program)
    }

    pub fn try_create_from_sources(
        &self,
        vertex_source: &str,
        fragment_source: &str,
    ) -> crate::Result<ShaderProgram> {
        self.try_create_program(&ProgramDescription {
            name: "",
            vertex_source,
            fragment_source,
        })
    }

    /// Logs any failure and returns [`ShaderProgram::empty`] in its place
    pub fn create_from_sources(&self, vertex_source: &str, fragment_source: &str) -> ShaderProgram {
        match self.try_create_from_sources(vertex_source, fragment_source) {
            Ok(program) => program,
            Err(err) => {
                error!("{}", err);
                ShaderProgram::empty()
            }
        }
    }

    pub fn create_program(&self, description: &ProgramDescription) -> ShaderProgram {
        match self.try_create_program(description) {
            Ok(program) => program,
            Err(err) => {
                error!("Program \"{}\": {}", description.name, err);
                ShaderProgram::empty()
            }
        }
    }

    /// Both files are read before the driver is touched
    pub fn try_load_from_files(
        &self,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> crate::Result<ShaderProgram> {
        let vertex_source = read_source(vertex_path.as_ref())?;
        let fragment_source = read_source(fragment_path.as_ref())?;
        self.try_create_from_sources(&vertex_source, &fragment_source)
    }

    /// Logs any failure and returns [`ShaderProgram::empty`] in its place
    pub fn load_from_files(
        &self,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> ShaderProgram {
        match self.try_load_from_files(vertex_path, fragment_path) {
            Ok(program) => program,
            Err(err) => {
                error!("{}", err);
                ShaderProgram::empty()
            }
        }
    }

    pub fn unbind(&self) {
        self.driver.use_program(0);
    }
}

fn read_source(path: &Path) -> crate::Result<String> {
    std::fs::read_to_string(path).map_err(|source| crate::Error::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

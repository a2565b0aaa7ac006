use crate::driver::{GlDriver, ShaderId, ShaderStageKind};
use std::rc::Rc;

/// One compiled stage object, deleted on drop. Only lives for the duration of a program build.
pub(crate) struct ShaderStage {
    id: ShaderId,
    kind: ShaderStageKind,
    driver: Rc<dyn GlDriver>,
}

impl ShaderStage {
    pub(crate) fn compile(
        driver: &Rc<dyn GlDriver>,
        kind: ShaderStageKind,
        source: &str,
        info_log_limit: Option<usize>,
    ) -> crate::Result<Self> {
        let id = driver.create_shader(kind);
        if id == 0 {
            return Err(crate::Error::StageCreation(kind));
        }

        let stage = Self {
            id,
            kind,
            driver: driver.clone(),
        };

        driver.shader_source(id, source);
        driver.compile_shader(id);

        if driver.get_shader_compile_status(id) {
            Ok(stage)
        } else {
            Err(crate::Error::Compile {
                stage: kind,
                log: clean_info_log(driver.get_shader_info_log(id), info_log_limit),
            })
        }
    }

    pub(crate) fn id(&self) -> ShaderId {
        self.id
    }
}

impl Drop for ShaderStage {
    fn drop(&mut self) {
        self.driver.delete_shader(self.id);
        trace!("Destroy {} Shader({})", self.kind, self.id);
    }
}

pub(crate) fn clean_info_log(mut log: String, limit: Option<usize>) -> String {
    let trimmed_len = log.trim_end_matches(|c: char| c == '\0' || c.is_whitespace()).len();
    log.truncate(trimmed_len);

    if let Some(limit) = limit {
        if log.len() > limit {
            let mut end = limit;
            while !log.is_char_boundary(end) {
                end -= 1;
            }
            log.truncate(end);
        }
    }

    log
}

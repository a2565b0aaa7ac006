use crate::driver::{GlDriver, ProgramId};
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

pub(crate) struct ProgramObject {
    id: ProgramId,
    driver: Rc<dyn GlDriver>,
}

impl ProgramObject {
    pub(crate) fn new(id: ProgramId, driver: Rc<dyn GlDriver>) -> Self {
        Self { id, driver }
    }

    pub(crate) fn id(&self) -> ProgramId {
        self.id
    }

    pub(crate) fn driver(&self) -> &Rc<dyn GlDriver> {
        &self.driver
    }
}

impl Drop for ProgramObject {
    fn drop(&mut self) {
        if self.id != 0 {
            self.driver.delete_program(self.id);
            trace!("Destroy Program({})", self.id);
        }
    }
}

/// Shared handle to a linked shader program.
///
/// Clones share one driver program object, which is deleted when the last clone is dropped.
/// The empty handle owns nothing and never touches the driver.
#[derive(Clone, Default)]
pub struct ShaderProgram {
    object: Option<Rc<ProgramObject>>,
}

impl ShaderProgram {
    pub fn empty() -> Self {
        Self { object: None }
    }

    pub(crate) fn from_object(object: ProgramObject) -> Self {
        Self {
            object: Some(Rc::new(object)),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.handle() != 0
    }

    pub fn handle(&self) -> ProgramId {
        self.object.as_ref().map(|object| object.id).unwrap_or(0)
    }

    pub fn reference_count(&self) -> usize {
        self.object.as_ref().map(Rc::strong_count).unwrap_or(0)
    }

    pub fn bind(&self) {
        if let Some(object) = self.live_object() {
            object.driver.use_program(object.id);
        }
    }

    pub(crate) fn live_object(&self) -> Option<&ProgramObject> {
        self.object.as_deref().filter(|object| object.id != 0)
    }
}

impl PartialEq for ShaderProgram {
    fn eq(&self, other: &Self) -> bool {
        self.handle() == other.handle()
    }
}

impl Eq for ShaderProgram {}

impl Debug for ShaderProgram {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShaderProgram")
            .field("id", &self.handle())
            .field("reference_count", &self.reference_count())
            .finish()
    }
}

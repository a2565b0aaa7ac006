mod compiler;
mod driver;
#[cfg(all(feature = "glow", not(target_arch = "wasm32")))]
mod glow_driver;
mod handle;
mod shader;
pub mod test;
mod uniform;

pub use compiler::*;
pub use driver::*;
#[cfg(all(feature = "glow", not(target_arch = "wasm32")))]
pub use glow_driver::*;
pub use handle::*;
pub use uniform::*;

#[cfg(feature = "glow")]
pub use glow;

#[macro_use]
extern crate log;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to create {0} shader object")]
    StageCreation(ShaderStageKind),

    #[error("Failed to create program object")]
    ProgramCreation,

    #[error("{stage} shader compile error: {log}")]
    Compile { stage: ShaderStageKind, log: String },

    #[error("Program link error: {0}")]
    Link(String),

    #[error("Failed to open file: {}: {source}", .path.display())]
    FileRead {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

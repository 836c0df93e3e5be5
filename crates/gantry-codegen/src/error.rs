use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] gantry_core::Error),

    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("stub template `{name}` not found in {dir}")]
    StubMissing { name: String, dir: PathBuf },

    #[error("DTO file {path} does not exist; generate the backend module first")]
    DtoMissing { path: PathBuf },

    #[error("no data class found in {path}; the DTO file is not in the generated shape")]
    DtoClassMissing { path: PathBuf },

    #[error("locale file {path} is not valid JSON")]
    Locale {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

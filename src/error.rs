#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("NullReference")]
    NullReference,
}

pub type Result<T> = ::core::result::Result<T, Error>;

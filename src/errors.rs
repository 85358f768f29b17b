use crate::pattern::PatternError;
use crate::router::RouterOptionsError;
use crate::types::BoxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Options(#[from] RouterOptionsError),
    /// The resolver or a deferred reference failed to produce a handler.
    #[error(transparent)]
    Resolution(BoxError),
    /// The selected handler failed while producing a response.
    #[error(transparent)]
    Handler(BoxError),
}

impl DispatchError {
    pub fn is_resolution(&self) -> bool {
        matches!(self, Self::Resolution(_))
    }

    pub fn is_handler(&self) -> bool {
        matches!(self, Self::Handler(_))
    }

    /// Returns the collaborator's error as it was raised, if there is one.
    pub fn into_source(self) -> Option<BoxError> {
        match self {
            Self::Resolution(err) | Self::Handler(err) => Some(err),
            _ => None,
        }
    }
}

pub type DispatchResult<T> = Result<T, DispatchError>;

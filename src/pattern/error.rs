use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum PatternError {
    #[error("parameter segment '{segment}' is missing a name")]
    ParameterMissingName { segment: String },
    #[error(
        "parameter name '{name}' in segment '{segment}' must start with an alphabetic character or underscore (found '{found}')"
    )]
    ParameterInvalidStart {
        segment: String,
        name: String,
        found: char,
    },
    #[error("parameter '{name}' appears more than once in template '{template}'")]
    DuplicateParameter { template: String, name: String },
    #[error("constraint for parameter '{name}' in segment '{segment}' is not terminated")]
    UnterminatedConstraint { segment: String, name: String },
    #[error("constraint for parameter '{name}' in segment '{segment}' is empty")]
    EmptyConstraint { segment: String, name: String },
    #[error("segment '{segment}' ends with a dangling escape")]
    DanglingEscape { segment: String },
    #[error("template '{template}' does not compile to a valid matcher")]
    InvalidRegex {
        template: String,
        #[source]
        source: regex::Error,
    },
}

pub type PatternResult<T> = Result<T, PatternError>;

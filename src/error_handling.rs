use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("unknown variable, '{0}'")]
    unknown_variable(String),

    #[error("unknown token, '{0}'")]
    unknown_token(String),

    #[error("not enough operands on the stack")]
    stack_underflow,

    #[error("could not talk to the terminal: {0}")]
    io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CalcError>;

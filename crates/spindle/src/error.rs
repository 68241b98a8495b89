use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SetupError {
    #[error("Menu holds {max} slots, {got} were configured")]
    TooManySlots { max: usize, got: usize },
    #[error("Invalid {name}: {value}")]
    InvalidValue { name: &'static str, value: f64 },
}

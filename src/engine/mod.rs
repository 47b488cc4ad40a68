mod diff;
mod validate;

pub use diff::{diff, DiffResult};
pub use validate::{validate, ValidationResult};

//! Function sizing profiles and the Lambda function construct.

mod function;
mod profile;

pub use function::{Function, FunctionProps};
pub use profile::{FunctionConfig, FunctionOverrides, FunctionProfile, Runtime, resolve};

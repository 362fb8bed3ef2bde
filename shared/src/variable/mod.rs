mod any_variable;
mod authority;
mod error;
mod replicated_variable;

pub use any_variable::AnyVariable;
pub use authority::AuthorityRole;
pub use error::VariableError;
pub use replicated_variable::ReplicatedVariable;

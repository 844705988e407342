pub mod assemble;
pub mod check;
pub mod deps;
pub mod key;

pub use assemble::handle_assemble;
pub use check::handle_check;
pub use deps::handle_deps;
pub use key::handle_key;

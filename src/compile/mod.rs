pub mod attr;
pub mod compiler;
pub mod script;

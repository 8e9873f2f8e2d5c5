pub mod entity;
pub mod lexer;
pub mod number;
pub mod split;
pub mod tag;

pub mod ast;
pub mod env;
pub mod eval;
pub mod forms;
pub mod func;
pub mod group;
pub mod lower;
pub mod perf;
pub mod resolve;
pub mod value;

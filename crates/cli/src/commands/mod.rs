//! Command handlers, one module per subcommand.

pub mod draw;
pub mod gen;
pub mod info;

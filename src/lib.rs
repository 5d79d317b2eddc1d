pub mod cli;
pub mod io;
pub mod model;
pub mod ops;
pub mod tui;
pub mod util;

#[cfg(test)]
pub(crate) mod testing;

pub mod ast;
pub mod dialect;
pub mod renderer;

pub use ast::{ColumnRef, Join, OrderBy, SelectQuery};
pub use dialect::{Dialect, MySql, Postgres};
pub use renderer::{Render, Renderer, to_sql};

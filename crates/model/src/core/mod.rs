pub mod lookup;
pub mod operand;
pub mod operator;
pub mod term;
pub mod utils;
pub mod value;

//! Abstract syntax tree nodes produced by the parser.
//!
//! Every node records the region of the source code it was parsed from, so that later stages
//! (such as conversion into a symbolic expression) can point errors at the right place.

pub mod binary;
pub mod call;
pub mod expr;
pub mod literal;
pub mod paren;
pub mod unary;

pub use binary::Binary;
pub use call::Call;
pub use expr::Expr;
pub use literal::{LitInt, LitSym, Literal};
pub use paren::Paren;
pub use unary::Unary;

//! Tokenizer and parser for algebraic expressions.
//!
//! The grammar is small: integer literals, symbol names, function calls, parenthesized
//! expressions, unary negation, and the binary operators `+`, `-`, `*`, `/`, and `^`.
//! Multiplication may also be implied by juxtaposition, as in `2x` or `3(x + 1)`.
//!
//! ```
//! use cas_parser::parser::{ast::Expr, Parser};
//!
//! let mut parser = Parser::new("2x^2 + 3");
//! let expr = parser.try_parse_full::<Expr>().unwrap();
//! assert_eq!(expr.to_string(), "2x^2 + 3");
//! ```

pub mod parser;
pub mod tokenizer;

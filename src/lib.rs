//! # Desk-calculator engine
//!
//! The expression engine and input state machine behind a small scientific
//! calculator widget. The crate owns everything with real logic in it: the
//! evaluator, the bounded history of past evaluations, the mapping from
//! discrete key events to buffer mutations, and named-formula evaluation.
//! Window chrome, dragging, styling, and clipboard access stay with the
//! embedding host.
//!
//! The notation is what the widget's keypad produces: the operator glyphs
//! `×`, `÷`, `−` next to ASCII `+` and `^`, the constants `π` and `e`, and
//! function tokens that always open a call: `sin(`, `cos(`, `tan(`,
//! `log(` (base 10), `ln(` (natural), `√(`.
//!
//! Scientific notation is part of a number literal: `2e3`, `1.5e-7`. A bare
//! `e` is Euler's constant; the literal reading wins whenever the `e` is
//! trailed by an exponent.
//!
//! Operators, starting from highest priority:
//! * unary minus
//! * `^` - power, right associative
//! * `×`, `÷` - multiplication, division
//! * `+`, `−` - addition, subtraction
//!
//! Evaluation is double precision throughout. A result that is not a finite
//! double (division by zero, square root of a negative, logarithm of a
//! non-positive number) is reported as a domain error and never displayed
//! as a number. Deeply nested expressions recurse on the host stack; no
//! depth limit is enforced.
//!
//! `engine::Engine` holds the expression buffer and a five-entry history.
//! One `engine::Key` mutates the buffer per input event and `=` commits the
//! buffer through the evaluator, seeding the next expression with the
//! result. `formula::compute_formula` evaluates a named formula over
//! explicit variable bindings, independent of the buffer.

#[macro_use]
extern crate pest_derive;

pub mod engine;
pub mod errors;
pub mod formula;
pub mod history;
pub mod normalize;
pub mod parse;
pub mod stack;
pub mod store;
pub mod value;

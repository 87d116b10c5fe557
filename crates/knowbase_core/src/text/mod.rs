//! Knowledge text format: line grammar, parser, compiler and alignment.
//!
//! # Responsibility
//! - Convert one language's raw bullet text into ordered `(title, points)`.
//! - Merge EN and VI parse results positionally into one `TopicSet`.
//! - Serialize a `TopicSet` back to raw text for one language.
//!
//! # Invariants
//! - Source order of topics is preserved in both directions.
//! - Alignment is purely positional; no title matching is attempted.
//! - `parse_text(compile_text(set, lang))` keeps titles and non-empty points;
//!   empty points are dropped on re-parse.

pub mod align;
pub mod classify;
pub mod compiler;
pub mod parser;

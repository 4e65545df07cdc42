//! Tokens, cursors and the typed concrete syntax tree of the Python core
//! grammar.
//!
//! Trees are lossless: every token owns its source text together with its
//! leading trivia, and the module's end-of-input token keeps whatever trails
//! the last statement. Joining the token texts yields the source again.

/// Typed nodes of the concrete syntax tree.
pub mod ast;
mod cursor;
mod syntax_kind;
mod syntax_set;
mod token;
mod trivia;
/// Traversals, text reconstruction and debug dumps.
pub mod walk;

/// Token source consumed by the parser.
pub use cursor::{BufferedCursor, Cursor};
/// Token kinds used throughout the tree.
pub use syntax_kind::SyntaxKind;
/// Compact set for grouping `SyntaxKind` values.
pub use syntax_set::SyntaxSet;
pub use token::Token;
/// Trivia pieces attached to tokens.
pub use trivia::{TriviaPiece, TriviaPieceKind};

//! Diagnostic categories for the states of the bundled SLR table.
//!
//! Each list names the states in which the parser is still waiting for a
//! particular kind of input. They are tied to `data/slr_table.csv` and must be
//! regenerated with it.
use slr::{ErrorStates, SyntaxCategory};

/// Complete program seen, only end-of-input may follow.
const EOF_EXPECTED: [u32; 5] = [1, 9, 27, 29, 40];

/// Declaration lists waiting for a variable name, and a bare `int` that can
/// only go on to a name or a cast.
const IDENTIFIER_EXPECTED: [u32; 3] = [11, 12, 42];

/// Program header waiting for `int` or `main`, and statement positions
/// waiting for `if`, `while`, a name or a block.
const KEYWORD_MISSING: [u32; 23] = [
    0, 2, 8, 16, 17, 18, 19, 20, 21, 22, 26, 30, 34, 35, 44, 68, 90, 91, 103, 104, 108, 109, 110,
];

const SYMBOL_MISSING: [u32; 46] = [
    3, 4, 5, 23, 24, 25, 31, 32, 33, 45, 46, 47, 48, 49, 50, 51, 53, 54, 55, 57, 58, 59, 60, 61,
    62, 63, 64, 65, 66, 67, 85, 87, 89, 92, 93, 94, 95, 96, 97, 98, 99, 100, 101, 105, 106, 107,
];

/// Start of the body, where declarations must begin with a type.
const TYPE_EXPECTED: [u32; 5] = [6, 7, 10, 28, 41];

/// Operand positions inside expressions and array sizes.
const IDENTIFIER_OR_LITERAL_EXPECTED: [u32; 29] = [
    13, 14, 15, 36, 37, 38, 39, 43, 52, 56, 69, 70, 71, 72, 73, 74, 75, 76, 77, 78, 79, 80,
    81, 82, 83, 84, 86, 88, 102,
];

/// State categories for the bundled table.
pub fn error_states() -> ErrorStates {
    ErrorStates::new()
        .with(SyntaxCategory::EofExpected, EOF_EXPECTED)
        .with(SyntaxCategory::IdentifierExpected, IDENTIFIER_EXPECTED)
        .with(SyntaxCategory::KeywordMissing, KEYWORD_MISSING)
        .with(SyntaxCategory::SymbolMissing, SYMBOL_MISSING)
        .with(SyntaxCategory::TypeExpected, TYPE_EXPECTED)
        .with(
            SyntaxCategory::IdentifierOrLiteralExpected,
            IDENTIFIER_OR_LITERAL_EXPECTED,
        )
}

//! Error codes for all generator diagnostics.
//!
//! Each code is a unique identifier (e.g., `E2001`) whose first digit names
//! the phase. Used for `serin explain` lookups.

use std::fmt;

/// Error codes for all generator diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E0xxx: Lexer
/// - E1xxx: Parser
/// - E2xxx: Field classification
/// - E3xxx: Generic lineage resolution
/// - E4xxx: Companion generation and registration
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum ErrorCode {
    // Lexer (E0xxx)
    /// Unrecognized character or malformed literal
    E0001,

    // Parser (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected identifier
    E1002,
    /// Expected type
    E1003,
    /// Unclosed delimiter
    E1004,

    // Field classification (E2xxx)
    /// Marker on a field that is not an interface or a list of interfaces
    E2001,
    /// Marker on a static or const field
    E2002,
    /// Marker on a readonly field that is not a list
    E2003,
    /// Marker on a readonly list without an initializer
    E2004,
    /// Marker on a field whose type cannot be resolved
    E2005,
    /// Backing field name already declared by the class
    E2006,

    // Generic lineage (E3xxx)
    /// Inherited generic field is not accessible from the derived class
    E3001,
    /// Multi-level generic inheritance is not supported
    E3002,

    // Generation (E4xxx)
    /// Class (or a containing type) requiring a companion is not partial
    E4001,
    /// Two generated units share the same name
    E4002,
    /// A base class implements the callback hooks by hand
    E4003,
}

impl ErrorCode {
    /// All error code variants.
    ///
    /// Kept in sync with `as_str()`; `test_all_codes_round_trip` catches omissions.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E4001,
        ErrorCode::E4002,
        ErrorCode::E4003,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E4001 => "E4001",
            ErrorCode::E4002 => "E4002",
            ErrorCode::E4003 => "E4003",
        }
    }

    /// Long-form explanation used by `serin explain`.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => {
                "The lexer found a character sequence it does not recognize. \
                 Lexing continues after the offending text."
            }
            ErrorCode::E1001 => {
                "The parser found a token that cannot start or continue the current \
                 declaration. It skips to the next `;` or `}` and carries on."
            }
            ErrorCode::E1002 => "An identifier was expected, e.g. after `class` or `namespace`.",
            ErrorCode::E1003 => "A type was expected, e.g. in a field declaration or base list.",
            ErrorCode::E1004 => "A `{`, `(`, `[` or `<` was never closed before end of file.",
            ErrorCode::E2001 => {
                "`[SerializeInterface]` only applies to fields whose type is an interface, \
                 or a `List<T>` whose element type is an interface. The field is skipped."
            }
            ErrorCode::E2002 => {
                "Static and const fields are not serialized by the engine, so no backing \
                 field is generated for them."
            }
            ErrorCode::E2003 => {
                "A readonly interface field cannot be assigned during deserialization. \
                 Remove `readonly`, or make the field a list initialized inline."
            }
            ErrorCode::E2004 => {
                "A readonly list is repopulated in place after deserialization, so it must be \
                 initialized where it is declared, e.g. `= new();`."
            }
            ErrorCode::E2005 => {
                "The field's type could not be found in the compilation. Only interfaces \
                 declared in the analyzed sources can be validated."
            }
            ErrorCode::E2006 => {
                "The generated backing field `<name>Serialized` would clash with a member the \
                 class already declares. Rename one of them."
            }
            ErrorCode::E3001 => {
                "A field inherited from a generic base class is private, so the derived class's \
                 generated code cannot assign it. Make it protected."
            }
            ErrorCode::E3002 => {
                "The inherited generic field is declared more than one generic level up. Only a \
                 class that directly closes the declaring generic base is supported."
            }
            ErrorCode::E4001 => {
                "The generated companion is merged through partial-class composition, so the \
                 class and every containing type must be declared `partial`."
            }
            ErrorCode::E4002 => {
                "Two classes produced generated sources with the same name. The second one is \
                 rejected rather than overwriting the first."
            }
            ErrorCode::E4003 => {
                "A base class implements the serialization callback interface by hand. The \
                 derived class's generated hooks re-implement the interface, so the base's \
                 hooks no longer run for derived instances. Call them from the derived class, \
                 or move the base's interface fields to `[SerializeInterface]`."
            }
        }
    }

    pub fn is_lexer_error(&self) -> bool {
        matches!(self, ErrorCode::E0001)
    }

    pub fn is_parser_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E1001 | ErrorCode::E1002 | ErrorCode::E1003 | ErrorCode::E1004
        )
    }

    /// Field classification skips (E2xxx range).
    pub fn is_field_skip(&self) -> bool {
        matches!(
            self,
            ErrorCode::E2001
                | ErrorCode::E2002
                | ErrorCode::E2003
                | ErrorCode::E2004
                | ErrorCode::E2005
                | ErrorCode::E2006
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2001"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}

//! Predefined type keywords and their `System` metadata names.

use std::fmt;

/// A built-in type keyword such as `int` or `string`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PredefinedType {
    Bool,
    Byte,
    SByte,
    Char,
    Decimal,
    Double,
    Float,
    Int,
    UInt,
    Long,
    ULong,
    Short,
    UShort,
    NInt,
    NUInt,
    Object,
    String,
    Void,
}

impl PredefinedType {
    /// Every predefined type, in keyword order.
    pub const ALL: [PredefinedType; 18] = [
        PredefinedType::Bool,
        PredefinedType::Byte,
        PredefinedType::SByte,
        PredefinedType::Char,
        PredefinedType::Decimal,
        PredefinedType::Double,
        PredefinedType::Float,
        PredefinedType::Int,
        PredefinedType::UInt,
        PredefinedType::Long,
        PredefinedType::ULong,
        PredefinedType::Short,
        PredefinedType::UShort,
        PredefinedType::NInt,
        PredefinedType::NUInt,
        PredefinedType::Object,
        PredefinedType::String,
        PredefinedType::Void,
    ];

    /// Parse a keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.keyword() == keyword)
    }

    /// Source keyword.
    pub const fn keyword(self) -> &'static str {
        match self {
            PredefinedType::Bool => "bool",
            PredefinedType::Byte => "byte",
            PredefinedType::SByte => "sbyte",
            PredefinedType::Char => "char",
            PredefinedType::Decimal => "decimal",
            PredefinedType::Double => "double",
            PredefinedType::Float => "float",
            PredefinedType::Int => "int",
            PredefinedType::UInt => "uint",
            PredefinedType::Long => "long",
            PredefinedType::ULong => "ulong",
            PredefinedType::Short => "short",
            PredefinedType::UShort => "ushort",
            PredefinedType::NInt => "nint",
            PredefinedType::NUInt => "nuint",
            PredefinedType::Object => "object",
            PredefinedType::String => "string",
            PredefinedType::Void => "void",
        }
    }

    /// Simple metadata name inside the `System` namespace.
    pub const fn system_name(self) -> &'static str {
        match self {
            PredefinedType::Bool => "Boolean",
            PredefinedType::Byte => "Byte",
            PredefinedType::SByte => "SByte",
            PredefinedType::Char => "Char",
            PredefinedType::Decimal => "Decimal",
            PredefinedType::Double => "Double",
            PredefinedType::Float => "Single",
            PredefinedType::Int => "Int32",
            PredefinedType::UInt => "UInt32",
            PredefinedType::Long => "Int64",
            PredefinedType::ULong => "UInt64",
            PredefinedType::Short => "Int16",
            PredefinedType::UShort => "UInt16",
            PredefinedType::NInt => "IntPtr",
            PredefinedType::NUInt => "UIntPtr",
            PredefinedType::Object => "Object",
            PredefinedType::String => "String",
            PredefinedType::Void => "Void",
        }
    }

    /// Whether the type is a value type (struct) rather than a class.
    pub const fn is_value_type(self) -> bool {
        !matches!(self, PredefinedType::Object | PredefinedType::String)
    }
}

impl fmt::Display for PredefinedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_round_trip() {
        for p in PredefinedType::ALL {
            assert_eq!(PredefinedType::from_keyword(p.keyword()), Some(p));
        }
        assert_eq!(PredefinedType::from_keyword("List"), None);
    }

    #[test]
    fn test_system_names() {
        assert_eq!(PredefinedType::Bool.system_name(), "Boolean");
        assert_eq!(PredefinedType::Float.system_name(), "Single");
        assert!(!PredefinedType::String.is_value_type());
    }
}

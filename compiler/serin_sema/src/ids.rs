//! Index handles into a `Compilation`.

use std::fmt;

use serin_ir::PredefinedType;

/// Index of a type symbol.
///
/// Well-known `System` types are registered first, at fixed indices, so the
/// type behind a predefined keyword is found without a lookup.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    /// `System.Collections.Generic.List<T>`, registered right after the
    /// predefined types.
    pub const LIST: Self = Self(PredefinedType::ALL.len() as u32);

    /// First index for types declared in source.
    pub const FIRST_DECLARED: u32 = Self::LIST.0 + 1;

    /// The `System` type a predefined keyword aliases.
    pub fn predefined(ty: PredefinedType) -> Self {
        let index = PredefinedType::ALL
            .iter()
            .position(|p| *p == ty)
            .unwrap_or_default();
        Self(u32::try_from(index).unwrap_or_default())
    }

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }

    pub fn is_well_known(self) -> bool {
        self.0 < Self::FIRST_DECLARED
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

/// Index of a syntax tree in the compilation.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
pub struct TreeId(u32);

impl TreeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a lexical scope (compilation unit, namespace or type body).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ScopeId(u32);

impl ScopeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

//! Declaration modifier flags.

use bitflags::bitflags;

bitflags! {
    /// Modifier keywords attached to a type or member declaration.
    ///
    /// Accessibility keywords combine (`protected internal`, `private protected`),
    /// so they are flags rather than an enum.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct Modifiers: u32 {
        // === Accessibility ===
        const PUBLIC = 1 << 0;
        const PRIVATE = 1 << 1;
        const PROTECTED = 1 << 2;
        const INTERNAL = 1 << 3;

        // === Storage ===
        const STATIC = 1 << 8;
        const READONLY = 1 << 9;
        const CONST = 1 << 10;
        const VOLATILE = 1 << 11;

        // === Type shape ===
        const PARTIAL = 1 << 16;
        const ABSTRACT = 1 << 17;
        const SEALED = 1 << 18;

        // === Other ===
        const NEW = 1 << 24;
        const VIRTUAL = 1 << 25;
        const OVERRIDE = 1 << 26;
        const EXTERN = 1 << 27;
        const UNSAFE = 1 << 28;
        const ASYNC = 1 << 29;
        const REQUIRED = 1 << 30;
    }
}

impl Modifiers {
    /// Any accessibility keyword.
    pub const ACCESS: Modifiers = Modifiers::PUBLIC
        .union(Modifiers::PRIVATE)
        .union(Modifiers::PROTECTED)
        .union(Modifiers::INTERNAL);

    /// Map a modifier keyword to its flag.
    pub fn from_keyword(keyword: &str) -> Option<Modifiers> {
        Some(match keyword {
            "public" => Modifiers::PUBLIC,
            "private" => Modifiers::PRIVATE,
            "protected" => Modifiers::PROTECTED,
            "internal" => Modifiers::INTERNAL,
            "static" => Modifiers::STATIC,
            "readonly" => Modifiers::READONLY,
            "const" => Modifiers::CONST,
            "volatile" => Modifiers::VOLATILE,
            "partial" => Modifiers::PARTIAL,
            "abstract" => Modifiers::ABSTRACT,
            "sealed" => Modifiers::SEALED,
            "new" => Modifiers::NEW,
            "virtual" => Modifiers::VIRTUAL,
            "override" => Modifiers::OVERRIDE,
            "extern" => Modifiers::EXTERN,
            "unsafe" => Modifiers::UNSAFE,
            "async" => Modifiers::ASYNC,
            "required" => Modifiers::REQUIRED,
            _ => return None,
        })
    }

    /// True when a member with these modifiers is visible to derived types.
    ///
    /// Members without an accessibility keyword default to `private`.
    /// `private protected` is visible to derived types in the same assembly,
    /// which is where generated code lands.
    pub fn is_visible_to_derived(self) -> bool {
        self.intersects(Modifiers::PUBLIC | Modifiers::PROTECTED | Modifiers::INTERNAL)
    }
}

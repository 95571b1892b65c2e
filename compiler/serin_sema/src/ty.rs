//! Resolved types.

use crate::TypeId;

/// A type reference resolved in its declaring scope.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Ty {
    /// A declared or well-known type, with its type arguments (empty when
    /// the type is not generic).
    Named { id: TypeId, args: Vec<Ty> },
    /// A type parameter of `owner`.
    Param { name: String, owner: TypeId },
    Array { element: Box<Ty>, rank: u8 },
    /// `T?`
    Nullable(Box<Ty>),
    Tuple(Vec<Ty>),
    /// A name the compilation does not declare; kept as written.
    Unresolved(String),
}

impl Ty {
    pub fn named(id: TypeId) -> Self {
        Ty::Named {
            id,
            args: Vec::new(),
        }
    }

    /// The symbol behind a named type.
    pub fn type_id(&self) -> Option<TypeId> {
        match self {
            Ty::Named { id, .. } => Some(*id),
            _ => None,
        }
    }

    /// Type arguments of a named type.
    pub fn args(&self) -> &[Ty] {
        match self {
            Ty::Named { args, .. } => args,
            _ => &[],
        }
    }

    /// Strip a nullable annotation (`IFoo?` is still an `IFoo`).
    pub fn strip_nullable(&self) -> &Ty {
        match self {
            Ty::Nullable(inner) => inner.strip_nullable(),
            other => other,
        }
    }

    /// Whether any type parameter occurs anywhere inside, e.g. in
    /// `List<IHandler<T>>`.
    pub fn contains_type_param(&self) -> bool {
        match self {
            Ty::Param { .. } => true,
            Ty::Named { args, .. } | Ty::Tuple(args) => args.iter().any(Ty::contains_type_param),
            Ty::Array { element, .. } => element.contains_type_param(),
            Ty::Nullable(inner) => inner.contains_type_param(),
            Ty::Unresolved(_) => false,
        }
    }

    /// Whether a parameter of `owner` occurs anywhere inside.
    pub fn mentions_params_of(&self, owner: TypeId) -> bool {
        match self {
            Ty::Param { owner: o, .. } => *o == owner,
            Ty::Named { args, .. } | Ty::Tuple(args) => {
                args.iter().any(|arg| arg.mentions_params_of(owner))
            }
            Ty::Array { element, .. } => element.mentions_params_of(owner),
            Ty::Nullable(inner) => inner.mentions_params_of(owner),
            Ty::Unresolved(_) => false,
        }
    }

    /// A generic instantiation with every argument concrete.
    pub fn is_closed_generic(&self) -> bool {
        match self {
            Ty::Named { args, .. } => !args.is_empty() && !self.contains_type_param(),
            _ => false,
        }
    }

    /// Replace parameters of `owner` by position: the i-th declared
    /// parameter name in `params` maps to `args[i]`.
    ///
    /// Parameters without a corresponding argument are left in place.
    pub fn substitute(&self, owner: TypeId, params: &[String], args: &[Ty]) -> Ty {
        match self {
            Ty::Param { name, owner: o } if *o == owner => params
                .iter()
                .position(|p| p == name)
                .and_then(|i| args.get(i))
                .cloned()
                .unwrap_or_else(|| self.clone()),
            Ty::Param { .. } | Ty::Unresolved(_) => self.clone(),
            Ty::Named { id, args: inner } => Ty::Named {
                id: *id,
                args: inner
                    .iter()
                    .map(|arg| arg.substitute(owner, params, args))
                    .collect(),
            },
            Ty::Array { element, rank } => Ty::Array {
                element: Box::new(element.substitute(owner, params, args)),
                rank: *rank,
            },
            Ty::Nullable(inner) => Ty::Nullable(Box::new(inner.substitute(owner, params, args))),
            Ty::Tuple(elements) => Ty::Tuple(
                elements
                    .iter()
                    .map(|e| e.substitute(owner, params, args))
                    .collect(),
            ),
        }
    }
}

//! Name lookup: type syntax to `Ty` in a declaring scope.

use serin_ir::{NameSegment, NameSyntax, TypeSyntax, UsingDirective};

use crate::compilation::{Parent, TypeKey};
use crate::symbol::ScopeKind;
use crate::{Compilation, ScopeId, Ty, TypeId};

/// What a qualified-name prefix denotes while walking its segments.
enum Qualifier {
    Namespace(String),
    Type(Ty),
}

impl Compilation<'_> {
    /// Resolve type syntax as written in `scope`.
    ///
    /// Names the compilation does not declare become [`Ty::Unresolved`].
    pub fn resolve(&self, syntax: &TypeSyntax, scope: ScopeId) -> Ty {
        self.resolve_at(syntax, Some(scope))
    }

    /// `scope == None` resolves against the global namespace alone.
    fn resolve_at(&self, syntax: &TypeSyntax, scope: Option<ScopeId>) -> Ty {
        match syntax {
            TypeSyntax::Predefined { ty, .. } => Ty::named(TypeId::predefined(*ty)),
            TypeSyntax::Named(name) => self
                .resolve_name(name, scope)
                .unwrap_or_else(|| Ty::Unresolved(name.to_string())),
            TypeSyntax::Array { element, rank, .. } => Ty::Array {
                element: Box::new(self.resolve_at(element, scope)),
                rank: *rank,
            },
            TypeSyntax::Nullable { inner, .. } => {
                Ty::Nullable(Box::new(self.resolve_at(inner, scope)))
            }
            TypeSyntax::Tuple { elements, .. } => Ty::Tuple(
                elements
                    .iter()
                    .map(|element| self.resolve_at(element, scope))
                    .collect(),
            ),
        }
    }

    fn resolve_name(&self, name: &NameSyntax, scope: Option<ScopeId>) -> Option<Ty> {
        if name.global {
            return self.walk_members(Qualifier::Namespace(String::new()), &name.segments, scope);
        }

        let (first, rest) = name.segments.split_first()?;
        let first_args = self.resolve_args(first, scope);
        if let Some(ty) = self.lookup_simple(&first.ident, &first_args, scope) {
            if rest.is_empty() {
                return Some(ty);
            }
            if let Some(found) = self.walk_members(Qualifier::Type(ty), rest, scope) {
                return Some(found);
            }
        }
        if rest.is_empty() || !first.type_args.is_empty() {
            return None;
        }

        self.namespace_starts(&first.ident, scope)
            .into_iter()
            .find_map(|ns| self.walk_members(Qualifier::Namespace(ns), rest, scope))
    }

    fn resolve_args(&self, segment: &NameSegment, scope: Option<ScopeId>) -> Vec<Ty> {
        segment
            .type_args
            .iter()
            .map(|arg| self.resolve_at(arg, scope))
            .collect()
    }

    fn find(&self, parent: Parent, name: &str, arity: usize) -> Option<TypeId> {
        self.index.get(&TypeKey::new(parent, name, arity)).copied()
    }

    /// Follow `.Segment` member accesses from a namespace or type.
    fn walk_members(
        &self,
        start: Qualifier,
        segments: &[NameSegment],
        scope: Option<ScopeId>,
    ) -> Option<Ty> {
        let mut current = start;
        for segment in segments {
            let args = self.resolve_args(segment, scope);
            current = match current {
                Qualifier::Namespace(ns) => {
                    if let Some(id) =
                        self.find(Parent::Namespace(ns.clone()), &segment.ident, args.len())
                    {
                        Qualifier::Type(Ty::Named { id, args })
                    } else {
                        let nested = join_namespace(&ns, &segment.ident);
                        if !args.is_empty() || !self.namespaces.contains(&nested) {
                            return None;
                        }
                        Qualifier::Namespace(nested)
                    }
                }
                Qualifier::Type(ty) => {
                    let outer = ty.type_id()?;
                    let id = self.find(Parent::Type(outer), &segment.ident, args.len())?;
                    Qualifier::Type(Ty::Named { id, args })
                }
            };
        }
        match current {
            Qualifier::Type(ty) => Some(ty),
            Qualifier::Namespace(_) => None,
        }
    }

    /// Unqualified lookup, innermost scope first.
    fn lookup_simple(&self, ident: &str, args: &[Ty], scope: Option<ScopeId>) -> Option<Ty> {
        let named = |id| Ty::Named {
            id,
            args: args.to_vec(),
        };
        let mut current = scope;
        while let Some(id) = current {
            let level = &self.scopes[id.index()];
            match &level.kind {
                ScopeKind::Type(owner) => {
                    let symbol = self.symbol(*owner);
                    if args.is_empty() && symbol.type_params.iter().any(|p| p == ident) {
                        return Some(Ty::Param {
                            name: ident.to_string(),
                            owner: *owner,
                        });
                    }
                    if let Some(nested) = self.find(Parent::Type(*owner), ident, args.len()) {
                        return Some(named(nested));
                    }
                }
                ScopeKind::Namespace { name, usings } => {
                    if let Some(found) = self.find(Parent::Namespace(name.clone()), ident, args.len())
                    {
                        return Some(named(found));
                    }
                    if let Some(found) =
                        self.lookup_in_usings(usings.iter(), ident, args, level.parent)
                    {
                        return Some(found);
                    }
                }
                ScopeKind::Unit { usings } => {
                    if let Some(found) = self.find(Parent::Namespace(String::new()), ident, args.len())
                    {
                        return Some(named(found));
                    }
                    let visible = usings.iter().chain(self.global_usings.iter().copied());
                    if let Some(found) = self.lookup_in_usings(visible, ident, args, None) {
                        return Some(found);
                    }
                }
            }
            current = level.parent;
        }

        if scope.is_none() {
            return self
                .find(Parent::Namespace(String::new()), ident, args.len())
                .map(named);
        }
        None
    }

    /// Aliases, `using static` and `using Namespace;` at one level. Alias
    /// targets resolve in `alias_scope`, the scope enclosing the directives.
    fn lookup_in_usings<'u>(
        &self,
        usings: impl Iterator<Item = &'u UsingDirective> + Clone,
        ident: &str,
        args: &[Ty],
        alias_scope: Option<ScopeId>,
    ) -> Option<Ty> {
        if args.is_empty() {
            for using in usings.clone() {
                if using.alias.as_deref() != Some(ident) || self.names_namespace(using) {
                    continue;
                }
                return Some(self.resolve_at(&using.target, alias_scope));
            }
        }

        let mut found = None;
        for using in usings {
            if using.alias.is_some() {
                continue;
            }
            let hit = if using.is_static {
                match self.resolve_at(&using.target, alias_scope) {
                    Ty::Named { id, .. } => self.find(Parent::Type(id), ident, args.len()),
                    _ => None,
                }
            } else {
                using
                    .namespace_name()
                    .and_then(|ns| self.find(Parent::Namespace(ns), ident, args.len()))
            };
            if let Some(id) = hit {
                found.get_or_insert(id);
            }
        }
        found.map(|id| Ty::Named {
            id,
            args: args.to_vec(),
        })
    }

    fn names_namespace(&self, using: &UsingDirective) -> bool {
        using
            .target
            .as_name()
            .is_some_and(|name| self.namespaces.contains(&name.dotted()))
    }

    /// Namespaces a qualified name's first segment may denote, in lookup
    /// order: namespace aliases, enclosing namespaces, then the global one.
    fn namespace_starts(&self, ident: &str, scope: Option<ScopeId>) -> Vec<String> {
        let mut starts = Vec::new();
        let mut current = scope;
        while let Some(id) = current {
            let level = &self.scopes[id.index()];
            match &level.kind {
                ScopeKind::Namespace { name, usings } => {
                    self.push_namespace_aliases(usings, ident, &mut starts);
                    let nested = join_namespace(name, ident);
                    if self.namespaces.contains(&nested) {
                        starts.push(nested);
                    }
                }
                ScopeKind::Unit { usings } => {
                    self.push_namespace_aliases(usings, ident, &mut starts);
                }
                ScopeKind::Type(_) => {}
            }
            current = level.parent;
        }
        if self.namespaces.contains(ident) {
            starts.push(ident.to_string());
        }
        starts
    }

    fn push_namespace_aliases(
        &self,
        usings: &[UsingDirective],
        ident: &str,
        starts: &mut Vec<String>,
    ) {
        for using in usings {
            if using.alias.as_deref() == Some(ident) && self.names_namespace(using) {
                if let Some(name) = using.target.as_name() {
                    starts.push(name.dotted());
                }
            }
        }
    }
}

fn join_namespace(outer: &str, name: &str) -> String {
    if outer.is_empty() {
        name.to_string()
    } else {
        format!("{outer}.{name}")
    }
}

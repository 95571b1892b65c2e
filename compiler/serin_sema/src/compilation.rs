//! The compilation snapshot: every declared type across all syntax trees.

use rustc_hash::{FxHashMap, FxHashSet};
use serin_ir::{
    DeclKind, NamespaceMember, PredefinedType, Span, SyntaxTree, TypeDecl, UsingDirective,
};

use crate::symbol::{Scope, ScopeKind};
use crate::{DeclSite, ScopeId, TreeId, Ty, TypeId, TypeSymbol};

/// Where a type is declared, for name lookup.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub(crate) enum Parent {
    /// Dotted namespace; empty for the global namespace.
    Namespace(String),
    Type(TypeId),
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub(crate) struct TypeKey {
    pub(crate) parent: Parent,
    pub(crate) name: String,
    pub(crate) arity: usize,
}

impl TypeKey {
    pub(crate) fn new(parent: Parent, name: &str, arity: usize) -> Self {
        TypeKey {
            parent,
            name: name.to_string(),
            arity,
        }
    }
}

/// Immutable semantic view over a set of parsed files.
///
/// Built once per generator run. All queries are read-only, so a
/// `&Compilation` can be shared across worker threads.
#[derive(Debug)]
pub struct Compilation<'a> {
    trees: &'a [SyntaxTree],
    symbols: Vec<TypeSymbol<'a>>,
    pub(crate) scopes: Vec<Scope<'a>>,
    pub(crate) index: FxHashMap<TypeKey, TypeId>,
    pub(crate) namespaces: FxHashSet<String>,
    pub(crate) global_usings: Vec<&'a UsingDirective>,
    by_decl: FxHashMap<(TreeId, Span), TypeId>,
}

impl<'a> Compilation<'a> {
    #[tracing::instrument(level = "debug", skip_all, fields(trees = trees.len()))]
    pub fn new(trees: &'a [SyntaxTree]) -> Self {
        let mut compilation = Compilation {
            trees,
            symbols: Vec::new(),
            scopes: Vec::new(),
            index: FxHashMap::default(),
            namespaces: FxHashSet::default(),
            global_usings: Vec::new(),
            by_decl: FxHashMap::default(),
        };
        compilation.register_well_known();

        for (i, tree) in trees.iter().enumerate() {
            let tree_id = TreeId::new(i);
            compilation
                .global_usings
                .extend(tree.root.usings.iter().filter(|u| u.is_global));
            let unit = compilation.push_scope(
                None,
                ScopeKind::Unit {
                    usings: &tree.root.usings,
                },
            );
            compilation.collect_members(tree_id, &tree.root.members, unit, "");
        }

        compilation.resolve_base_lists();
        tracing::debug!(
            types = compilation.symbols.len() - TypeId::FIRST_DECLARED as usize,
            "compilation built"
        );
        compilation
    }

    fn register_well_known(&mut self) {
        for ty in PredefinedType::ALL {
            let kind = if ty.is_value_type() {
                DeclKind::Struct
            } else {
                DeclKind::Class
            };
            self.add_symbol(ty.system_name(), kind, "System", None, Vec::new());
        }
        self.add_symbol(
            "List",
            DeclKind::Class,
            "System.Collections.Generic",
            None,
            vec!["T".to_string()],
        );
        for ns in ["", "System", "System.Collections", "System.Collections.Generic"] {
            self.namespaces.insert(ns.to_string());
        }
    }

    fn add_symbol(
        &mut self,
        name: &str,
        kind: DeclKind,
        namespace: &str,
        containing: Option<TypeId>,
        type_params: Vec<String>,
    ) -> TypeId {
        let id = TypeId::from_raw(u32::try_from(self.symbols.len()).unwrap_or(u32::MAX));
        let parent = match containing {
            Some(outer) => Parent::Type(outer),
            None => Parent::Namespace(namespace.to_string()),
        };
        self.index
            .insert(TypeKey::new(parent, name, type_params.len()), id);
        self.symbols.push(TypeSymbol {
            name: name.to_string(),
            kind,
            namespace: namespace.to_string(),
            containing,
            type_params,
            decls: Vec::new(),
            base: None,
            interfaces: Vec::new(),
        });
        id
    }

    fn push_scope(&mut self, parent: Option<ScopeId>, kind: ScopeKind<'a>) -> ScopeId {
        let id = ScopeId::new(self.scopes.len());
        self.scopes.push(Scope { parent, kind });
        id
    }

    fn collect_members(
        &mut self,
        tree: TreeId,
        members: &'a [NamespaceMember],
        scope: ScopeId,
        namespace: &str,
    ) {
        for member in members {
            match member {
                NamespaceMember::Namespace(decl) => {
                    // `namespace A.B` opens one scope per component.
                    let mut scope = scope;
                    let mut full = namespace.to_string();
                    let parts: Vec<&str> = decl.name.split('.').collect();
                    for (i, part) in parts.iter().enumerate() {
                        if !full.is_empty() {
                            full.push('.');
                        }
                        full.push_str(part);
                        self.namespaces.insert(full.clone());
                        let usings: &'a [UsingDirective] = if i + 1 == parts.len() {
                            &decl.usings
                        } else {
                            &[]
                        };
                        scope = self.push_scope(
                            Some(scope),
                            ScopeKind::Namespace {
                                name: full.clone(),
                                usings,
                            },
                        );
                    }
                    self.collect_members(tree, &decl.members, scope, &full);
                }
                NamespaceMember::Type(decl) => {
                    self.collect_type(tree, decl, scope, None, namespace);
                }
            }
        }
    }

    fn collect_type(
        &mut self,
        tree: TreeId,
        decl: &'a TypeDecl,
        scope: ScopeId,
        containing: Option<TypeId>,
        namespace: &str,
    ) {
        let parent = match containing {
            Some(outer) => Parent::Type(outer),
            None => Parent::Namespace(namespace.to_string()),
        };
        let key = TypeKey::new(parent, &decl.name, decl.arity());
        let id = match self.index.get(&key) {
            Some(&existing) if !existing.is_well_known() => existing,
            _ => self.add_symbol(
                &decl.name,
                decl.kind,
                namespace,
                containing,
                decl.type_params.iter().map(|p| p.name.clone()).collect(),
            ),
        };

        let body_scope = self.push_scope(Some(scope), ScopeKind::Type(id));
        self.symbols[id.index()].decls.push(DeclSite {
            tree,
            decl,
            body_scope,
        });
        self.by_decl.insert((tree, decl.span), id);

        for nested in decl.nested_types() {
            self.collect_type(tree, nested, body_scope, Some(id), namespace);
        }
    }

    /// Resolve every declared type's base list. Runs after all symbols exist
    /// so bases may refer to types declared later or in other files.
    fn resolve_base_lists(&mut self) {
        let mut resolved = Vec::new();
        for (index, symbol) in self.symbols.iter().enumerate() {
            let mut base: Option<Ty> = None;
            let mut interfaces: Vec<Ty> = Vec::new();
            for site in &symbol.decls {
                for (position, syntax) in site.decl.bases.iter().enumerate() {
                    let ty = self.resolve(syntax, site.body_scope);
                    let can_be_base = position == 0
                        && symbol.is_class()
                        && !self.is_interface(&ty)
                        && ty != Ty::named(TypeId::predefined(PredefinedType::Object));
                    if can_be_base && base.is_none() {
                        base = Some(ty);
                    } else if !interfaces.contains(&ty) && base.as_ref() != Some(&ty) {
                        interfaces.push(ty);
                    }
                }
            }
            if base.is_some() || !interfaces.is_empty() {
                resolved.push((index, base, interfaces));
            }
        }

        for (index, base, interfaces) in resolved {
            let symbol = &mut self.symbols[index];
            symbol.base = base;
            symbol.interfaces = interfaces;
        }
    }

    // ===== Queries =====

    pub fn trees(&self) -> &'a [SyntaxTree] {
        self.trees
    }

    /// Trees with their ids, in input order.
    pub fn tree_ids(&self) -> impl Iterator<Item = (TreeId, &'a SyntaxTree)> {
        self.trees
            .iter()
            .enumerate()
            .map(|(index, tree)| (TreeId::new(index), tree))
    }

    pub fn tree(&self, id: TreeId) -> &'a SyntaxTree {
        &self.trees[id.index()]
    }

    pub fn symbol(&self, id: TypeId) -> &TypeSymbol<'a> {
        &self.symbols[id.index()]
    }

    /// Types declared in source, in declaration order.
    pub fn declared_types(&self) -> impl Iterator<Item = (TypeId, &TypeSymbol<'a>)> {
        self.symbols
            .iter()
            .enumerate()
            .skip(TypeId::FIRST_DECLARED as usize)
            .map(|(i, symbol)| (TypeId::from_raw(u32::try_from(i).unwrap_or(u32::MAX)), symbol))
    }

    /// The symbol a type declaration belongs to.
    pub fn symbol_for_decl(&self, tree: TreeId, decl: &TypeDecl) -> Option<TypeId> {
        self.by_decl.get(&(tree, decl.span)).copied()
    }

    /// Look up a top-level type by namespace-qualified name, e.g. `Game.IFoo`.
    pub fn lookup(&self, full_name: &str, arity: usize) -> Option<TypeId> {
        let (namespace, name) = full_name.rsplit_once('.').unwrap_or(("", full_name));
        self.index
            .get(&TypeKey::new(Parent::Namespace(namespace.to_string()), name, arity))
            .copied()
    }

    pub fn kind_of(&self, ty: &Ty) -> Option<DeclKind> {
        ty.strip_nullable()
            .type_id()
            .map(|id| self.symbol(id).kind)
    }

    pub fn is_interface(&self, ty: &Ty) -> bool {
        self.kind_of(ty) == Some(DeclKind::Interface)
    }

    /// Element type of `List<T>`.
    pub fn list_element<'t>(&self, ty: &'t Ty) -> Option<&'t Ty> {
        match ty.strip_nullable() {
            Ty::Named { id, args } if *id == TypeId::LIST && args.len() == 1 => args.first(),
            _ => None,
        }
    }

    pub fn base_type(&self, id: TypeId) -> Option<&Ty> {
        self.symbol(id).base.as_ref()
    }

    /// Enclosing types of `id`, outermost first.
    pub fn containing_chain(&self, id: TypeId) -> Vec<TypeId> {
        let mut chain = Vec::new();
        let mut current = self.symbol(id).containing;
        while let Some(outer) = current {
            chain.push(outer);
            current = self.symbol(outer).containing;
        }
        chain.reverse();
        chain
    }

    /// Namespace plus containing types plus name, without type arguments.
    pub fn qualified_name(&self, id: TypeId) -> String {
        let symbol = self.symbol(id);
        let mut out = String::new();
        if !symbol.namespace.is_empty() {
            out.push_str(&symbol.namespace);
            out.push('.');
        }
        for outer in self.containing_chain(id) {
            out.push_str(&self.symbol(outer).name);
            out.push('.');
        }
        out.push_str(&symbol.name);
        out
    }

    /// Fully qualified rendering used as a type token in generated code.
    ///
    /// Type arguments are expanded recursively and joined with `,`, e.g.
    /// `Game.IGeneric<Game.IGeneric<System.Int32>>`. Global-namespace types
    /// carry no prefix.
    pub fn full_name(&self, ty: &Ty) -> String {
        let mut out = String::new();
        self.write_full_name(ty, &mut out);
        out
    }

    fn write_full_name(&self, ty: &Ty, out: &mut String) {
        match ty {
            Ty::Named { id, args } => {
                out.push_str(&self.qualified_name(*id));
                self.write_args(args, out);
            }
            Ty::Param { name, .. } => out.push_str(name),
            Ty::Array { element, rank } => {
                self.write_full_name(element, out);
                out.push('[');
                for _ in 1..*rank {
                    out.push(',');
                }
                out.push(']');
            }
            Ty::Nullable(inner) => {
                self.write_full_name(inner, out);
                out.push('?');
            }
            Ty::Tuple(elements) => {
                out.push_str("System.ValueTuple");
                self.write_args(elements, out);
            }
            Ty::Unresolved(text) => out.push_str(text),
        }
    }

    fn write_args(&self, args: &[Ty], out: &mut String) {
        if args.is_empty() {
            return;
        }
        out.push('<');
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            self.write_full_name(arg, out);
        }
        out.push('>');
    }

    /// Rewrite parameters of `base`'s generic definition to `base`'s arguments.
    ///
    /// With `base = Parent<bool>`, `IGeneric<T>` (over `Parent`'s `T`)
    /// becomes `IGeneric<System.Boolean>`.
    pub fn substitute_base_args(&self, ty: &Ty, base: &Ty) -> Ty {
        match base {
            Ty::Named { id, args } => ty.substitute(*id, &self.symbol(*id).type_params, args),
            _ => ty.clone(),
        }
    }

    /// Using directives visible in `scope`, outermost first. Global usings
    /// are not included.
    pub fn usings_in_scope(&self, scope: ScopeId) -> Vec<&'a UsingDirective> {
        let mut levels = Vec::new();
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = &self.scopes[id.index()];
            match &scope.kind {
                ScopeKind::Unit { usings } | ScopeKind::Namespace { usings, .. } => {
                    levels.push(*usings);
                }
                ScopeKind::Type(_) => {}
            }
            current = scope.parent;
        }
        levels
            .into_iter()
            .rev()
            .flat_map(|usings| usings.iter().filter(|u| !u.is_global))
            .collect()
    }
}

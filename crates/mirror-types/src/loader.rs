use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use mirror_signature::{
    parse_class_signature, BaseType, ClassSignature, ClassTypeSignature, TypeArgument,
    TypeSignature,
};

use crate::error::{Result, TypeError};
use crate::store::{DeclId, DeclKind, TypeDecl, TypeEnv, TypeParamDef, TypeParamId, TypeStore};
use crate::ty::{DeclaredType, PrimitiveType, Type, WildcardBound};

/// The raw description of one declaration, as a provider hands it out.
///
/// When `signature` (a JVM generic class signature) is present it is the
/// source of truth for type parameters, superclass, and superinterfaces;
/// otherwise the raw names are used and the declaration is non-generic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclSource {
    pub name: String,
    pub kind: DeclKind,
    pub signature: Option<String>,
    pub super_name: Option<String>,
    pub interface_names: Vec<String>,
    pub enclosing: Option<String>,
}

/// The narrow interface a declaration source implements: resolve a binary
/// name to its raw declaration data.
pub trait DeclProvider {
    fn declaration(&self, binary_name: &str) -> Option<DeclSource>;
}

/// Consults providers in order; the first that knows a name wins.
pub struct ChainProvider<'a> {
    providers: Vec<&'a dyn DeclProvider>,
}

impl<'a> ChainProvider<'a> {
    pub fn new(providers: Vec<&'a dyn DeclProvider>) -> ChainProvider<'a> {
        ChainProvider { providers }
    }
}

impl DeclProvider for ChainProvider<'_> {
    fn declaration(&self, binary_name: &str) -> Option<DeclSource> {
        self.providers
            .iter()
            .find_map(|p| p.declaration(binary_name))
    }
}

/// Type variables in scope while translating one signature, by simple name.
#[derive(Debug, Clone, Default)]
pub struct TypeVarScope {
    by_name: HashMap<String, TypeParamId>,
}

impl TypeVarScope {
    pub fn new() -> TypeVarScope {
        TypeVarScope::default()
    }

    pub fn insert(&mut self, name: &str, id: TypeParamId) {
        self.by_name.insert(name.to_string(), id);
    }

    pub fn get(&self, name: &str) -> Option<TypeParamId> {
        self.by_name.get(name).copied()
    }
}

/// A single-threaded materialization session: everything reachable from one
/// `ensure_decl` request is interned and defined in the same store before the
/// call returns, with an in-flight map carrying recursive hierarchies.
pub struct StoreLoader<'a> {
    store: &'a mut TypeStore,
    provider: &'a dyn DeclProvider,
    in_flight: HashSet<String>,
}

impl<'a> StoreLoader<'a> {
    pub fn new(store: &'a mut TypeStore, provider: &'a dyn DeclProvider) -> StoreLoader<'a> {
        StoreLoader {
            store,
            provider,
            in_flight: HashSet::new(),
        }
    }

    pub fn store(&self) -> &TypeStore {
        self.store
    }

    /// Materializes `name` (and everything its hierarchy reaches) in the
    /// store, returning its interned id.
    ///
    /// Fails with `MissingOperand` when the provider has no declaration for
    /// a required name, `InvalidArgument` on a malformed signature, and
    /// `Unsupported` when a signature references a type variable that is not
    /// a class type parameter in scope.
    pub fn ensure_decl(&mut self, name: &str) -> Result<DeclId> {
        if let Some(id) = self.store.decl_id(name) {
            if self.store.decl(id).is_some() || self.in_flight.contains(name) {
                return Ok(id);
            }
        }
        let id = self.store.intern_decl(name);
        self.in_flight.insert(name.to_string());
        let loaded = self.load(id, name);
        self.in_flight.remove(name);
        loaded?;
        Ok(id)
    }

    fn load(&mut self, id: DeclId, name: &str) -> Result<()> {
        let src = self.provider.declaration(name).ok_or_else(|| {
            TypeError::MissingOperand(format!("no declaration available for `{name}`"))
        })?;

        let enclosing = match &src.enclosing {
            Some(outer) => Some(self.ensure_decl(outer)?),
            None => None,
        };
        let mut scope = TypeVarScope::new();
        if let Some(outer) = enclosing {
            self.seed_enclosing_scope(outer, &mut scope);
        }

        let (type_params, super_class, interfaces) = match &src.signature {
            Some(sig) => {
                let parsed = parse_class_signature(sig).map_err(|err| {
                    TypeError::InvalidArgument(format!(
                        "malformed signature for `{name}`: {err}"
                    ))
                })?;
                self.from_signature(&parsed, &mut scope)?
            }
            None => {
                let super_class = match &src.super_name {
                    Some(n) => Some(Type::class(self.ensure_decl(n)?, Vec::new())),
                    None => None,
                };
                let mut interfaces = Vec::with_capacity(src.interface_names.len());
                for n in &src.interface_names {
                    interfaces.push(Type::class(self.ensure_decl(n)?, Vec::new()));
                }
                (Vec::new(), super_class, interfaces)
            }
        };

        // Interfaces never carry a superclass edge; their implicit `Object`
        // supertype is supplied at traversal time.
        let super_class = match src.kind {
            DeclKind::Interface | DeclKind::Annotation => None,
            DeclKind::Class | DeclKind::Enum => super_class,
        };

        self.store.define_decl(
            id,
            TypeDecl {
                name: name.to_string(),
                kind: src.kind,
                type_params,
                super_class,
                interfaces,
                enclosing,
            },
        );
        Ok(())
    }

    fn from_signature(
        &mut self,
        sig: &ClassSignature,
        scope: &mut TypeVarScope,
    ) -> Result<(Vec<TypeParamId>, Option<Type>, Vec<Type>)> {
        // Ids first, bounds second: a parameter's bound may reference the
        // parameter itself or a later sibling.
        let mut params = Vec::with_capacity(sig.type_parameters.len());
        for fp in &sig.type_parameters {
            let id = self.store.reserve_type_param(&fp.name);
            scope.insert(&fp.name, id);
            params.push(id);
        }
        for (&id, fp) in params.iter().zip(&sig.type_parameters) {
            let mut bounds = Vec::new();
            for bound in fp.bounds() {
                bounds.push(self.ty_from_sig(bound, scope)?);
            }
            self.store.define_type_param(
                id,
                TypeParamDef {
                    name: fp.name.clone(),
                    upper_bounds: bounds,
                    lower_bound: None,
                    capture: None,
                },
            )?;
        }

        let super_class = Some(self.declared_from_sig(&sig.super_class, scope)?);
        let mut interfaces = Vec::with_capacity(sig.interfaces.len());
        for iface in &sig.interfaces {
            interfaces.push(self.declared_from_sig(iface, scope)?);
        }
        Ok((params, super_class, interfaces))
    }

    fn ty_from_sig(&mut self, sig: &TypeSignature, scope: &TypeVarScope) -> Result<Type> {
        match sig {
            TypeSignature::Base(base) => Ok(Type::Primitive(primitive_from_base(*base))),
            TypeSignature::Array(component) => {
                Ok(Type::Array(Box::new(self.ty_from_sig(component, scope)?)))
            }
            TypeSignature::Var(name) => {
                scope.get(name).map(Type::TypeVar).ok_or_else(|| {
                    TypeError::Unsupported(format!(
                        "type variable `{name}` is not a class type parameter in scope; \
                         method and constructor type parameters are not modeled"
                    ))
                })
            }
            TypeSignature::Class(class) => self.declared_from_sig(class, scope),
        }
    }

    fn declared_from_sig(
        &mut self,
        sig: &ClassTypeSignature,
        scope: &TypeVarScope,
    ) -> Result<Type> {
        let mut current = Type::None;
        let mut binary = sig.package.join(".");
        for (idx, segment) in sig.segments.iter().enumerate() {
            if idx == 0 {
                if !binary.is_empty() {
                    binary.push('.');
                }
            } else {
                binary.push('$');
            }
            binary.push_str(&segment.name);

            let id = self.ensure_decl(&binary)?;
            let mut args = Vec::with_capacity(segment.type_arguments.len());
            for arg in &segment.type_arguments {
                args.push(match arg {
                    TypeArgument::Wildcard => Type::Wildcard(WildcardBound::Unbounded),
                    TypeArgument::Extends(b) => Type::Wildcard(WildcardBound::Extends(
                        Box::new(self.ty_from_sig(b, scope)?),
                    )),
                    TypeArgument::Super(b) => Type::Wildcard(WildcardBound::Super(Box::new(
                        self.ty_from_sig(b, scope)?,
                    ))),
                    TypeArgument::Exact(b) => self.ty_from_sig(b, scope)?,
                });
            }
            current = Type::Declared(DeclaredType {
                enclosing: Box::new(current),
                decl: id,
                args,
            });
        }
        Ok(current)
    }

    /// Brings the type parameters of the enclosing chain into scope,
    /// outermost first, so an inner declaration's own parameters shadow
    /// outer ones.
    fn seed_enclosing_scope(&mut self, id: DeclId, scope: &mut TypeVarScope) {
        let Some(decl) = self.store.decl(id) else {
            return;
        };
        let outer = decl.enclosing;
        let params = decl.type_params.clone();
        if let Some(outer) = outer {
            self.seed_enclosing_scope(outer, scope);
        }
        for param in params {
            if let Some(def) = self.store.type_param(param) {
                let name = def.name.clone();
                scope.insert(&name, param);
            }
        }
    }
}

fn primitive_from_base(base: BaseType) -> PrimitiveType {
    match base {
        BaseType::Boolean => PrimitiveType::Boolean,
        BaseType::Byte => PrimitiveType::Byte,
        BaseType::Short => PrimitiveType::Short,
        BaseType::Int => PrimitiveType::Int,
        BaseType::Long => PrimitiveType::Long,
        BaseType::Char => PrimitiveType::Char,
        BaseType::Float => PrimitiveType::Float,
        BaseType::Double => PrimitiveType::Double,
    }
}

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TypeError};
use crate::ty::{PrimitiveType, Type, WildcardBound};

/// Identity of a type declaration. Interned by binary name, so id equality
/// coincides with key equality.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct DeclId(u32);

impl DeclId {
    pub const fn index(self) -> u32 {
        self.0
    }
}

/// Identity of a type parameter, or of a capture variable allocated by a
/// [`crate::TyContext`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TypeParamId(u32);

impl TypeParamId {
    pub const fn index(self) -> u32 {
        self.0
    }

    pub(crate) const fn from_index(index: u32) -> TypeParamId {
        TypeParamId(index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

/// A class or interface declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    /// Binary name, with `$` separating nested declarations.
    pub name: String,
    pub kind: DeclKind,
    pub type_params: Vec<TypeParamId>,
    /// The declared superclass, a `Type::Declared`. `None` for `Object` and
    /// for interfaces.
    pub super_class: Option<Type>,
    /// Declared superinterfaces, in source order.
    pub interfaces: Vec<Type>,
    pub enclosing: Option<DeclId>,
}

impl TypeDecl {
    pub fn simple_name(&self) -> &str {
        let tail = self.name.rsplit('$').next().unwrap_or(&self.name);
        tail.rsplit('.').next().unwrap_or(tail)
    }

    /// The source-level qualified name (`java.util.Map.Entry`).
    pub fn qualified_name(&self) -> String {
        self.name.replace('$', ".")
    }
}

/// Where a capture variable came from: the formal parameter it instantiates
/// and the wildcard argument it replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureOrigin {
    pub param: TypeParamId,
    pub wildcard: WildcardBound,
}

/// The definition of a type parameter or capture variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParamDef {
    pub name: String,
    /// Declared upper bounds, in order. The variable's single upper bound is
    /// the sole entry, or the intersection of all entries; an empty list
    /// means `Object`.
    pub upper_bounds: Vec<Type>,
    /// `None` means the null type.
    pub lower_bound: Option<Type>,
    /// Present on capture variables only.
    pub capture: Option<CaptureOrigin>,
}

impl TypeParamDef {
    pub fn new(name: impl Into<String>, upper_bounds: Vec<Type>) -> TypeParamDef {
        TypeParamDef {
            name: name.into(),
            upper_bounds,
            lower_bound: None,
            capture: None,
        }
    }
}

/// Ids of the bootstrap `java.lang` declarations every store defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellKnown {
    pub object: DeclId,
    pub string: DeclId,
    pub number: DeclId,
    pub comparable: DeclId,
    pub cloneable: DeclId,
    pub serializable: DeclId,
    pub enum_: DeclId,
    pub boolean: DeclId,
    pub byte: DeclId,
    pub short: DeclId,
    pub character: DeclId,
    pub integer: DeclId,
    pub long: DeclId,
    pub float: DeclId,
    pub double: DeclId,
}

/// The read surface the algebra operates against. Implemented by
/// [`TypeStore`] and by [`crate::TyContext`].
pub trait TypeEnv {
    fn decl(&self, id: DeclId) -> Option<&TypeDecl>;
    fn decl_id(&self, name: &str) -> Option<DeclId>;
    /// The definition of a type parameter; `None` while the parameter is
    /// reserved but not yet frozen.
    fn type_param(&self, id: TypeParamId) -> Option<&TypeParamDef>;
    /// Ids below this value are allocated; contexts layering capture
    /// variables on top allocate from here.
    fn type_param_watermark(&self) -> u32;
    fn well_known(&self) -> &WellKnown;

    /// Like [`TypeEnv::type_param`], but an unfrozen parameter is an error.
    fn require_type_param(&self, id: TypeParamId) -> Result<&TypeParamDef> {
        self.type_param(id).ok_or_else(|| {
            TypeError::IllegalState(format!(
                "bounds of type parameter #{} read before they are set",
                id.index()
            ))
        })
    }

    /// The variable's upper bound as a single type: the sole bound, or the
    /// intersection of all bounds, or `Object` when none are declared.
    fn upper_bound_ty(&self, id: TypeParamId) -> Type {
        let object = || Type::class(self.well_known().object, Vec::new());
        match self.type_param(id) {
            Some(def) => match def.upper_bounds.len() {
                0 => object(),
                1 => def.upper_bounds[0].clone(),
                _ => Type::Intersection(def.upper_bounds.clone()),
            },
            None => object(),
        }
    }

    /// The variable's lower bound; the null type when none is set.
    fn lower_bound_ty(&self, id: TypeParamId) -> Type {
        self.type_param(id)
            .and_then(|def| def.lower_bound.clone())
            .unwrap_or(Type::Null)
    }
}

/// The canonical invocation of a declaration on its own formal parameters'
/// type variables.
pub fn prototype(env: &dyn TypeEnv, decl: DeclId) -> Option<Type> {
    let d = env.decl(decl)?;
    Some(Type::class(
        decl,
        d.type_params.iter().map(|&p| Type::TypeVar(p)).collect(),
    ))
}

/// The boxed class for a primitive kind.
pub fn boxed_decl(env: &dyn TypeEnv, primitive: PrimitiveType) -> DeclId {
    let wk = env.well_known();
    match primitive {
        PrimitiveType::Boolean => wk.boolean,
        PrimitiveType::Byte => wk.byte,
        PrimitiveType::Short => wk.short,
        PrimitiveType::Int => wk.integer,
        PrimitiveType::Long => wk.long,
        PrimitiveType::Char => wk.character,
        PrimitiveType::Float => wk.float,
        PrimitiveType::Double => wk.double,
    }
}

pub fn boxed_type(env: &dyn TypeEnv, primitive: PrimitiveType) -> Type {
    Type::class(boxed_decl(env, primitive), Vec::new())
}

/// The primitive kind a canonical boxed type unboxes to. Fails on anything
/// that is not one of the eight boxed classes.
pub fn unboxed_type(env: &dyn TypeEnv, ty: &Type) -> Result<PrimitiveType> {
    if let Type::Declared(d) = ty {
        if d.args.is_empty() {
            for p in PrimitiveType::ALL {
                if boxed_decl(env, p) == d.decl {
                    return Ok(p);
                }
            }
        }
    }
    Err(TypeError::InvalidArgument(format!(
        "not a boxed type: {}",
        crate::format::format_type(env, ty)
    )))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
enum ParamSlot {
    Reserved(String),
    Defined(TypeParamDef),
}

/// The arena holding declarations and type parameters.
///
/// Declarations are interned by binary name and may be defined after their id
/// is handed out, so mutually recursive hierarchies can be built. Type
/// parameter definitions are frozen exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeStore {
    decls: Vec<Option<TypeDecl>>,
    decl_ids: HashMap<String, DeclId>,
    params: Vec<ParamSlot>,
    well_known: WellKnown,
}

impl Default for TypeStore {
    fn default() -> Self {
        TypeStore::new()
    }
}

impl TypeEnv for TypeStore {
    fn decl(&self, id: DeclId) -> Option<&TypeDecl> {
        self.decls.get(id.0 as usize)?.as_ref()
    }

    fn decl_id(&self, name: &str) -> Option<DeclId> {
        self.decl_ids.get(name).copied()
    }

    fn type_param(&self, id: TypeParamId) -> Option<&TypeParamDef> {
        match self.params.get(id.0 as usize)? {
            ParamSlot::Defined(def) => Some(def),
            ParamSlot::Reserved(_) => None,
        }
    }

    fn type_param_watermark(&self) -> u32 {
        self.params.len() as u32
    }

    fn well_known(&self) -> &WellKnown {
        &self.well_known
    }
}

impl TypeStore {
    /// A store with the `java.lang` core: `Object`, `String`, `Number`,
    /// `Comparable`, `Enum`, the boxed classes, `Cloneable`, and
    /// `java.io.Serializable`.
    pub fn new() -> TypeStore {
        let mut s = TypeStore {
            decls: Vec::new(),
            decl_ids: HashMap::new(),
            params: Vec::new(),
            well_known: WellKnown {
                object: DeclId(0),
                string: DeclId(0),
                number: DeclId(0),
                comparable: DeclId(0),
                cloneable: DeclId(0),
                serializable: DeclId(0),
                enum_: DeclId(0),
                boolean: DeclId(0),
                byte: DeclId(0),
                short: DeclId(0),
                character: DeclId(0),
                integer: DeclId(0),
                long: DeclId(0),
                float: DeclId(0),
                double: DeclId(0),
            },
        };
        s.bootstrap();
        s
    }

    /// [`TypeStore::new`] plus the small `java.util` and
    /// `java.util.concurrent` slice the conformance tests exercise.
    pub fn with_minimal_jdk() -> TypeStore {
        let mut s = TypeStore::new();
        let wk = s.well_known;
        let object_ty = Type::class(wk.object, Vec::new());

        let t = s.add_type_param("T", vec![object_ty.clone()]);
        let iterable = s.add_decl(TypeDecl {
            name: "java.lang.Iterable".to_string(),
            kind: DeclKind::Interface,
            type_params: vec![t],
            super_class: None,
            interfaces: Vec::new(),
            enclosing: None,
        });

        let e = s.add_type_param("E", vec![object_ty.clone()]);
        let collection = s.add_decl(TypeDecl {
            name: "java.util.Collection".to_string(),
            kind: DeclKind::Interface,
            type_params: vec![e],
            super_class: None,
            interfaces: vec![Type::class(iterable, vec![Type::TypeVar(e)])],
            enclosing: None,
        });

        let e = s.add_type_param("E", vec![object_ty.clone()]);
        let list = s.add_decl(TypeDecl {
            name: "java.util.List".to_string(),
            kind: DeclKind::Interface,
            type_params: vec![e],
            super_class: None,
            interfaces: vec![Type::class(collection, vec![Type::TypeVar(e)])],
            enclosing: None,
        });

        let e = s.add_type_param("E", vec![object_ty.clone()]);
        s.add_decl(TypeDecl {
            name: "java.util.ArrayList".to_string(),
            kind: DeclKind::Class,
            type_params: vec![e],
            super_class: Some(object_ty.clone()),
            interfaces: vec![Type::class(list, vec![Type::TypeVar(e)])],
            enclosing: None,
        });

        let k = s.add_type_param("K", vec![object_ty.clone()]);
        let v = s.add_type_param("V", vec![object_ty.clone()]);
        let map = s.add_decl(TypeDecl {
            name: "java.util.Map".to_string(),
            kind: DeclKind::Interface,
            type_params: vec![k, v],
            super_class: None,
            interfaces: Vec::new(),
            enclosing: None,
        });

        let k = s.add_type_param("K", vec![object_ty.clone()]);
        let v = s.add_type_param("V", vec![object_ty.clone()]);
        s.add_decl(TypeDecl {
            name: "java.util.Map$Entry".to_string(),
            kind: DeclKind::Interface,
            type_params: vec![k, v],
            super_class: None,
            interfaces: Vec::new(),
            enclosing: Some(map),
        });

        let delayed = s.intern_decl("java.util.concurrent.Delayed");
        s.define_decl(
            delayed,
            TypeDecl {
                name: "java.util.concurrent.Delayed".to_string(),
                kind: DeclKind::Interface,
                type_params: Vec::new(),
                super_class: None,
                interfaces: vec![Type::class(
                    wk.comparable,
                    vec![Type::class(delayed, Vec::new())],
                )],
                enclosing: None,
            },
        );

        let v = s.add_type_param("V", vec![object_ty.clone()]);
        let future = s.add_decl(TypeDecl {
            name: "java.util.concurrent.Future".to_string(),
            kind: DeclKind::Interface,
            type_params: vec![v],
            super_class: None,
            interfaces: Vec::new(),
            enclosing: None,
        });

        let v = s.add_type_param("V", vec![object_ty]);
        s.add_decl(TypeDecl {
            name: "java.util.concurrent.ScheduledFuture".to_string(),
            kind: DeclKind::Interface,
            type_params: vec![v],
            super_class: None,
            interfaces: vec![
                Type::class(delayed, Vec::new()),
                Type::class(future, vec![Type::TypeVar(v)]),
            ],
            enclosing: None,
        });

        s
    }

    /// Interns an id for `name`, defining nothing. Idempotent.
    pub fn intern_decl(&mut self, name: &str) -> DeclId {
        if let Some(&id) = self.decl_ids.get(name) {
            return id;
        }
        let id = DeclId(self.decls.len() as u32);
        self.decls.push(None);
        self.decl_ids.insert(name.to_string(), id);
        id
    }

    /// Defines (or redefines) the declaration behind an interned id.
    pub fn define_decl(&mut self, id: DeclId, decl: TypeDecl) {
        if let Some(slot) = self.decls.get_mut(id.0 as usize) {
            *slot = Some(decl);
        }
    }

    /// Interns by `decl.name` and defines in one step.
    pub fn add_decl(&mut self, decl: TypeDecl) -> DeclId {
        let id = self.intern_decl(&decl.name);
        self.define_decl(id, decl);
        id
    }

    pub fn decl_mut(&mut self, id: DeclId) -> Option<&mut TypeDecl> {
        self.decls.get_mut(id.0 as usize)?.as_mut()
    }

    /// Looks a declaration up by binary name, falling back to `java.lang.`
    /// for unqualified names.
    pub fn lookup_decl(&self, name: &str) -> Option<DeclId> {
        if let Some(&id) = self.decl_ids.get(name) {
            return Some(id);
        }
        if !name.contains('.') {
            return self.decl_ids.get(&format!("java.lang.{name}")).copied();
        }
        None
    }

    /// Allocates a type parameter id whose definition is set later with
    /// [`TypeStore::define_type_param`]. Until then its bounds are
    /// unreadable. This is how self-referential bounds are built.
    pub fn reserve_type_param(&mut self, name: &str) -> TypeParamId {
        let id = TypeParamId(self.params.len() as u32);
        self.params.push(ParamSlot::Reserved(name.to_string()));
        id
    }

    /// Freezes a reserved parameter's definition. Exactly once: a second
    /// call, or a call for an id this store never allocated, is an error.
    pub fn define_type_param(&mut self, id: TypeParamId, def: TypeParamDef) -> Result<()> {
        match self.params.get_mut(id.0 as usize) {
            Some(slot @ ParamSlot::Reserved(_)) => {
                *slot = ParamSlot::Defined(def);
                Ok(())
            }
            Some(ParamSlot::Defined(existing)) => Err(TypeError::IllegalState(format!(
                "bounds of type parameter `{}` are already set",
                existing.name
            ))),
            None => Err(TypeError::InvalidArgument(format!(
                "type parameter #{} does not belong to this store",
                id.index()
            ))),
        }
    }

    /// Reserves and freezes a parameter with the given upper bounds.
    pub fn add_type_param(&mut self, name: &str, upper_bounds: Vec<Type>) -> TypeParamId {
        let id = self.reserve_type_param(name);
        let defined = self.define_type_param(id, TypeParamDef::new(name, upper_bounds));
        debug_assert!(defined.is_ok());
        id
    }

    fn bootstrap(&mut self) {
        let object = self.add_decl(TypeDecl {
            name: "java.lang.Object".to_string(),
            kind: DeclKind::Class,
            type_params: Vec::new(),
            super_class: None,
            interfaces: Vec::new(),
            enclosing: None,
        });
        let object_ty = Type::class(object, Vec::new());

        let serializable = self.add_decl(TypeDecl {
            name: "java.io.Serializable".to_string(),
            kind: DeclKind::Interface,
            type_params: Vec::new(),
            super_class: None,
            interfaces: Vec::new(),
            enclosing: None,
        });
        let serializable_ty = Type::class(serializable, Vec::new());

        let cloneable = self.add_decl(TypeDecl {
            name: "java.lang.Cloneable".to_string(),
            kind: DeclKind::Interface,
            type_params: Vec::new(),
            super_class: None,
            interfaces: Vec::new(),
            enclosing: None,
        });

        let t = self.add_type_param("T", vec![object_ty.clone()]);
        let comparable = self.add_decl(TypeDecl {
            name: "java.lang.Comparable".to_string(),
            kind: DeclKind::Interface,
            type_params: vec![t],
            super_class: None,
            interfaces: Vec::new(),
            enclosing: None,
        });

        let string = self.intern_decl("java.lang.String");
        self.define_decl(
            string,
            TypeDecl {
                name: "java.lang.String".to_string(),
                kind: DeclKind::Class,
                type_params: Vec::new(),
                super_class: Some(object_ty.clone()),
                interfaces: vec![
                    Type::class(comparable, vec![Type::class(string, Vec::new())]),
                    serializable_ty.clone(),
                ],
                enclosing: None,
            },
        );

        let number = self.add_decl(TypeDecl {
            name: "java.lang.Number".to_string(),
            kind: DeclKind::Class,
            type_params: Vec::new(),
            super_class: Some(object_ty.clone()),
            interfaces: vec![serializable_ty.clone()],
            enclosing: None,
        });
        let number_ty = Type::class(number, Vec::new());

        let numeric = |s: &mut TypeStore, name: &str| {
            let id = s.intern_decl(name);
            s.define_decl(
                id,
                TypeDecl {
                    name: name.to_string(),
                    kind: DeclKind::Class,
                    type_params: Vec::new(),
                    super_class: Some(number_ty.clone()),
                    interfaces: vec![Type::class(comparable, vec![Type::class(id, Vec::new())])],
                    enclosing: None,
                },
            );
            id
        };
        let byte = numeric(self, "java.lang.Byte");
        let short = numeric(self, "java.lang.Short");
        let integer = numeric(self, "java.lang.Integer");
        let long = numeric(self, "java.lang.Long");
        let float = numeric(self, "java.lang.Float");
        let double = numeric(self, "java.lang.Double");

        let plain = |s: &mut TypeStore, name: &str| {
            let id = s.intern_decl(name);
            s.define_decl(
                id,
                TypeDecl {
                    name: name.to_string(),
                    kind: DeclKind::Class,
                    type_params: Vec::new(),
                    super_class: Some(object_ty.clone()),
                    interfaces: vec![
                        Type::class(comparable, vec![Type::class(id, Vec::new())]),
                        serializable_ty.clone(),
                    ],
                    enclosing: None,
                },
            );
            id
        };
        let boolean = plain(self, "java.lang.Boolean");
        let character = plain(self, "java.lang.Character");

        let enum_ = self.intern_decl("java.lang.Enum");
        let e = self.reserve_type_param("E");
        let define_e = self.define_type_param(
            e,
            TypeParamDef::new("E", vec![Type::class(enum_, vec![Type::TypeVar(e)])]),
        );
        debug_assert!(define_e.is_ok());
        self.define_decl(
            enum_,
            TypeDecl {
                name: "java.lang.Enum".to_string(),
                kind: DeclKind::Class,
                type_params: vec![e],
                super_class: Some(object_ty),
                interfaces: vec![
                    Type::class(comparable, vec![Type::TypeVar(e)]),
                    serializable_ty,
                ],
                enclosing: None,
            },
        );

        self.well_known = WellKnown {
            object,
            string,
            number,
            comparable,
            cloneable,
            serializable,
            enum_,
            boolean,
            byte,
            short,
            character,
            integer,
            long,
            float,
            double,
        };
    }
}

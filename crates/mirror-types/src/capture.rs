use std::collections::HashMap;

use crate::store::{
    CaptureOrigin, DeclId, TypeDecl, TypeEnv, TypeParamDef, TypeParamId, WellKnown,
};
use crate::subst::{substitute, SubstMap};
use crate::ty::{DeclaredType, Type, WildcardBound};

/// A type environment layered over a base one, holding the capture variables
/// allocated by [`TyContext::capture_conversion`].
///
/// Capture variables are fresh: their ids start at the base environment's
/// watermark, so they never collide with (and never compare equal to) the
/// parameters they instantiate. Their bounds are written exactly once, here,
/// already substituted so that mutually recursive references resolve to the
/// sibling capture variables.
pub struct TyContext<'e> {
    base: &'e dyn TypeEnv,
    next_param: u32,
    next_capture: u32,
    locals: HashMap<TypeParamId, TypeParamDef>,
}

impl<'e> TyContext<'e> {
    pub fn new(base: &'e dyn TypeEnv) -> TyContext<'e> {
        TyContext {
            next_param: base.type_param_watermark(),
            next_capture: 1,
            base,
            locals: HashMap::new(),
        }
    }

    fn alloc(&mut self) -> TypeParamId {
        let id = TypeParamId::from_index(self.next_param);
        self.next_param += 1;
        id
    }

    /// Capture conversion (JLS §5.1.10).
    ///
    /// Every wildcard argument is replaced by a fresh variable: an unbounded
    /// wildcard captures to the formal parameter's bound; `? extends B` to
    /// the glb of `B` and the parameter bound (one level of intersection
    /// flattened, nothing pruned); `? super B` keeps the parameter bound
    /// above and takes `B` below. Bounds are computed under the full
    /// argument substitution, so a parameter bound that mentions a sibling
    /// parameter resolves to that sibling's capture variable.
    ///
    /// Anything that is not a parameterized declared type with at least one
    /// wildcard argument converts to itself.
    pub fn capture_conversion(&mut self, ty: &Type) -> Type {
        let Type::Declared(d) = ty else {
            return ty.clone();
        };
        if d.args.is_empty() || !d.args.iter().any(Type::is_wildcard) {
            return ty.clone();
        }
        let Some(decl) = self.base.decl(d.decl) else {
            return ty.clone();
        };
        let params = decl.type_params.clone();
        if params.len() != d.args.len() {
            return ty.clone();
        }

        let mut map = SubstMap::new();
        let mut pending: Vec<(TypeParamId, TypeParamId, WildcardBound)> = Vec::new();
        let mut intermediate_args = Vec::with_capacity(d.args.len());
        for (&param, arg) in params.iter().zip(&d.args) {
            match arg {
                Type::Wildcard(w) => {
                    let fresh = self.alloc();
                    map.insert(param, Type::TypeVar(fresh));
                    pending.push((fresh, param, w.clone()));
                    // The prototypical variable stands in until the final
                    // substitution pass replaces it.
                    intermediate_args.push(Type::TypeVar(param));
                }
                other => {
                    map.insert(param, other.clone());
                    intermediate_args.push(other.clone());
                }
            }
        }

        for (fresh, param, wildcard) in pending {
            let param_bounds = self
                .type_param(param)
                .map(|def| def.upper_bounds.clone())
                .unwrap_or_default();
            let (upper_bounds, lower_bound) = match &wildcard {
                WildcardBound::Unbounded => (param_bounds, None),
                WildcardBound::Extends(b) => (glb((**b).clone(), &param_bounds), None),
                WildcardBound::Super(b) => (param_bounds, Some((**b).clone())),
            };
            let name = format!("CAP#{}", self.next_capture);
            self.next_capture += 1;
            let def = TypeParamDef {
                name,
                upper_bounds: upper_bounds.iter().map(|b| substitute(b, &map)).collect(),
                lower_bound: lower_bound.map(|b| substitute(&b, &map)),
                capture: Some(CaptureOrigin { param, wildcard }),
            };
            self.locals.insert(fresh, def);
        }

        let intermediate = Type::Declared(DeclaredType {
            enclosing: d.enclosing.clone(),
            decl: d.decl,
            args: intermediate_args,
        });
        substitute(&intermediate, &map)
    }
}

/// The greatest lower bound used by capture conversion: the wildcard bound
/// first, then the formal parameter's bounds with one level of intersection
/// flattened.
fn glb(first: Type, param_bounds: &[Type]) -> Vec<Type> {
    let mut out = vec![first];
    for bound in param_bounds {
        match bound {
            Type::Intersection(bounds) => out.extend(bounds.iter().cloned()),
            other => out.push(other.clone()),
        }
    }
    out
}

impl TypeEnv for TyContext<'_> {
    fn decl(&self, id: DeclId) -> Option<&TypeDecl> {
        self.base.decl(id)
    }

    fn decl_id(&self, name: &str) -> Option<DeclId> {
        self.base.decl_id(name)
    }

    fn type_param(&self, id: TypeParamId) -> Option<&TypeParamDef> {
        self.locals.get(&id).or_else(|| self.base.type_param(id))
    }

    fn type_param_watermark(&self) -> u32 {
        self.next_param
    }

    fn well_known(&self) -> &WellKnown {
        self.base.well_known()
    }
}

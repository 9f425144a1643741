use crate::store::TypeEnv;
use crate::ty::{Type, WildcardBound};

/// The canonical textual form of a type.
///
/// Declared types print their qualified name, or `Enclosing.Simple` when an
/// enclosing instantiation is present; capture variables print the wildcard
/// they captured.
pub fn format_type(env: &dyn TypeEnv, ty: &Type) -> String {
    match ty {
        Type::Primitive(p) => p.name().to_string(),
        Type::Void => "void".to_string(),
        Type::None => "none".to_string(),
        Type::Null => "null".to_string(),
        Type::Array(component) => format!("{}[]", format_type(env, component)),
        Type::Declared(d) => {
            let mut out = match env.decl(d.decl) {
                Some(decl) => match &*d.enclosing {
                    Type::Declared(_) => {
                        format!("{}.{}", format_type(env, &d.enclosing), decl.simple_name())
                    }
                    _ => decl.qualified_name(),
                },
                None => format!("<decl#{}>", d.decl.index()),
            };
            if !d.args.is_empty() {
                let args: Vec<String> = d.args.iter().map(|a| format_type(env, a)).collect();
                out.push('<');
                out.push_str(&args.join(", "));
                out.push('>');
            }
            out
        }
        Type::TypeVar(id) => match env.type_param(*id) {
            Some(def) => match &def.capture {
                Some(origin) => format!(
                    "capture<{}>",
                    format_type(env, &Type::Wildcard(origin.wildcard.clone()))
                ),
                None => def.name.clone(),
            },
            None => format!("<param#{}>", id.index()),
        },
        Type::Wildcard(w) => match w {
            WildcardBound::Unbounded => "?".to_string(),
            WildcardBound::Extends(b) => format!("? extends {}", format_type(env, b)),
            WildcardBound::Super(b) => format!("? super {}", format_type(env, b)),
        },
        Type::Intersection(bounds) => {
            let parts: Vec<String> = bounds.iter().map(|b| format_type(env, b)).collect();
            parts.join(" & ")
        }
    }
}

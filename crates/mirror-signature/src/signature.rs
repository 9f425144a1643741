use crate::error::{Error, Result};

/// A primitive type abbreviation (JVMS `BaseType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseType {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
}

/// A formal type parameter with its class bound and interface bounds.
///
/// The class bound may be absent (`<T::Ljava/io/Serializable;>` declares `T`
/// with interface bounds only); the parser does not insert an implicit
/// `Object`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormalTypeParameter {
    pub name: String,
    pub class_bound: Option<TypeSignature>,
    pub interface_bounds: Vec<TypeSignature>,
}

impl FormalTypeParameter {
    /// The declared bounds in order: class bound first, then interface bounds.
    pub fn bounds(&self) -> impl Iterator<Item = &TypeSignature> {
        self.class_bound.iter().chain(self.interface_bounds.iter())
    }
}

/// A class declaration's generic signature: formal type parameters, the
/// superclass, and the superinterfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSignature {
    pub type_parameters: Vec<FormalTypeParameter>,
    pub super_class: ClassTypeSignature,
    pub interfaces: Vec<ClassTypeSignature>,
}

/// A (possibly nested, possibly parameterized) reference to a class type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassTypeSignature {
    pub package: Vec<String>,
    pub segments: Vec<NestedSegment>,
}

/// One simple-name segment of a class type reference, with the type
/// arguments applied at that nesting level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedSegment {
    pub name: String,
    pub type_arguments: Vec<TypeArgument>,
}

impl ClassTypeSignature {
    /// The dotted binary name, with `$` separating nested segments:
    /// `java.util.Map$Entry`.
    pub fn binary_name(&self) -> String {
        let mut out = self.package.join(".");
        for (idx, seg) in self.segments.iter().enumerate() {
            if idx == 0 {
                if !out.is_empty() {
                    out.push('.');
                }
            } else {
                out.push('$');
            }
            out.push_str(&seg.name);
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeArgument {
    /// `*` — an unbounded wildcard.
    Wildcard,
    /// `+` — an upper-bounded wildcard.
    Extends(Box<TypeSignature>),
    /// `-` — a lower-bounded wildcard.
    Super(Box<TypeSignature>),
    Exact(Box<TypeSignature>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSignature {
    Base(BaseType),
    Array(Box<TypeSignature>),
    Class(ClassTypeSignature),
    Var(String),
}

/// Parses a class signature such as
/// `<T:Ljava/lang/Object;>Ljava/lang/Object;Ljava/lang/Comparable<TT;>;`.
pub fn parse_class_signature(input: &str) -> Result<ClassSignature> {
    let mut cur = Cursor::new(input);
    let type_parameters = cur.formal_type_parameters()?;
    let super_class = cur.class_type_signature()?;
    let mut interfaces = Vec::new();
    while !cur.at_end() {
        interfaces.push(cur.class_type_signature()?);
    }
    Ok(ClassSignature {
        type_parameters,
        super_class,
        interfaces,
    })
}

/// Parses a field type signature: a class type, a type variable, or an array.
pub fn parse_field_signature(input: &str) -> Result<TypeSignature> {
    let mut cur = Cursor::new(input);
    let ty = cur.field_type_signature()?;
    cur.expect_end()?;
    Ok(ty)
}

struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Cursor { input, pos: 0 }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.input.as_bytes().get(self.pos).map(|&b| b as char)
    }

    fn bump(&mut self) -> Result<char> {
        let ch = self.peek().ok_or(Error::UnexpectedEof)?;
        self.pos += 1;
        Ok(ch)
    }

    fn eat(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, ch: char) -> Result<()> {
        let at = self.pos;
        match self.bump()? {
            found if found == ch => Ok(()),
            found => Err(Error::Unexpected { at, found }),
        }
    }

    fn expect_end(&self) -> Result<()> {
        if self.at_end() {
            Ok(())
        } else {
            Err(Error::TrailingInput { at: self.pos })
        }
    }

    fn formal_type_parameters(&mut self) -> Result<Vec<FormalTypeParameter>> {
        if !self.eat('<') {
            return Ok(Vec::new());
        }
        let mut params = Vec::new();
        while !self.eat('>') {
            if self.at_end() {
                return Err(Error::UnexpectedEof);
            }
            params.push(self.formal_type_parameter()?);
        }
        Ok(params)
    }

    fn formal_type_parameter(&mut self) -> Result<FormalTypeParameter> {
        let name = self.identifier()?;
        self.expect(':')?;
        let class_bound = match self.peek() {
            Some(':') => None,
            _ => Some(self.field_type_signature()?),
        };
        let mut interface_bounds = Vec::new();
        while self.eat(':') {
            interface_bounds.push(self.field_type_signature()?);
        }
        Ok(FormalTypeParameter {
            name,
            class_bound,
            interface_bounds,
        })
    }

    fn type_signature(&mut self) -> Result<TypeSignature> {
        let at = self.pos;
        match self.peek() {
            Some('Z') => self.base(BaseType::Boolean),
            Some('B') => self.base(BaseType::Byte),
            Some('S') => self.base(BaseType::Short),
            Some('I') => self.base(BaseType::Int),
            Some('J') => self.base(BaseType::Long),
            Some('C') => self.base(BaseType::Char),
            Some('F') => self.base(BaseType::Float),
            Some('D') => self.base(BaseType::Double),
            Some('L') | Some('T') | Some('[') => self.field_type_signature(),
            Some(found) => Err(Error::Unexpected { at, found }),
            None => Err(Error::UnexpectedEof),
        }
    }

    fn base(&mut self, base: BaseType) -> Result<TypeSignature> {
        self.pos += 1;
        Ok(TypeSignature::Base(base))
    }

    fn field_type_signature(&mut self) -> Result<TypeSignature> {
        let at = self.pos;
        match self.peek() {
            Some('L') => Ok(TypeSignature::Class(self.class_type_signature()?)),
            Some('T') => {
                self.pos += 1;
                let name = self.identifier()?;
                self.expect(';')?;
                Ok(TypeSignature::Var(name))
            }
            Some('[') => {
                self.pos += 1;
                Ok(TypeSignature::Array(Box::new(self.type_signature()?)))
            }
            Some(found) => Err(Error::Unexpected { at, found }),
            None => Err(Error::UnexpectedEof),
        }
    }

    fn class_type_signature(&mut self) -> Result<ClassTypeSignature> {
        self.expect('L')?;

        let mut package = Vec::new();
        let mut name = self.identifier()?;
        while self.eat('/') {
            package.push(name);
            name = self.identifier()?;
        }

        let mut segments = vec![NestedSegment {
            name,
            type_arguments: self.type_arguments()?,
        }];
        while self.eat('.') {
            let name = self.identifier()?;
            segments.push(NestedSegment {
                name,
                type_arguments: self.type_arguments()?,
            });
        }

        self.expect(';')?;
        Ok(ClassTypeSignature { package, segments })
    }

    fn type_arguments(&mut self) -> Result<Vec<TypeArgument>> {
        if !self.eat('<') {
            return Ok(Vec::new());
        }
        let mut args = Vec::new();
        while !self.eat('>') {
            if self.at_end() {
                return Err(Error::UnexpectedEof);
            }
            args.push(self.type_argument()?);
        }
        Ok(args)
    }

    fn type_argument(&mut self) -> Result<TypeArgument> {
        if self.eat('*') {
            return Ok(TypeArgument::Wildcard);
        }
        if self.eat('+') {
            return Ok(TypeArgument::Extends(Box::new(self.field_type_signature()?)));
        }
        if self.eat('-') {
            return Ok(TypeArgument::Super(Box::new(self.field_type_signature()?)));
        }
        Ok(TypeArgument::Exact(Box::new(self.field_type_signature()?)))
    }

    fn identifier(&mut self) -> Result<String> {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if matches!(ch, '/' | ';' | '<' | '>' | '.' | ':' | '[' | '*' | '+' | '-') {
                break;
            }
            self.pos += 1;
        }
        if start == self.pos {
            return Err(Error::EmptyIdentifier { at: start });
        }
        Ok(self.input[start..self.pos].to_string())
    }
}

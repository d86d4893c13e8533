use camino::Utf8PathBuf;

use crate::expr::{ConstValue, TypeExpr};
use crate::kind::ElementKind;
use crate::refkey::Refkey;

/// Kind-specific payload of a declaration.
///
/// A closed set of variants instead of an open metadata bag, so the deferred
/// validation layer pattern-matches instead of probing string keys.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclMeta {
    Plain,
    Object {
        implements: Vec<Refkey>,
    },
    Interface {
        implements: Vec<Refkey>,
    },
    InputObject {
        /// Members of a one-of input are mutually exclusive, which forces
        /// them to be nullable and default-free.
        one_of: bool,
    },
    Union {
        variants: Vec<Refkey>,
    },
    Directive {
        locations: Vec<String>,
    },
    Member {
        ty: TypeExpr,
        nullable: bool,
        default: Option<ConstValue>,
    },
    Function {
        ret: TypeExpr,
    },
    Const {
        ty: TypeExpr,
        value: ConstValue,
    },
}

/// One named, emittable declaration.
///
/// `name` is the raw, author-supplied spelling; the name policy decides the
/// final spelling during the declare pass. Members (fields, enum values,
/// service functions, arguments) nest as child declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct Decl {
    pub name: String,
    pub kind: ElementKind,
    pub refkey: Option<Refkey>,
    pub doc: Option<String>,
    pub meta: DeclMeta,
    pub members: Vec<Decl>,
}

impl Decl {
    pub fn new(name: impl Into<String>, kind: ElementKind, meta: DeclMeta) -> Self {
        Self {
            name: name.into(),
            kind,
            refkey: None,
            doc: None,
            meta,
            members: Vec::new(),
        }
    }

    pub fn object(name: impl Into<String>) -> Self {
        Self::new(
            name,
            ElementKind::Object,
            DeclMeta::Object {
                implements: Vec::new(),
            },
        )
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(
            name,
            ElementKind::Interface,
            DeclMeta::Interface {
                implements: Vec::new(),
            },
        )
    }

    pub fn input_object(name: impl Into<String>) -> Self {
        Self::new(
            name,
            ElementKind::InputObject,
            DeclMeta::InputObject { one_of: false },
        )
    }

    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::new(name, ElementKind::Enum, DeclMeta::Plain)
    }

    pub fn enum_value(name: impl Into<String>) -> Self {
        Self::new(name, ElementKind::EnumValue, DeclMeta::Plain)
    }

    pub fn union(name: impl Into<String>) -> Self {
        Self::new(
            name,
            ElementKind::Union,
            DeclMeta::Union {
                variants: Vec::new(),
            },
        )
    }

    pub fn scalar(name: impl Into<String>) -> Self {
        Self::new(name, ElementKind::Scalar, DeclMeta::Plain)
    }

    pub fn directive(name: impl Into<String>, locations: Vec<String>) -> Self {
        Self::new(name, ElementKind::Directive, DeclMeta::Directive { locations })
    }

    pub fn service(name: impl Into<String>) -> Self {
        Self::new(name, ElementKind::Service, DeclMeta::Plain)
    }

    pub fn field(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self::new(
            name,
            ElementKind::Field,
            DeclMeta::Member {
                ty,
                nullable: false,
                default: None,
            },
        )
    }

    pub fn input_field(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self::new(
            name,
            ElementKind::InputField,
            DeclMeta::Member {
                ty,
                nullable: false,
                default: None,
            },
        )
    }

    pub fn argument(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self::new(
            name,
            ElementKind::Argument,
            DeclMeta::Member {
                ty,
                nullable: false,
                default: None,
            },
        )
    }

    pub fn function(name: impl Into<String>, ret: TypeExpr) -> Self {
        Self::new(name, ElementKind::Function, DeclMeta::Function { ret })
    }

    pub fn constant(name: impl Into<String>, ty: TypeExpr, value: ConstValue) -> Self {
        Self::new(name, ElementKind::Const, DeclMeta::Const { ty, value })
    }

    /// Makes this declaration referenceable through the given refkey.
    pub fn keyed(mut self, refkey: Refkey) -> Self {
        self.refkey = Some(refkey);
        self
    }

    pub fn docs(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn member(mut self, member: Decl) -> Self {
        self.members.push(member);
        self
    }

    pub fn members(mut self, members: impl IntoIterator<Item = Decl>) -> Self {
        self.members.extend(members);
        self
    }

    /// Adds an `implements` edge. Only meaningful on objects and interfaces.
    pub fn implements(mut self, target: Refkey) -> Self {
        match &mut self.meta {
            DeclMeta::Object { implements } | DeclMeta::Interface { implements } => {
                implements.push(target);
            }
            _ => {}
        }
        self
    }

    /// Adds a variant to a union declaration.
    pub fn variant(mut self, target: Refkey) -> Self {
        if let DeclMeta::Union { variants } = &mut self.meta {
            variants.push(target);
        }
        self
    }

    pub fn one_of(mut self) -> Self {
        if let DeclMeta::InputObject { one_of } = &mut self.meta {
            *one_of = true;
        }
        self
    }

    pub fn nullable(mut self) -> Self {
        if let DeclMeta::Member { nullable, .. } = &mut self.meta {
            *nullable = true;
        }
        self
    }

    pub fn default_value(mut self, value: ConstValue) -> Self {
        if let DeclMeta::Member { default, .. } = &mut self.meta {
            *default = Some(value);
        }
        self
    }
}

/// One output file: the SourceFile boundary of the engine.
///
/// Every file roots exactly one module scope; the path is the deduplication
/// key of the import synthesizer.
#[derive(Debug, Clone, PartialEq)]
pub struct FileDecl {
    pub path: Utf8PathBuf,
    pub decls: Vec<Decl>,
}

impl FileDecl {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: path.into(),
            decls: Vec::new(),
        }
    }

    pub fn decl(mut self, decl: Decl) -> Self {
        self.decls.push(decl);
        self
    }

    pub fn decls(mut self, decls: impl IntoIterator<Item = Decl>) -> Self {
        self.decls.extend(decls);
        self
    }
}

/// A whole generation job: every file emitted in one pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Package {
    pub files: Vec<FileDecl>,
}

impl Package {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, file: FileDecl) -> Self {
        self.files.push(file);
        self
    }
}

//! Registry type token mapping.
//!
//! Registry types are C spellings such as `GLuint` or `const GLfloat *`. The
//! mapper turns them into a target-neutral [`MappedType`]; backends decide how
//! each one is spelled in the output language.

use glbind_registry::{TypeRef, Version};

/// Primitive scalar kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scalar {
    /// Boolean (one byte in the native ABI).
    Bool,
    /// Signed 8-bit integer.
    Int8,
    /// Unsigned 8-bit integer.
    UInt8,
    /// Signed 16-bit integer.
    Int16,
    /// Unsigned 16-bit integer.
    UInt16,
    /// Signed 32-bit integer.
    Int32,
    /// Unsigned 32-bit integer.
    UInt32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 64-bit integer.
    UInt64,
    /// Signed pointer-sized integer.
    IntPtr,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
    /// Narrow character.
    Char8,
    /// No value (return types) or opaque pointee.
    Void,
}

/// Pointee mutability of a pointer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutability {
    /// `const T *`
    Const,
    /// `T *`
    Mut,
}

/// Target-neutral result of mapping a registry type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappedType<'a> {
    /// Plain scalar value.
    Value(Scalar),
    /// Pointer, `depth` levels deep, to a scalar.
    Pointer {
        /// Innermost pointee.
        pointee: Scalar,
        /// Mutability of the innermost pointee.
        mutability: Mutability,
        /// Indirection depth, at least 1.
        depth: u8,
    },
    /// Named enum type generated from a group.
    Enum(&'a str),
    /// Unknown token passed through unchanged.
    Verbatim(&'a str),
}

impl MappedType<'_> {
    /// Generic unsigned 32-bit integer, used for unresolved enum groups.
    pub const UINT32: MappedType<'static> = MappedType::Value(Scalar::UInt32);

    /// Opaque pointer, used for handles and unknown pointer-shaped tokens.
    pub const OPAQUE: MappedType<'static> = MappedType::Pointer {
        pointee: Scalar::Void,
        mutability: Mutability::Const,
        depth: 1,
    };

    /// Returns true for the unit/void type.
    #[must_use]
    pub const fn is_void(&self) -> bool {
        matches!(self, MappedType::Value(Scalar::Void))
    }
}

const fn ptr(pointee: Scalar, mutability: Mutability) -> MappedType<'static> {
    MappedType::Pointer {
        pointee,
        mutability,
        depth: 1,
    }
}

const fn ptr2(pointee: Scalar, mutability: Mutability) -> MappedType<'static> {
    MappedType::Pointer {
        pointee,
        mutability,
        depth: 2,
    }
}

/// Looks a token up in the fixed scalar/pointer table.
fn lookup(token: &str) -> Option<MappedType<'static>> {
    use Mutability::{Const, Mut};
    use Scalar::*;

    let mapped = match token {
        "GLboolean" => MappedType::Value(Bool),

        "GLenum" | "GLuint" | "GLbitfield" | "GLhandleARB" => MappedType::Value(UInt32),

        "GLint" | "GLsizei" | "GLfixed" | "GLclampx" => MappedType::Value(Int32),

        "GLintptr" | "GLsizeiptr" | "GLintptrARB" | "GLsizeiptrARB" => MappedType::Value(IntPtr),

        "GLuint *" | "GLenum *" => ptr(UInt32, Mut),
        "const GLuint *" | "const GLenum *" => ptr(UInt32, Const),

        "GLdouble *" => ptr(Double, Mut),
        "const GLdouble *" => ptr(Double, Const),

        "GLfloat *" => ptr(Float, Mut),
        "const GLfloat *" => ptr(Float, Const),

        "GLint *" | "GLsizei *" => ptr(Int32, Mut),
        "const GLint *" | "const GLsizei *" => ptr(Int32, Const),

        "GLsizeiptr *" | "GLintptr *" => ptr(IntPtr, Mut),
        "const GLsizeiptr *" | "const GLintptr *" => ptr(IntPtr, Const),

        "GLushort *" | "GLshort *" => ptr(Int16, Mut),
        "const GLushort *" | "const GLshort *" => ptr(Int16, Const),

        "GLboolean *" => ptr(Bool, Mut),
        "const GLboolean *" => ptr(Bool, Const),

        "GLchar *" | "GLcharARB *" => ptr(Char8, Mut),
        "const GLchar *" | "const GLcharARB *" => ptr(Char8, Const),

        "GLint64 *" | "GLint64EXT *" => ptr(Int64, Mut),
        "const GLint64 *" | "const GLint64EXT *" => ptr(Int64, Const),

        "GLuint64 *" | "GLuint64EXT *" => ptr(UInt64, Mut),
        "const GLuint64 *" | "const GLuint64EXT *" => ptr(UInt64, Const),

        "GLubyte *" | "GLbyte *" => ptr(UInt8, Mut),
        "const GLubyte *" | "const GLbyte *" => ptr(UInt8, Const),

        "void *" => ptr(Void, Mut),
        "const void *" => ptr(Void, Const),

        "void **" => ptr2(Void, Mut),
        "const void **" => ptr2(Void, Const),

        "GLfloat" | "GLclampf" => MappedType::Value(Float),
        "GLdouble" | "GLclampd" => MappedType::Value(Double),

        "GLubyte" => MappedType::Value(UInt8),
        "GLbyte" => MappedType::Value(Int8),
        "GLchar" | "GLcharARB" => MappedType::Value(Char8),

        "GLushort" | "GLhalfNV" => MappedType::Value(UInt16),
        "GLshort" => MappedType::Value(Int16),

        "GLint64" | "GLint64EXT" => MappedType::Value(Int64),
        "GLuint64" | "GLuint64EXT" => MappedType::Value(UInt64),

        "void" | "GLvoid" => MappedType::Value(Void),

        // Handles and callbacks are opaque to the bindings.
        "GLsync"
        | "GLDEBUGPROC"
        | "GLDEBUGPROCARB"
        | "GLDEBUGPROCKHR"
        | "GLDEBUGPROCAMD"
        | "GLeglImageOES"
        | "GLeglClientBufferEXT"
        | "GLvdpauSurfaceNV"
        | "GLVULKANPROCNV" => MappedType::OPAQUE,

        _ => return None,
    };

    Some(mapped)
}

/// Maps registry types against one selected version.
#[derive(Debug, Clone, Copy)]
pub struct TypeMapper<'v> {
    version: &'v Version,
}

impl<'v> TypeMapper<'v> {
    /// Creates a mapper resolving enum groups against `version`.
    #[must_use]
    pub fn new(version: &'v Version) -> Self {
        Self { version }
    }

    /// Maps a type reference.
    ///
    /// Enumeration references never consult the scalar table: they resolve to
    /// their group's enum type when the group exists in the version, and to the
    /// generic unsigned 32-bit type otherwise.
    #[must_use]
    pub fn map<'t>(&self, type_ref: &'t TypeRef) -> MappedType<'t> {
        if type_ref.is_enum() {
            return match type_ref.group.as_deref() {
                Some(group) if self.version.has_group(group) => MappedType::Enum(group),
                Some(group) => {
                    tracing::trace!("enum group {} not defined in {}", group, self.version.name);
                    MappedType::UINT32
                }
                None => MappedType::UINT32,
            };
        }
        Self::map_token(&type_ref.ty)
    }

    /// Maps a bare type token.
    ///
    /// Known tokens come from the fixed table; unknown tokens containing `*`
    /// become an opaque pointer; anything else is passed through unchanged.
    #[must_use]
    pub fn map_token(token: &str) -> MappedType<'_> {
        if let Some(mapped) = lookup(token) {
            return mapped;
        }
        if token.contains('*') {
            tracing::debug!("unknown pointer type '{}' mapped to opaque pointer", token);
            return MappedType::OPAQUE;
        }
        tracing::debug!("unknown type '{}' passed through", token);
        MappedType::Verbatim(token)
    }
}

//! In-memory type model.
//!
//! A [`TypeModel`] is a self-contained [`MetadataProvider`] built from
//! registered type specs. Hosts without a live type system can describe one
//! up front; tests use it as their fixture substrate.

use rustc_hash::FxHashMap;

use crate::flags::MemberFlags;
use crate::ids::{MemberId, TypeId};
use crate::provider::MetadataProvider;
use crate::raw::{MetadataTag, RawConstructor, RawField, RawMethod, RawType};

/// An immutable, queryable model of a type hierarchy.
#[derive(Debug, Default)]
pub struct TypeModel {
    types: FxHashMap<TypeId, RawType>,
    fields: FxHashMap<TypeId, Vec<RawField>>,
    methods: FxHashMap<TypeId, Vec<RawMethod>>,
    constructors: FxHashMap<TypeId, Vec<RawConstructor>>,
    nested: FxHashMap<TypeId, Vec<TypeId>>,
    parents: FxHashMap<TypeId, TypeId>,
}

impl TypeModel {
    /// Create a new model builder.
    pub fn builder() -> ModelBuilder {
        ModelBuilder {
            model: TypeModel::default(),
            next_member: 0,
        }
    }

    /// Number of registered types.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }
}

impl MetadataProvider for TypeModel {
    fn describe_type(&self, ty: TypeId) -> Option<RawType> {
        self.types.get(&ty).cloned()
    }

    fn declared_fields(&self, ty: TypeId) -> Vec<RawField> {
        self.fields.get(&ty).cloned().unwrap_or_default()
    }

    fn declared_methods(&self, ty: TypeId) -> Vec<RawMethod> {
        self.methods.get(&ty).cloned().unwrap_or_default()
    }

    fn declared_constructors(&self, ty: TypeId) -> Vec<RawConstructor> {
        self.constructors.get(&ty).cloned().unwrap_or_default()
    }

    fn declared_nested_types(&self, ty: TypeId) -> Vec<TypeId> {
        self.nested.get(&ty).cloned().unwrap_or_default()
    }

    fn ancestor_of(&self, ty: TypeId) -> Option<TypeId> {
        self.parents.get(&ty).copied()
    }

    fn is_assignable(&self, target: TypeId, candidate: TypeId) -> bool {
        if target == candidate {
            return true;
        }
        let Some(raw) = self.types.get(&candidate) else {
            return false;
        };
        // Bare primitives are only assignable to themselves.
        if raw.is_primitive {
            return false;
        }
        let mut current = candidate;
        while let Some(&parent) = self.parents.get(&current) {
            if parent == target {
                return true;
            }
            current = parent;
        }
        false
    }
}

/// Builder registering type specs into a [`TypeModel`].
///
/// Member ids are assigned sequentially at registration time.
pub struct ModelBuilder {
    model: TypeModel,
    next_member: u64,
}

impl ModelBuilder {
    /// Register a type spec.
    pub fn register(mut self, spec: TypeSpec) -> Self {
        let ty = spec.raw.id;
        let type_name = spec.raw.name.clone();

        if let Some(parent) = spec.extends {
            self.model.parents.insert(ty, parent);
        }

        let fields = spec
            .fields
            .into_iter()
            .map(|f| RawField {
                id: self.alloc(),
                declaring_type: ty,
                name: f.name,
                flags: f.flags,
                synthetic: f.synthetic,
                tags: f.tags,
                value_type: f.value_type,
            })
            .collect();

        let methods = spec
            .methods
            .into_iter()
            .map(|m| RawMethod {
                id: self.alloc(),
                declaring_type: ty,
                name: m.name,
                flags: m.flags,
                synthetic: m.synthetic,
                tags: m.tags,
                params: m.params,
                throws: m.throws,
                result: m.result,
            })
            .collect();

        let constructors = spec
            .constructors
            .into_iter()
            .map(|c| RawConstructor {
                id: self.alloc(),
                declaring_type: ty,
                name: type_name.clone(),
                flags: c.flags,
                synthetic: c.synthetic,
                tags: c.tags,
                params: c.params,
                throws: c.throws,
            })
            .collect();

        self.model.fields.insert(ty, fields);
        self.model.methods.insert(ty, methods);
        self.model.constructors.insert(ty, constructors);
        self.model.nested.insert(ty, spec.nested);
        self.model.types.insert(ty, spec.raw);
        self
    }

    /// Freeze the builder into a model.
    pub fn build(self) -> TypeModel {
        self.model
    }

    fn alloc(&mut self) -> MemberId {
        let id = MemberId::new(self.next_member);
        self.next_member += 1;
        id
    }
}

/// Specification of a single type.
#[derive(Debug)]
pub struct TypeSpec {
    raw: RawType,
    extends: Option<TypeId>,
    nested: Vec<TypeId>,
    fields: Vec<FieldSpec>,
    methods: Vec<MethodSpec>,
    constructors: Vec<ConstructorSpec>,
}

impl TypeSpec {
    /// Create a spec for a type with the given identity and name.
    pub fn new(id: TypeId, name: impl Into<String>) -> Self {
        Self {
            raw: RawType {
                id,
                name: name.into(),
                flags: MemberFlags::PUBLIC,
                synthetic: false,
                tags: Vec::new(),
                declaring_type: None,
                is_array: false,
                is_enum: false,
                is_primitive: false,
                component: None,
                boxed: None,
            },
            extends: None,
            nested: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
        }
    }

    /// Set the parent type.
    pub fn extends(mut self, parent: TypeId) -> Self {
        self.extends = Some(parent);
        self
    }

    /// Replace the behavioral flags.
    pub fn flags(mut self, flags: MemberFlags) -> Self {
        self.raw.flags = flags;
        self
    }

    /// Mark the type as synthetic.
    pub fn synthetic(mut self) -> Self {
        self.raw.synthetic = true;
        self
    }

    /// Attach a metadata tag.
    pub fn tag(mut self, tag: MetadataTag) -> Self {
        self.raw.tags.push(tag);
        self
    }

    /// Mark the type as declared inside another type.
    pub fn declared_in(mut self, outer: TypeId) -> Self {
        self.raw.declaring_type = Some(outer);
        self
    }

    /// Mark the type as a primitive with the given boxed counterpart.
    pub fn primitive(mut self, boxed: TypeId) -> Self {
        self.raw.is_primitive = true;
        self.raw.boxed = Some(boxed);
        self
    }

    /// Mark the type as an array of the given component type.
    pub fn array_of(mut self, component: TypeId) -> Self {
        self.raw.is_array = true;
        self.raw.component = Some(component);
        self
    }

    /// Mark the type as an enum.
    pub fn enumeration(mut self) -> Self {
        self.raw.is_enum = true;
        self
    }

    /// Declare a nested type.
    pub fn nested(mut self, ty: TypeId) -> Self {
        self.nested.push(ty);
        self
    }

    /// Declare a field.
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Declare a method.
    pub fn method(mut self, method: MethodSpec) -> Self {
        self.methods.push(method);
        self
    }

    /// Declare a constructor.
    pub fn constructor(mut self, constructor: ConstructorSpec) -> Self {
        self.constructors.push(constructor);
        self
    }
}

/// Specification of a field.
#[derive(Debug)]
pub struct FieldSpec {
    name: String,
    value_type: TypeId,
    flags: MemberFlags,
    synthetic: bool,
    tags: Vec<MetadataTag>,
}

impl FieldSpec {
    /// Create a public field spec.
    pub fn new(name: impl Into<String>, value_type: TypeId) -> Self {
        Self {
            name: name.into(),
            value_type,
            flags: MemberFlags::PUBLIC,
            synthetic: false,
            tags: Vec::new(),
        }
    }

    /// Replace the behavioral flags.
    pub fn flags(mut self, flags: MemberFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Mark the field as synthetic.
    pub fn synthetic(mut self) -> Self {
        self.synthetic = true;
        self
    }

    /// Attach a metadata tag.
    pub fn tag(mut self, tag: MetadataTag) -> Self {
        self.tags.push(tag);
        self
    }
}

/// Specification of a method.
#[derive(Debug)]
pub struct MethodSpec {
    name: String,
    result: TypeId,
    params: Vec<TypeId>,
    throws: Vec<TypeId>,
    flags: MemberFlags,
    synthetic: bool,
    tags: Vec<MetadataTag>,
}

impl MethodSpec {
    /// Create a public method spec with the given result type.
    pub fn new(name: impl Into<String>, result: TypeId) -> Self {
        Self {
            name: name.into(),
            result,
            params: Vec::new(),
            throws: Vec::new(),
            flags: MemberFlags::PUBLIC,
            synthetic: false,
            tags: Vec::new(),
        }
    }

    /// Append a parameter type.
    pub fn param(mut self, ty: TypeId) -> Self {
        self.params.push(ty);
        self
    }

    /// Append a declared-thrown type.
    pub fn throws(mut self, ty: TypeId) -> Self {
        self.throws.push(ty);
        self
    }

    /// Replace the behavioral flags.
    pub fn flags(mut self, flags: MemberFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Mark the method as synthetic.
    pub fn synthetic(mut self) -> Self {
        self.synthetic = true;
        self
    }

    /// Attach a metadata tag.
    pub fn tag(mut self, tag: MetadataTag) -> Self {
        self.tags.push(tag);
        self
    }
}

/// Specification of a constructor.
#[derive(Debug)]
pub struct ConstructorSpec {
    params: Vec<TypeId>,
    throws: Vec<TypeId>,
    flags: MemberFlags,
    synthetic: bool,
    tags: Vec<MetadataTag>,
}

impl Default for ConstructorSpec {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstructorSpec {
    /// Create a public constructor spec.
    pub fn new() -> Self {
        Self {
            params: Vec::new(),
            throws: Vec::new(),
            flags: MemberFlags::PUBLIC,
            synthetic: false,
            tags: Vec::new(),
        }
    }

    /// Append a parameter type.
    pub fn param(mut self, ty: TypeId) -> Self {
        self.params.push(ty);
        self
    }

    /// Append a declared-thrown type.
    pub fn throws(mut self, ty: TypeId) -> Self {
        self.throws.push(ty);
        self
    }

    /// Replace the behavioral flags.
    pub fn flags(mut self, flags: MemberFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Mark the constructor as synthetic.
    pub fn synthetic(mut self) -> Self {
        self.synthetic = true;
        self
    }

    /// Attach a metadata tag.
    pub fn tag(mut self, tag: MetadataTag) -> Self {
        self.tags.push(tag);
        self
    }
}

//! Model metadata: the node descriptors the traversal walks over
//!
//! Metadata instances are created once per node identity and cached by
//! [`MetadataProvider`], so two lookups for the same node yield the same
//! `Arc`. The traversal scope relies on that pointer identity.
//!
//! Copyright (c) 2025 Specgate Team
//! Licensed under the Apache-2.0 license

use crate::error::Result;
use serde::Serialize;
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::trace;

/// Runtime descriptor of a model type
#[derive(Clone, Copy)]
pub struct ModelType {
    id: TypeId,
    name: &'static str,
    element: fn() -> Option<ModelType>,
}

impl ModelType {
    /// Descriptor of `T`
    pub fn of<T: Model>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            element: T::element_type,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without its module path or generic arguments
    pub fn short_name(&self) -> &'static str {
        let base = self.name.split('<').next().unwrap_or(self.name);
        base.rsplit("::").next().unwrap_or(base)
    }

    /// Element type when this type is a collection
    pub fn element_type(&self) -> Option<ModelType> {
        (self.element)()
    }

    pub fn is_enumerable(&self) -> bool {
        self.element_type().is_some()
    }
}

impl PartialEq for ModelType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ModelType {}

impl Hash for ModelType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Type-erasure helpers every [`Model`] gets for free
pub trait ModelBase {
    fn as_any(&self) -> &dyn Any;
    fn model_type(&self) -> ModelType;
}

impl<T: Model> ModelBase for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn model_type(&self) -> ModelType {
        ModelType::of::<T>()
    }
}

/// A bound request model the traversal can walk
///
/// Leaf types keep the defaults. Complex types list their properties;
/// collections list their elements.
pub trait Model: ModelBase + Send + Sync + 'static {
    /// Child properties of this model, in declaration order
    fn properties(&self) -> Vec<Property<'_>> {
        Vec::new()
    }

    /// Elements when this model is a collection
    fn elements(&self) -> Option<Vec<&dyn Model>> {
        None
    }

    /// Element type when `Self` is a collection
    fn element_type() -> Option<ModelType>
    where
        Self: Sized,
    {
        None
    }
}

macro_rules! leaf_models {
    ($($ty:ty),* $(,)?) => {
        $(impl Model for $ty {})*
    };
}

leaf_models!(String, bool, char, i32, i64, u8, u32, u64, usize, f32, f64);

impl<T: Model> Model for Vec<T> {
    fn elements(&self) -> Option<Vec<&dyn Model>> {
        Some(self.iter().map(|element| element as &dyn Model).collect())
    }

    fn element_type() -> Option<ModelType> {
        Some(ModelType::of::<T>())
    }
}

/// One property of a complex model
pub struct Property<'a> {
    pub name: &'static str,
    pub model_type: ModelType,
    /// Bound value; `None` when the request did not supply it
    pub value: Option<&'a dyn Model>,
    /// Whether binding must report a missing value
    pub required: bool,
}

impl<'a> Property<'a> {
    /// A property that always has a value
    pub fn new<T: Model>(name: &'static str, value: &'a T) -> Self {
        Self {
            name,
            model_type: ModelType::of::<T>(),
            value: Some(value as &dyn Model),
            required: false,
        }
    }

    /// A property whose value may be absent
    pub fn optional<T: Model>(name: &'static str, value: Option<&'a T>) -> Self {
        Self {
            name,
            model_type: ModelType::of::<T>(),
            value: value.map(|v| v as &dyn Model),
            required: false,
        }
    }

    /// Mark the property as required by binding
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

impl fmt::Debug for Property<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("model_type", &self.model_type)
            .field("has_value", &self.value.is_some())
            .field("required", &self.required)
            .finish()
    }
}

/// Which kind of node a metadata instance describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MetadataKind {
    /// The top-level bound object when no parameter descriptor exists
    RootType,
    /// A type reached during traversal
    Type,
    /// A property of a containing type
    Property,
    /// An action parameter
    Parameter,
    /// An element of a collection
    CollectionElement,
}

/// Builds a message from a field's display name
pub type MessageFactory = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// The framework's message slots used while binding
#[derive(Clone)]
pub struct ModelBindingMessageProvider {
    value_must_not_be_null: MessageFactory,
}

impl ModelBindingMessageProvider {
    pub fn value_must_not_be_null(&self) -> &MessageFactory {
        &self.value_must_not_be_null
    }

    pub fn set_value_must_not_be_null(&mut self, factory: MessageFactory) {
        self.value_must_not_be_null = factory;
    }

    /// Message reported when a required value is missing
    pub fn value_must_not_be_null_message(&self, field: &str) -> String {
        (self.value_must_not_be_null)(field)
    }
}

impl Default for ModelBindingMessageProvider {
    fn default() -> Self {
        Self {
            value_must_not_be_null: Arc::new(|field| format!("The {field} field is required.")),
        }
    }
}

impl fmt::Debug for ModelBindingMessageProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelBindingMessageProvider")
            .field("sample", &self.value_must_not_be_null_message("{field}"))
            .finish()
    }
}

/// Binding-related part of a node's metadata
#[derive(Debug, Clone, Default)]
pub struct BindingMetadata {
    /// Absent on hosts that do not expose the message slots
    pub message_provider: Option<ModelBindingMessageProvider>,
}

/// Identity of a metadata node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetadataKey {
    pub kind: MetadataKind,
    pub model_type: ModelType,
    pub container: Option<ModelType>,
    pub name: Option<String>,
}

/// Mutable view handed to [`BindingMetadataProvider`]s while a node is built
#[derive(Debug)]
pub struct BindingMetadataContext<'a> {
    pub key: &'a MetadataKey,
    pub binding_metadata: &'a mut BindingMetadata,
}

/// Hook that customizes binding metadata when a node is first created
pub trait BindingMetadataProvider: Send + Sync {
    fn create_binding_metadata(&self, context: &mut BindingMetadataContext<'_>) -> Result<()>;

    fn as_any(&self) -> &dyn Any;
}

/// Descriptor of one node in the bound model graph
#[derive(Debug)]
pub struct ModelMetadata {
    key: MetadataKey,
    binding: BindingMetadata,
}

impl ModelMetadata {
    pub fn kind(&self) -> MetadataKind {
        self.key.kind
    }

    pub fn model_type(&self) -> ModelType {
        self.key.model_type
    }

    /// Type that declares this property
    pub fn container_type(&self) -> Option<ModelType> {
        self.key.container
    }

    /// Property or parameter name
    pub fn name(&self) -> Option<&str> {
        self.key.name.as_deref()
    }

    /// Name shown in binding messages
    pub fn display_name(&self) -> &str {
        self.name().unwrap_or_else(|| self.key.model_type.short_name())
    }

    pub fn key(&self) -> &MetadataKey {
        &self.key
    }

    pub fn binding(&self) -> &BindingMetadata {
        &self.binding
    }

    pub fn is_enumerable(&self) -> bool {
        self.key.model_type.is_enumerable()
    }

    pub fn element_type(&self) -> Option<ModelType> {
        self.key.model_type.element_type()
    }

    /// Whether both handles point at the same node
    pub fn same_node(a: &Arc<ModelMetadata>, b: &Arc<ModelMetadata>) -> bool {
        Arc::ptr_eq(a, b)
    }
}

/// Creates and caches metadata nodes
pub struct MetadataProvider {
    details_providers: Vec<Arc<dyn BindingMetadataProvider>>,
    default_messages: Option<ModelBindingMessageProvider>,
    cache: RwLock<HashMap<MetadataKey, Arc<ModelMetadata>>>,
}

impl MetadataProvider {
    /// Provider running the given details providers on every new node
    pub fn new(details_providers: Vec<Arc<dyn BindingMetadataProvider>>) -> Self {
        Self {
            details_providers,
            default_messages: Some(ModelBindingMessageProvider::default()),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Provider for a host that exposes no binding message slots
    pub fn without_message_provider(
        details_providers: Vec<Arc<dyn BindingMetadataProvider>>,
    ) -> Self {
        Self {
            default_messages: None,
            ..Self::new(details_providers)
        }
    }

    pub fn for_root_type(&self, model_type: ModelType) -> Result<Arc<ModelMetadata>> {
        self.get_or_create(MetadataKey {
            kind: MetadataKind::RootType,
            model_type,
            container: None,
            name: None,
        })
    }

    pub fn for_type(&self, model_type: ModelType) -> Result<Arc<ModelMetadata>> {
        self.get_or_create(MetadataKey {
            kind: MetadataKind::Type,
            model_type,
            container: None,
            name: None,
        })
    }

    pub fn for_property(
        &self,
        container: ModelType,
        name: &str,
        model_type: ModelType,
    ) -> Result<Arc<ModelMetadata>> {
        self.get_or_create(MetadataKey {
            kind: MetadataKind::Property,
            model_type,
            container: Some(container),
            name: Some(name.to_string()),
        })
    }

    pub fn for_parameter(&self, name: &str, model_type: ModelType) -> Result<Arc<ModelMetadata>> {
        self.get_or_create(MetadataKey {
            kind: MetadataKind::Parameter,
            model_type,
            container: None,
            name: Some(name.to_string()),
        })
    }

    pub fn for_collection_element(&self, model_type: ModelType) -> Result<Arc<ModelMetadata>> {
        self.get_or_create(MetadataKey {
            kind: MetadataKind::CollectionElement,
            model_type,
            container: None,
            name: None,
        })
    }

    /// Number of nodes created so far
    pub fn cached_len(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn get_or_create(&self, key: MetadataKey) -> Result<Arc<ModelMetadata>> {
        if let Some(existing) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Ok(existing.clone());
        }

        let mut binding = BindingMetadata {
            message_provider: self.default_messages.clone(),
        };
        for provider in &self.details_providers {
            provider.create_binding_metadata(&mut BindingMetadataContext {
                key: &key,
                binding_metadata: &mut binding,
            })?;
        }

        trace!(
            kind = ?key.kind,
            model_type = key.model_type.name(),
            name = ?key.name,
            "Created metadata node"
        );
        let created = Arc::new(ModelMetadata {
            key: key.clone(),
            binding,
        });

        // First insert wins so every caller shares one node
        Ok(self
            .cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key)
            .or_insert(created)
            .clone())
    }
}

impl fmt::Debug for MetadataProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataProvider")
            .field("details_providers", &self.details_providers.len())
            .field("message_slots", &self.default_messages.is_some())
            .field("cached", &self.cached_len())
            .finish()
    }
}

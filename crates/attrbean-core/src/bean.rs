//! Bean capability: property discovery without runtime reflection.
//!
//! A bean describes its readable properties by registering accessors on a
//! [`BeanInfo`]. Map-like beans additionally expose their entries through
//! [`Bean::entries`].
//!
//! # Example
//!
//! ```
//! use attrbean_core::{Bean, BeanInfo, IntrospectionError};
//!
//! struct Link {
//!     href: String,
//!     disabled: bool,
//! }
//!
//! impl Bean for Link {
//!     fn describe<'a>(&'a self, info: &mut BeanInfo<'a>) -> Result<(), IntrospectionError> {
//!         info.accessor("getHref", move || self.href.clone())
//!             .accessor("isDisabled", move || self.disabled);
//!         Ok(())
//!     }
//! }
//!
//! let link = Link { href: "/home".into(), disabled: true };
//! let mut info = BeanInfo::new();
//! link.describe(&mut info).unwrap();
//! let names: Vec<_> = info.properties().iter().map(|p| p.name()).collect();
//! assert_eq!(names, ["href", "disabled"]);
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::{IntrospectionError, PropertyError, Value};

/// Zero-argument read accessor.
pub type ReadFn<'a> = dyn Fn() -> Result<Value, PropertyError> + 'a;

/// How a property is accessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// Plain zero-argument accessor.
    Simple,
    /// Index-parameterized accessor; never read by the extractor.
    Indexed,
}

/// Declared return shape of an accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnShape {
    /// Any value.
    Plain,
    /// A key-value container.
    Map,
}

/// One readable (or unreadable) property of a bean.
pub struct PropertyDescriptor<'a> {
    name: String,
    kind: PropertyKind,
    returns: ReturnShape,
    read: Option<Box<ReadFn<'a>>>,
}

impl PropertyDescriptor<'_> {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    #[must_use]
    pub fn returns(&self) -> ReturnShape {
        self.returns
    }

    /// Whether the property has a read accessor.
    #[must_use]
    pub fn is_readable(&self) -> bool {
        self.read.is_some()
    }

    /// Invoke the read accessor.
    ///
    /// Returns `None` for write-only properties.
    pub fn read(&self) -> Option<Result<Value, PropertyError>> {
        self.read.as_ref().map(|read| read())
    }
}

impl fmt::Debug for PropertyDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("returns", &self.returns)
            .field("readable", &self.is_readable())
            .finish()
    }
}

/// Property metadata collected from a bean, in registration order.
#[derive(Debug, Default)]
pub struct BeanInfo<'a> {
    properties: Vec<PropertyDescriptor<'a>>,
}

impl<'a> BeanInfo<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an infallible accessor under an explicit property name.
    pub fn property<T, F>(&mut self, name: impl Into<String>, read: F) -> &mut Self
    where
        T: Into<Value>,
        F: Fn() -> T + 'a,
    {
        self.push(name.into(), ReturnShape::Plain, move || Ok(read().into()))
    }

    /// Register an accessor that may fail.
    ///
    /// A failure only drops this property from the extracted attributes.
    pub fn try_property<F>(&mut self, name: impl Into<String>, read: F) -> &mut Self
    where
        F: Fn() -> Result<Value, PropertyError> + 'a,
    {
        self.push(name.into(), ReturnShape::Plain, read)
    }

    /// Register an accessor whose declared return type is a map.
    ///
    /// A map-typed property named `data` is expanded into `data-*`
    /// attributes instead of being formatted as one value.
    pub fn map_property<T, F>(&mut self, name: impl Into<String>, read: F) -> &mut Self
    where
        T: Into<Value>,
        F: Fn() -> T + 'a,
    {
        self.push(name.into(), ReturnShape::Map, move || Ok(read().into()))
    }

    /// Register a getter by its method name (`getTitle`, `isDisabled`).
    ///
    /// Names that do not follow the getter convention are ignored, like any
    /// other non-accessor method. An `is` accessor only counts when it
    /// returns `bool`.
    pub fn accessor<T, F>(&mut self, method: &str, read: F) -> &mut Self
    where
        T: Into<Value>,
        F: Fn() -> T + 'a,
    {
        let Some(name) = property_name_from_accessor(method) else {
            return self;
        };
        if !method.starts_with(GET_PREFIX) && !returns_bool::<T>() {
            return self;
        }
        self.property(name, read)
    }

    /// Register an index-parameterized accessor.
    pub fn indexed(&mut self, name: impl Into<String>) -> &mut Self {
        self.properties.push(PropertyDescriptor {
            name: name.into(),
            kind: PropertyKind::Indexed,
            returns: ReturnShape::Plain,
            read: None,
        });
        self
    }

    /// Register a property that has a setter but no getter.
    pub fn write_only(&mut self, name: impl Into<String>) -> &mut Self {
        self.properties.push(PropertyDescriptor {
            name: name.into(),
            kind: PropertyKind::Simple,
            returns: ReturnShape::Plain,
            read: None,
        });
        self
    }

    #[must_use]
    pub fn properties(&self) -> &[PropertyDescriptor<'a>] {
        &self.properties
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    fn push<F>(&mut self, name: String, returns: ReturnShape, read: F) -> &mut Self
    where
        F: Fn() -> Result<Value, PropertyError> + 'a,
    {
        self.properties.push(PropertyDescriptor {
            name,
            kind: PropertyKind::Simple,
            returns,
            read: Some(Box::new(read)),
        });
        self
    }
}

/// Derive a property name from a getter-style method name.
///
/// `get…` and `is…` map to the decapitalized remainder, whatever its case
/// (`getter` → `ter`). A remainder whose first two characters are both
/// uppercase is kept as-is (`getURL` → `URL`). Whether an `is…` method
/// returns a boolean is checked by [`BeanInfo::accessor`].
///
/// # Example
///
/// ```
/// use attrbean_core::property_name_from_accessor;
///
/// assert_eq!(property_name_from_accessor("getDataMobileUrl").as_deref(), Some("dataMobileUrl"));
/// assert_eq!(property_name_from_accessor("isElephant").as_deref(), Some("elephant"));
/// assert_eq!(property_name_from_accessor("get"), None);
/// assert_eq!(property_name_from_accessor("banana"), None);
/// ```
#[must_use]
pub fn property_name_from_accessor(method: &str) -> Option<String> {
    let rest = method
        .strip_prefix(GET_PREFIX)
        .or_else(|| method.strip_prefix(IS_PREFIX))?;
    let mut chars = rest.chars();
    let first = chars.next()?;
    if chars.next().is_some_and(char::is_uppercase) && first.is_uppercase() {
        return Some(rest.to_owned());
    }
    let mut name: String = first.to_lowercase().collect();
    name.push_str(&rest[first.len_utf8()..]);
    Some(name)
}

const GET_PREFIX: &str = "get";
const IS_PREFIX: &str = "is";

/// Whether `T` is `bool`, the only return type an `is…` accessor may have.
fn returns_bool<T>() -> bool {
    std::any::type_name::<T>() == std::any::type_name::<bool>()
}

/// Object whose readable properties can be projected onto attributes.
pub trait Bean {
    /// Register this bean's readable properties.
    ///
    /// An error discards every property registered so far; the entries of a
    /// map-like bean are still used.
    fn describe<'a>(&'a self, _info: &mut BeanInfo<'a>) -> Result<(), IntrospectionError> {
        Ok(())
    }

    /// Entries of a map-like bean, or `None` if the bean is not a map.
    ///
    /// Only entries with text keys become attributes.
    fn entries(&self) -> Option<Vec<(Value, Value)>> {
        None
    }
}

impl<K, V, S> Bean for HashMap<K, V, S>
where
    K: Clone + Into<Value>,
    V: Clone + Into<Value>,
{
    fn entries(&self) -> Option<Vec<(Value, Value)>> {
        Some(
            self.iter()
                .map(|(k, v)| (k.clone().into(), v.clone().into()))
                .collect(),
        )
    }
}

impl<K, V> Bean for BTreeMap<K, V>
where
    K: Clone + Into<Value>,
    V: Clone + Into<Value>,
{
    fn entries(&self) -> Option<Vec<(Value, Value)>> {
        Some(
            self.iter()
                .map(|(k, v)| (k.clone().into(), v.clone().into()))
                .collect(),
        )
    }
}

impl Bean for Value {
    fn entries(&self) -> Option<Vec<(Value, Value)>> {
        self.as_entries().map(<[_]>::to_vec)
    }
}

macro_rules! forward_bean {
    ($($ptr:ident),*) => {
        $(
            impl<B: Bean + ?Sized> Bean for $ptr<B> {
                fn describe<'a>(&'a self, info: &mut BeanInfo<'a>) -> Result<(), IntrospectionError> {
                    (**self).describe(info)
                }

                fn entries(&self) -> Option<Vec<(Value, Value)>> {
                    (**self).entries()
                }
            }
        )*
    };
}

forward_bean!(Box, Rc, Arc);

impl<B: Bean + ?Sized> Bean for &B {
    fn describe<'a>(&'a self, info: &mut BeanInfo<'a>) -> Result<(), IntrospectionError> {
        (**self).describe(info)
    }

    fn entries(&self) -> Option<Vec<(Value, Value)>> {
        (**self).entries()
    }
}

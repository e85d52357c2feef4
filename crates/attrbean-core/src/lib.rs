//! Bean-to-attribute mapping engine.
//!
//! Converts an arbitrary object (a "bean") into a flat map of HTML attribute
//! names to string values. Three pieces cooperate:
//!
//! - [`PropertyExtractor`]: discovers readable properties and map entries
//! - [`format_value`]: converts raw [`Value`]s into one canonical string
//! - [`transform_name`]: renames properties (`cssClass` → `class`,
//!   `dataMobileUrl` → `data-mobile-url`)
//!
//! Applying the resulting [`AttributeMap`] to an element is the job of the
//! `attrbean-dom` crate.
//!
//! # Example
//!
//! ```
//! use attrbean_core::{Bean, BeanInfo, IntrospectionError, extract_properties};
//!
//! struct Anchor {
//!     href: String,
//!     external: bool,
//! }
//!
//! impl Bean for Anchor {
//!     fn describe<'a>(&'a self, info: &mut BeanInfo<'a>) -> Result<(), IntrospectionError> {
//!         info.accessor("getHref", move || self.href.as_str())
//!             .accessor("getDataExternal", move || self.external)
//!             .accessor("getCssClass", || vec!["nav", "nav-link"]);
//!         Ok(())
//!     }
//! }
//!
//! let attrs = extract_properties(&Anchor { href: "/about".into(), external: true });
//! assert_eq!(attrs["href"], "/about");
//! assert_eq!(attrs["data-external"], "data-external");
//! assert_eq!(attrs["class"], "nav nav-link");
//! ```
//!
//! # Features
//!
//! - `json`: `serde_json::Value` objects act as map-like beans.

mod bean;
mod error;
mod extract;
mod format;
#[cfg(feature = "json")]
mod json;
mod naming;
mod value;

pub use bean::{
    Bean, BeanInfo, PropertyDescriptor, PropertyKind, ReadFn, ReturnShape,
    property_name_from_accessor,
};
pub use error::{IntrospectionError, PropertyError};
pub use extract::{
    AttributeMap, ExtractOptions, PropertyExtractor, RESERVED_CONTENT_KEYS, TEXT_KEY, UTEXT_KEY,
    extract_properties,
};
pub use format::format_value;
pub use naming::{CSS_CLASS_PROPERTY, is_data_attribute_name, is_uppercase, transform_name, uncamel};
pub use value::Value;

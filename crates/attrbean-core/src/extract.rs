//! Property extraction: bean → flat attribute map.

use std::collections::BTreeMap;

use crate::bean::{PropertyDescriptor, PropertyKind, ReturnShape};
use crate::naming::transform_name;
use crate::{Bean, BeanInfo, Value, format_value};

/// Final attribute name → attribute value.
pub type AttributeMap = BTreeMap<String, String>;

/// Reserved key replacing the element's content with plain text.
pub const TEXT_KEY: &str = "text";
/// Reserved key replacing the element's content with markup.
pub const UTEXT_KEY: &str = "utext";
/// Keys diverted to content replacement instead of attributes.
pub const RESERVED_CONTENT_KEYS: [&str; 2] = [TEXT_KEY, UTEXT_KEY];

/// Introspection artifact present on every object; never an attribute.
const CLASS_PROPERTY: &str = "class";
const DATA_PROPERTY: &str = "data";

/// Feature switches distinguishing the full and plain processor variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Expand a map-typed `data` property into `data-*` attributes.
    pub data_map_expansion: bool,
    /// Let `text`/`utext` through even when empty, for content replacement.
    pub text_content: bool,
}

impl ExtractOptions {
    /// Every feature enabled.
    pub const FULL: Self = Self {
        data_map_expansion: true,
        text_content: true,
    };

    /// Plain attribute mapping only.
    pub const PLAIN: Self = Self {
        data_map_expansion: false,
        text_content: false,
    };

    #[must_use]
    pub fn with_data_map_expansion(mut self, enabled: bool) -> Self {
        self.data_map_expansion = enabled;
        self
    }

    #[must_use]
    pub fn with_text_content(mut self, enabled: bool) -> Self {
        self.text_content = enabled;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self::FULL
    }
}

/// Converts beans into [`AttributeMap`]s.
///
/// Map entries are collected first, then properties in registration order;
/// when two sources produce the same final name the later one wins.
///
/// Failures never escape: a failing accessor drops its property and a
/// failing introspection drops the accessor pass.
///
/// # Example
///
/// ```
/// use attrbean_core::{Bean, BeanInfo, IntrospectionError, PropertyExtractor, Value};
///
/// struct Button;
///
/// impl Bean for Button {
///     fn describe<'a>(&'a self, info: &mut BeanInfo<'a>) -> Result<(), IntrospectionError> {
///         info.property("cssClass", || vec!["btn", "btn-primary"])
///             .property("disabled", || false)
///             .property("dataTarget", || "#modal")
///             .map_property("data", || Value::map([("toggle", "modal")]));
///         Ok(())
///     }
/// }
///
/// let attrs = PropertyExtractor::default().extract(&Button);
/// assert_eq!(attrs["class"], "btn btn-primary");
/// assert_eq!(attrs["data-target"], "#modal");
/// assert_eq!(attrs["data-toggle"], "modal");
/// assert!(!attrs.contains_key("disabled"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyExtractor {
    options: ExtractOptions,
}

impl PropertyExtractor {
    #[must_use]
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> ExtractOptions {
        self.options
    }

    /// Extract the attribute map for a bean.
    pub fn extract<B: Bean + ?Sized>(&self, bean: &B) -> AttributeMap {
        let mut attrs = AttributeMap::new();

        if let Some(entries) = bean.entries() {
            self.extract_entries(entries, &mut attrs);
        }

        let mut info = BeanInfo::new();
        match bean.describe(&mut info) {
            Ok(()) => {
                for property in info.properties() {
                    self.extract_property(property, &mut attrs);
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "Failed to introspect bean");
            }
        }

        attrs
    }

    fn extract_entries(&self, entries: Vec<(Value, Value)>, attrs: &mut AttributeMap) {
        for (key, value) in entries {
            let Value::Str(name) = key else {
                continue;
            };
            let formatted = format_value(&value, Some(name.as_str()), None);
            self.insert(attrs, name, formatted);
        }
    }

    fn extract_property(&self, property: &PropertyDescriptor<'_>, attrs: &mut AttributeMap) {
        let name = property.name();
        if name.is_empty() {
            tracing::debug!("Skipping property descriptor without a name");
            return;
        }
        if name == CLASS_PROPERTY || property.kind() == PropertyKind::Indexed {
            return;
        }

        let value = match property.read() {
            Some(Ok(value)) => value,
            Some(Err(e)) => {
                tracing::debug!(property = %name, error = %e, "Failed to read property");
                return;
            }
            None => return,
        };

        let final_name = transform_name(name);

        if self.options.data_map_expansion
            && final_name == DATA_PROPERTY
            && property.returns() == ReturnShape::Map
            && let Value::Map(entries) = value
        {
            expand_data_map(entries, attrs);
            return;
        }

        let formatted = format_value(&value, Some(final_name.as_ref()), None);
        self.insert(attrs, final_name.into_owned(), formatted);
    }

    /// Insert a formatted value, omitting null and empty results.
    ///
    /// Reserved content keys pass through empty when content replacement is
    /// enabled.
    fn insert(&self, attrs: &mut AttributeMap, name: String, value: Option<String>) {
        let Some(value) = value else {
            return;
        };
        let reserved = self.options.text_content && RESERVED_CONTENT_KEYS.contains(&name.as_str());
        if value.is_empty() && !reserved {
            return;
        }
        if let Some(previous) = attrs.insert(name, value) {
            tracing::trace!(previous = %previous, "Attribute value overwritten");
        }
    }
}

/// Expand the entries of a `data` map into `data-<key>` attributes.
///
/// Keys are used verbatim (never uncameled). Only null values are dropped.
fn expand_data_map(entries: Vec<(Value, Value)>, attrs: &mut AttributeMap) {
    for (key, value) in entries {
        let Value::Str(key) = key else {
            continue;
        };
        if let Some(formatted) = format_value(&value, Some("true"), Some("false")) {
            attrs.insert(format!("{DATA_PROPERTY}-{key}"), formatted);
        }
    }
}

/// Extract with every feature enabled.
///
/// Shorthand for `PropertyExtractor::default().extract(bean)`.
pub fn extract_properties<B: Bean + ?Sized>(bean: &B) -> AttributeMap {
    PropertyExtractor::default().extract(bean)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{IntrospectionError, PropertyError};

    fn attrs(pairs: &[(&str, &str)]) -> AttributeMap {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    /// Bean assembled from a registration closure.
    struct TestBean<F>(F);

    impl<F> Bean for TestBean<F>
    where
        F: for<'a> Fn(&mut BeanInfo<'a>),
    {
        fn describe<'a>(&'a self, info: &mut BeanInfo<'a>) -> Result<(), IntrospectionError> {
            (self.0)(info);
            Ok(())
        }
    }

    fn bean<F: for<'a> Fn(&mut BeanInfo<'a>)>(f: F) -> TestBean<F> {
        TestBean(f)
    }

    #[test]
    fn test_bean_with_strings() {
        let b = bean(|info| {
            info.accessor("getTitle", || "thetitle")
                .accessor("getAlt", || "some alternative");
        });
        assert_eq!(
            extract_properties(&b),
            attrs(&[("title", "thetitle"), ("alt", "some alternative")])
        );
    }

    #[test]
    fn test_bean_with_booleans() {
        let b = bean(|info| {
            info.accessor("isElephant", || true)
                .accessor("getBanana", || true)
                .accessor("isFalseSoWontReturnAProperty", || false);
        });
        assert_eq!(
            extract_properties(&b),
            attrs(&[("elephant", "elephant"), ("banana", "banana")])
        );
    }

    #[test]
    fn test_non_bean_methods() {
        let b = bean(|info| {
            info.accessor("get", || "not a bean getter")
                .accessor("banana", || "also not a bean getter");
        });
        assert!(extract_properties(&b).is_empty());
    }

    #[test]
    fn test_bean_without_properties() {
        struct Empty;
        impl Bean for Empty {}
        assert!(extract_properties(&Empty).is_empty());
    }

    #[test]
    fn test_empty_collection_is_omitted() {
        let b = bean(|info| {
            info.property("list", Vec::<String>::new);
        });
        assert!(extract_properties(&b).is_empty());
    }

    #[test]
    fn test_collection_of_strings() {
        let b = bean(|info| {
            info.property("list", || vec!["a", "b", "c"]);
        });
        assert_eq!(extract_properties(&b), attrs(&[("list", "a b c")]));
    }

    #[test]
    fn test_arrays() {
        let b = bean(|info| {
            info.property("chars", || ['a', 'b', 'c'])
                .property("doubles", || [1.0_f64, 2.7])
                .property("grid", || Value::array([[1.0_f64, 2.7], [3.99, 77.8]]));
        });
        assert_eq!(
            extract_properties(&b),
            attrs(&[
                ("chars", "a b c"),
                ("doubles", "1.0 2.7"),
                ("grid", "1.0 2.7 3.99 77.8"),
            ])
        );
    }

    #[test]
    fn test_plain_map_property_uses_default_text() {
        let b = bean(|info| {
            info.map_property("map", || Value::map([("X", "Y")]));
        });
        assert_eq!(extract_properties(&b), attrs(&[("map", "{X=Y}")]));
    }

    #[test]
    fn test_data_map_expands_without_uncameling() {
        let b = bean(|info| {
            info.map_property("data", || {
                Value::map([("A", "B"), ("bananaRama", "X"), ("banana-rama", "Y")])
            });
        });
        assert_eq!(
            extract_properties(&b),
            attrs(&[
                ("data-A", "B"),
                ("data-bananaRama", "X"),
                ("data-banana-rama", "Y"),
            ])
        );
    }

    #[test]
    fn test_data_map_formats_booleans_literally() {
        let b = bean(|info| {
            info.map_property("data", || {
                Value::map([
                    ("on", Value::from(true)),
                    ("off", Value::from(false)),
                    ("gone", Value::Null),
                    ("blank", Value::from("")),
                ])
            });
        });
        assert_eq!(
            extract_properties(&b),
            attrs(&[("data-on", "true"), ("data-off", "false"), ("data-blank", "")])
        );
    }

    #[test]
    fn test_data_map_skips_non_text_keys() {
        let b = bean(|info| {
            info.map_property("data", || Value::map([(Value::from(1), Value::from("x"))]));
        });
        assert!(extract_properties(&b).is_empty());
    }

    #[test]
    fn test_data_map_requires_declared_map_shape() {
        let b = bean(|info| {
            info.property("data", || Value::map([("A", "B")]));
        });
        assert_eq!(extract_properties(&b), attrs(&[("data", "{A=B}")]));
    }

    #[test]
    fn test_data_map_expansion_disabled() {
        let b = bean(|info| {
            info.map_property("data", || Value::map([("A", "B")]));
        });
        let extractor = PropertyExtractor::new(ExtractOptions::PLAIN);
        assert_eq!(extractor.extract(&b), attrs(&[("data", "{A=B}")]));
    }

    #[test]
    fn test_data_properties_are_uncameled() {
        let b = bean(|info| {
            info.accessor("getDataMobileUrl", || "the url")
                .accessor("getDataTabletUrl", || "tablet url");
        });
        assert_eq!(
            extract_properties(&b),
            attrs(&[("data-mobile-url", "the url"), ("data-tablet-url", "tablet url")])
        );
    }

    #[test]
    fn test_css_class_becomes_class() {
        let b = bean(|info| {
            info.accessor("getCssClass", || vec!["a", "b"]);
        });
        let result = extract_properties(&b);
        assert_eq!(result, attrs(&[("class", "a b")]));
        assert!(!result.contains_key("cssClass"));
    }

    #[test]
    fn test_class_property_is_excluded() {
        let b = bean(|info| {
            info.property("class", || "Object");
        });
        assert!(extract_properties(&b).is_empty());
    }

    #[test]
    fn test_indexed_and_write_only_are_ignored() {
        let b = bean(|info| {
            info.indexed("items").write_only("password").property("id", || "x");
        });
        assert_eq!(extract_properties(&b), attrs(&[("id", "x")]));
    }

    #[test]
    fn test_failing_accessor_is_omitted() {
        let b = bean(|info| {
            info.try_property("broken", || Err(PropertyError::Failed("boom".to_owned())))
                .property("ok", || "fine");
        });
        assert_eq!(extract_properties(&b), attrs(&[("ok", "fine")]));
    }

    #[test]
    fn test_unnamed_descriptor_is_skipped() {
        let b = bean(|info| {
            info.property("", || "orphan");
        });
        assert!(extract_properties(&b).is_empty());
    }

    #[test]
    fn test_empty_string_property_is_omitted() {
        let b = bean(|info| {
            info.property("alt", || "");
        });
        assert!(extract_properties(&b).is_empty());
    }

    #[test]
    fn test_reserved_keys_pass_through_empty() {
        let b = bean(|info| {
            info.property("text", || "").property("utext", || "<b>x</b>");
        });
        assert_eq!(
            extract_properties(&b),
            attrs(&[("text", ""), ("utext", "<b>x</b>")])
        );

        let plain = PropertyExtractor::new(ExtractOptions::PLAIN);
        assert_eq!(plain.extract(&b), attrs(&[("utext", "<b>x</b>")]));
    }

    #[test]
    fn test_map_bean() {
        let mut map = HashMap::new();
        map.insert("left", "right");
        map.insert("up", "down");
        assert_eq!(
            extract_properties(&map),
            attrs(&[("left", "right"), ("up", "down")])
        );
    }

    #[test]
    fn test_map_bean_entry_rules() {
        let map = Value::map([
            (Value::from("flag"), Value::from(true)),
            (Value::from("off"), Value::from(false)),
            (Value::from("empty"), Value::from("")),
            (Value::from(7), Value::from("numeric key")),
            (Value::from("none"), Value::Null),
        ]);
        assert_eq!(extract_properties(&map), attrs(&[("flag", "flag")]));
    }

    #[test]
    fn test_later_property_wins_on_collision() {
        let b = bean(|info| {
            info.property("dataFoo", || "from accessor")
                .map_property("data", || Value::map([("foo", "from map")]));
        });
        assert_eq!(extract_properties(&b), attrs(&[("data-foo", "from map")]));
    }

    #[test]
    fn test_properties_override_map_entries() {
        struct Hybrid;
        impl Bean for Hybrid {
            fn describe<'a>(&'a self, info: &mut BeanInfo<'a>) -> Result<(), IntrospectionError> {
                info.property("title", || "from property");
                Ok(())
            }

            fn entries(&self) -> Option<Vec<(Value, Value)>> {
                Some(vec![
                    (Value::from("title"), Value::from("from entry")),
                    (Value::from("lang"), Value::from("en")),
                ])
            }
        }

        assert_eq!(
            extract_properties(&Hybrid),
            attrs(&[("lang", "en"), ("title", "from property")])
        );
    }

    #[test]
    fn test_introspection_failure_keeps_map_entries() {
        struct Broken;
        impl Bean for Broken {
            fn describe<'a>(&'a self, info: &mut BeanInfo<'a>) -> Result<(), IntrospectionError> {
                info.property("lost", || "x");
                Err(IntrospectionError::MalformedDescriptor("lost".to_owned()))
            }

            fn entries(&self) -> Option<Vec<(Value, Value)>> {
                Some(vec![(Value::from("kept"), Value::from("y"))])
            }
        }

        assert_eq!(extract_properties(&Broken), attrs(&[("kept", "y")]));
    }

    #[test]
    fn test_borrowed_fields() {
        struct Image {
            src: String,
            alt: Option<String>,
        }

        impl Bean for Image {
            fn describe<'a>(&'a self, info: &mut BeanInfo<'a>) -> Result<(), IntrospectionError> {
                info.property("src", move || self.src.as_str())
                    .property("alt", move || self.alt.clone());
                Ok(())
            }
        }

        let image = Image {
            src: "/logo.png".to_owned(),
            alt: None,
        };
        assert_eq!(extract_properties(&image), attrs(&[("src", "/logo.png")]));
    }
}

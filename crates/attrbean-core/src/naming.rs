//! Property name to attribute name transformation.

use std::borrow::Cow;

/// Property name aliased to the `class` attribute.
///
/// `class` itself is reserved as an introspection artifact, so beans expose
/// their CSS classes under this name instead.
pub const CSS_CLASS_PROPERTY: &str = "cssClass";

const CLASS_ATTRIBUTE: &str = "class";
const DATA_PREFIX: &str = "data";

/// Transform a raw property name into its final attribute name.
///
/// - `cssClass` becomes `class`
/// - data-attribute names (`dataMobileUrl`) are uncameled (`data-mobile-url`)
/// - anything else is returned unchanged
///
/// # Example
///
/// ```
/// use attrbean_core::transform_name;
///
/// assert_eq!(transform_name("cssClass"), "class");
/// assert_eq!(transform_name("dataMobileUrl"), "data-mobile-url");
/// assert_eq!(transform_name("href"), "href");
/// ```
pub fn transform_name(name: &str) -> Cow<'_, str> {
    if name == CSS_CLASS_PROPERTY {
        Cow::Borrowed(CLASS_ATTRIBUTE)
    } else if is_data_attribute_name(name) {
        Cow::Owned(uncamel(name))
    } else {
        Cow::Borrowed(name)
    }
}

/// Whether `name` is `data` followed by an uppercase-led suffix.
#[must_use]
pub fn is_data_attribute_name(name: &str) -> bool {
    name.strip_prefix(DATA_PREFIX)
        .and_then(|suffix| suffix.chars().next())
        .is_some_and(is_uppercase)
}

/// Insert a hyphen before every uppercase character, then lowercase.
///
/// Consecutive capitals each get their own hyphen; digits never do.
#[must_use]
pub fn uncamel(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if is_uppercase(c) {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out.to_lowercase()
}

/// Whether `c` is an ASCII capital letter.
///
/// Attribute names are ASCII, so other scripts never start a word.
#[must_use]
pub fn is_uppercase(c: char) -> bool {
    c.is_ascii_uppercase()
}

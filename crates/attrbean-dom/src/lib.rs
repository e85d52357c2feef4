//! Element-side processing for attrbean.
//!
//! Connects the attribute map produced by `attrbean-core` to template
//! elements:
//!
//! - [`Element`]: the mutation capability a host DOM node provides
//! - [`AttributeMapApplier`]: merges an attribute map into an element
//! - [`BeanProcessor`]: finds the marker attribute, evaluates it through an
//!   [`ExpressionEvaluator`], and applies the resulting bean
//!
//! [`HtmlElement`] is a small in-memory element used by tests and hosts
//! without a DOM of their own.
//!
//! # Example
//!
//! ```
//! use attrbean_core::{Bean, BeanInfo, IntrospectionError};
//! use attrbean_dom::{BeanProcessor, HtmlElement, Node, Variables};
//!
//! struct Badge {
//!     label: &'static str,
//!     count: u32,
//! }
//!
//! impl Bean for Badge {
//!     fn describe<'a>(&'a self, info: &mut BeanInfo<'a>) -> Result<(), IntrospectionError> {
//!         info.accessor("getText", move || self.label)
//!             .accessor("getDataCount", move || self.count)
//!             .accessor("getCssClass", || ["badge", "badge-info"]);
//!         Ok(())
//!     }
//! }
//!
//! let vars = Variables::new().with("badge", Badge { label: "New", count: 3 });
//! let mut el = HtmlElement::new("span")
//!     .with_attr("bean", "${badge}")
//!     .with_child(Node::text("placeholder"));
//!
//! BeanProcessor::bean().process(&mut el, &vars)?;
//! assert_eq!(
//!     el.to_html(),
//!     r#"<span class="badge badge-info" data-count="3">New</span>"#
//! );
//! # Ok::<(), attrbean_dom::ProcessError>(())
//! ```

mod apply;
mod element;
mod error;
mod evaluate;
mod html;
mod processor;

pub use apply::{Applied, AttributeMapApplier, ContentReplacement, RemovalPolicy};
pub use element::{Element, Node};
pub use error::{ExpressionError, ProcessError};
pub use evaluate::{ExpressionEvaluator, Variables};
pub use html::HtmlElement;
pub use processor::BeanProcessor;

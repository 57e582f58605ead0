#![deny(
    missing_debug_implementations,
    nonstandard_style,
    rust_2018_idioms,
    missing_docs
)]
#![warn(unreachable_pub)]
#![doc = include_str!("../README.md")]

use proc_macro::TokenStream;

mod methods;
mod reflect;
mod utils;

/// Derives `Reflect`, `Typed` and `Record` for structs with named fields.
///
/// The struct must implement `Clone`: snapshots of records are clones. Every field type must
/// implement `zreflect::Typed`.
///
/// `pub` fields are exported: they are snapshotted and can be set through an exclusive
/// reflection. Other fields are listed but neither snapshotted nor settable.
///
/// # Attributes
///
/// On the struct:
///
/// - `#[zreflect(methods)]`: expose the methods of the inherent `impl` block registered with
///   [`macro@methods`].
/// - `#[zreflect(methods(Self, Trait, ...))]`: expose the methods of several registered blocks,
///   `Self` naming the inherent block and a trait name its implementation. The blocks are merged
///   in the listed order.
/// - `#[zreflect(rename = "Name")]`: the name reported for the type.
/// - `#[zreflect(module = "path")]`: the module path reported for the type instead of
///   `module_path!()`.
/// - `#[zreflect(crate = "path")]`: the path to the `zreflect` crate.
///
/// On fields:
///
/// - `#[zreflect(tag(key = "value", ...))]`: tags, read verbatim.
/// - `#[zreflect(embed)]`: mark the field as an embedded member.
/// - `#[zreflect(rename = "name")]`: the name the field is looked up by.
/// - `#[zreflect(skip)]`: leave the field out.
///
/// Doc comments on fields are kept.
///
/// # Limitations
///
/// Generic structs, tuple structs, enums and unions are not supported:
///
/// ```rust,compile_fail
/// #[derive(Clone, zreflect::Reflect)]  // This will fail to compile
/// struct Point(f32, f32);
/// ```
///
/// ```rust,compile_fail
/// #[derive(Clone, zreflect::Reflect)]  // This will fail to compile
/// struct Wrapper<T> {
///     pub inner: T,
/// }
/// ```
///
/// # Examples
///
/// ```rust
/// use zreflect::{Kind, Reflect, Reflection};
///
/// #[derive(Clone, Reflect)]
/// #[zreflect(module = "example.com/inventory/items")]
/// struct Item {
///     /// Stock keeping unit.
///     #[zreflect(tag(json = "sku", db = "item_sku"))]
///     pub sku: String,
///     #[zreflect(rename = "qty")]
///     pub quantity: u32,
///     #[zreflect(skip)]
///     cache: Vec<u8>,
/// }
///
/// let item = Item { sku: "A-1".into(), quantity: 3, cache: Vec::new() };
/// let reflection = Reflection::new(&item).unwrap();
///
/// assert_eq!(reflection.qualified_name(), "inventory.items.Item");
/// assert_eq!(reflection.field_names().collect::<Vec<_>>(), ["sku", "qty"]);
///
/// let sku = reflection.field("sku").unwrap();
/// assert_eq!(sku.kind(), Kind::String);
/// assert_eq!(sku.type_name(), "String");
/// assert_eq!(sku.tag("db"), "item_sku");
/// assert_eq!(sku.docs(), [" Stock keeping unit."]);
/// ```
#[proc_macro_derive(Reflect, attributes(zreflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    reflect::derive_reflect(input)
}

/// Registers the methods of an `impl` block for dynamic calls.
///
/// Every `&self` and `&mut self` method of the block gets a type-erased invoker and an entry in
/// the method table of the block. Associated functions are ignored. Methods are exported if they
/// are `pub` or part of a trait implementation. The struct opts in with `#[zreflect(methods)]`,
/// or lists its blocks with `#[zreflect(methods(Self, Trait))]`.
///
/// One inherent block and one block per implemented trait can be registered for a type. Blocks
/// of traits sharing a name can not be registered on the same type.
///
/// Parameters are passed by position as `zreflect::Value`s of their exact type. Reference
/// parameters (`&str`, `&[T]`, `&T`) take their owned form (`String`, `Vec<T>`, `T`). Returned
/// values are packed in order: `()` gives none, a tuple one per element, and references are
/// converted to their owned form.
///
/// # Attributes
///
/// On the macro: `#[zreflect::methods(crate = "path")]`, the path to the `zreflect` crate.
///
/// On methods:
///
/// - `#[zreflect(rename = "name")]`: the name the method is called by.
/// - `#[zreflect(variadic)]`: mark a method whose last parameter is a `Vec<T>` or `&[T]` as
///   variadic. The trailing values are still passed as one assembled `Vec<T>`.
/// - `#[zreflect(skip)]`: do not register the method.
///
/// # Limitations
///
/// Methods taking `self` by value, generic, `async` and `unsafe` methods, and methods with
/// `&mut` parameters can not be registered. Skip them:
///
/// ```rust,compile_fail
/// #[derive(Clone, zreflect::Reflect)]
/// #[zreflect(methods)]
/// struct Buffer {
///     pub data: Vec<u8>,
/// }
///
/// #[zreflect::methods]
/// impl Buffer {
///     pub fn into_inner(self) -> Vec<u8> {  // This will fail to compile
///         self.data
///     }
/// }
/// ```
///
/// # Examples
///
/// ```rust
/// use zreflect::{args, Reflect, Reflection};
///
/// #[derive(Clone, Reflect)]
/// #[zreflect(methods)]
/// struct Greeter {
///     pub greeting: String,
/// }
///
/// #[zreflect::methods]
/// impl Greeter {
///     pub fn greet(&self, name: &str) -> String {
///         format!("{}, {name}!", self.greeting)
///     }
///
///     #[zreflect(variadic)]
///     pub fn greet_all(&self, names: &[String]) -> (usize, String) {
///         (names.len(), names.join(" & "))
///     }
///
///     pub fn set_greeting(&mut self, greeting: String) {
///         self.greeting = greeting;
///     }
/// }
///
/// let mut greeter = Greeter { greeting: "Hello".into() };
/// let mut reflection = Reflection::new(&mut greeter).unwrap();
///
/// let greet = reflection.method("greet").unwrap();
/// assert_eq!(greet.signature(), "fn(&self, name: &str) -> String");
///
/// reflection.call("set_greeting", args![String::from("Hi")]).unwrap();
/// let returned = reflection.call("greet", args![String::from("Ana")]).unwrap();
/// assert_eq!(returned[0].downcast_ref::<String>().unwrap(), "Hi, Ana!");
///
/// let names = vec![String::from("Ana"), String::from("Bo")];
/// let returned = reflection.call("greet_all", args![names]).unwrap();
/// assert_eq!(returned[0].downcast_ref::<usize>(), Some(&2));
/// assert_eq!(returned[1].downcast_ref::<String>().unwrap(), "Ana & Bo");
/// ```
#[proc_macro_attribute]
pub fn methods(attr: TokenStream, input: TokenStream) -> TokenStream {
    methods::methods(attr, input)
}

//! Registration tokens carried by concrete implementations.

use crate::factory::registry::Registry;

/// Id and constructor of one concrete implementation of the family `B`.
///
/// Tokens are plain `const` values, so an implementation can expose its own
/// token next to its definition:
///
/// ```
/// use armor_aim::factory::{Registration, Registry};
///
/// trait Greeter {
///     fn greet(&self) -> String;
/// }
///
/// struct English;
///
/// impl Greeter for English {
///     fn greet(&self) -> String {
///         "hello".to_string()
///     }
/// }
///
/// fn english() -> Box<dyn Greeter> {
///     Box::new(English)
/// }
///
/// const ENGLISH: Registration<dyn Greeter> = Registration::new("en", english);
///
/// let registry = Registry::with_registrations(&[ENGLISH]);
/// assert_eq!(registry.create("en").unwrap().greet(), "hello");
/// ```
///
/// Nothing registers itself. The host applies tokens explicitly and in a
/// fixed order, which keeps registration independent of link or load order.
pub struct Registration<B: ?Sized> {
    id: &'static str,
    construct: fn() -> Box<B>,
}

impl<B: ?Sized> Registration<B> {
    /// Create a token for `id` built by `construct`.
    pub const fn new(id: &'static str, construct: fn() -> Box<B>) -> Self {
        Self { id, construct }
    }

    /// Id the implementation is registered under.
    pub fn id(&self) -> &'static str {
        self.id
    }
}

impl<B: ?Sized + 'static> Registration<B> {
    /// Insert this token into `registry`, replacing any entry with the same id.
    pub fn register(&self, registry: &mut Registry<B>) {
        registry.register(self.id, self.construct);
    }
}

impl<B: ?Sized> Clone for Registration<B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: ?Sized> Copy for Registration<B> {}

impl<B: ?Sized> std::fmt::Debug for Registration<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration").field("id", &self.id).finish()
    }
}

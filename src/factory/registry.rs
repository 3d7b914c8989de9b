//! Id-keyed constructor table for one family of implementations.

use std::collections::HashMap;
use std::fmt;

use log::debug;

use crate::factory::registration::Registration;

/// Construction capability stored for one component id.
pub type Constructor<B> = Box<dyn Fn() -> Box<B> + Send + Sync>;

/// Maps component ids to constructors of a shared capability `B`.
///
/// `B` is normally a trait object type such as `dyn Yolo`. Each id holds at
/// most one constructor; registering an id again replaces the earlier entry.
///
/// The registry is filled through `&mut self` during startup and only read
/// through `&self` afterwards, so a finished registry can be shared freely.
pub struct Registry<B: ?Sized> {
    constructors: HashMap<String, Constructor<B>>,
}

impl<B: ?Sized> Registry<B> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Build a registry by applying the tokens in slice order.
    ///
    /// Later tokens win over earlier tokens carrying the same id.
    pub fn with_registrations(registrations: &[Registration<B>]) -> Self
    where
        B: 'static,
    {
        let mut registry = Self::new();
        for registration in registrations {
            registration.register(&mut registry);
        }
        registry
    }

    /// Insert or overwrite the constructor for `id`.
    pub fn register<F>(&mut self, id: impl Into<String>, constructor: F)
    where
        F: Fn() -> Box<B> + Send + Sync + 'static,
    {
        let id = id.into();
        if self
            .constructors
            .insert(id.clone(), Box::new(constructor))
            .is_some()
        {
            debug!("registry: replaced constructor for '{id}'");
        } else {
            debug!("registry: registered '{id}'");
        }
    }

    /// Construct a new instance for `id`, or `None` if `id` is unknown.
    pub fn create(&self, id: &str) -> Option<Box<B>> {
        self.constructors.get(id).map(|construct| construct())
    }

    /// Whether a constructor is registered for `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.constructors.contains_key(id)
    }

    /// Registered ids in sorted order.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of registered ids.
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    /// Whether nothing has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl<B: ?Sized> Default for Registry<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: ?Sized> fmt::Debug for Registry<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry").field("ids", &self.ids()).finish()
    }
}

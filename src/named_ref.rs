use crate::loc::DefLocation;
use std::marker::PhantomData;

/// Represents a reference to something by name.
///
/// Schemas are graphs with cycles (`type A { b: B } type B { a: A }`), so
/// schema elements never hold direct references to each other. Instead they
/// hold a [`NamedRef`]: the referenced element's name plus where the
/// reference was written. Dereferencing is a map lookup against the source
/// (usually the [`Schema`](crate::schema::Schema)) at use time, which
/// reduces cyclic references to name lookups.
#[derive(Debug)]
pub struct NamedRef<TSource, TResource: DerefByName<Source = TSource>> {
    pub name: String,
    ref_location: DefLocation,
    phantom: PhantomData<TResource>,
}

// Clone is manual: a derive would demand `TSource: Clone`, but a reference
// never owns its source.
impl<TSource, TResource: DerefByName<Source = TSource>> Clone
    for NamedRef<TSource, TResource>
{
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            ref_location: self.ref_location.clone(),
            phantom: PhantomData,
        }
    }
}

impl<TSource, TResource: DerefByName<Source = TSource>> NamedRef<TSource, TResource> {
    pub fn new(name: impl Into<String>, ref_location: DefLocation) -> Self {
        Self {
            name: name.into(),
            ref_location,
            phantom: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ref_location(&self) -> &DefLocation {
        &self.ref_location
    }

    pub fn deref<'a>(&self, source: &'a TSource) -> Result<&'a TResource, DerefByNameError> {
        TResource::deref_name(source, self.name.as_str())
    }
}

impl<TSource, TResource: DerefByName<Source = TSource>> PartialEq
    for NamedRef<TSource, TResource>
{
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// Implemented by any type that can be referenced by name. Enables
/// `NamedRef<Source, Self>` for that type.
pub trait DerefByName: std::fmt::Debug {
    type Source;

    fn deref_name<'a>(
        source: &'a Self::Source,
        name: &str,
    ) -> Result<&'a Self, DerefByNameError>
    where
        Self: Sized;

    fn named_ref(name: &str, location: DefLocation) -> NamedRef<Self::Source, Self>
    where
        Self: Sized,
    {
        NamedRef::new(name, location)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum DerefByNameError {
    #[error("`{0}` is not defined in this schema")]
    DanglingReference(String),
}

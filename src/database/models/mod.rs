pub mod resource;

pub use resource::{NewResource, Resource, ResourceInput, ResourceKind, ValidationError, REQUIRED_FIELDS};

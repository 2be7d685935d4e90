use thiserror::Error;

/// Document-level flattening failures.
///
/// Field-level absence is never an error: the accessors in
/// [`crate::flatten::access`] degrade missing or wrong-shaped optional fields
/// to their documented defaults. The only thing a transform can reject is a
/// document that is not a JSON object at the top level.
#[derive(Debug, Error)]
pub enum FlattenError {
    #[error("top-level JSON value is not an object")]
    NotAnObject,
}

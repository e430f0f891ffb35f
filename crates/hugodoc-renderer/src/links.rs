//! Resolution of internal link addresses.

use crate::RenderError;

/// Maps an internal link address to the target placed in the output.
///
/// Implementations are bound to the page being rendered, so the returned
/// target can be relative to it.
pub trait LinkResolver {
    /// Resolve `address`.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::UnresolvedReference` when the address names
    /// nothing known.
    fn resolve(&self, address: &str) -> Result<String, RenderError>;
}

/// Passes addresses through unchanged.
pub struct IdentityLinks;

impl LinkResolver for IdentityLinks {
    fn resolve(&self, address: &str) -> Result<String, RenderError> {
        Ok(address.to_owned())
    }
}

impl<F> LinkResolver for F
where
    F: Fn(&str) -> Result<String, RenderError>,
{
    fn resolve(&self, address: &str) -> Result<String, RenderError> {
        self(address)
    }
}

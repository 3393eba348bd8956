use crate::request::ActionRequest;
use crate::types::Payload;
use crate::Result;

/// Delivers one [`ActionRequest`] to the host application and returns its
/// raw reply.
///
/// Implementations must return `ActionError::Transport` when the request
/// could not be delivered at all, and a [`Payload::Failure`] when the
/// handler answered with an error.
pub trait Transport: Send + Sync {
    /// Short name used in logs and error messages.
    fn name(&self) -> &'static str;

    fn dispatch(&self, request: &ActionRequest) -> Result<Payload>;

    /// Deliver a caller-built URI verbatim.
    fn dispatch_uri(&self, uri: &str) -> Result<Payload>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn dispatch(&self, request: &ActionRequest) -> Result<Payload> {
        (**self).dispatch(request)
    }

    fn dispatch_uri(&self, uri: &str) -> Result<Payload> {
        (**self).dispatch_uri(uri)
    }
}

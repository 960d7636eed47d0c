//! # Usecases
//!
//! A [`Usecase`] holds business logic. It reads its input from an optional
//! validated [`Request`] and reports its outcome to an optional
//! [`Presenter`], both reached through a [`UsecaseContext`].
//!
//! The [`Interactor`] wires the three together:
//!
//! ```
//! use cleanarch_core::{BadRequestContentError, StatusCode};
//! use cleanarch_usecase::{Interactor, Presenter, Response, ResponsePresenter, UsecaseContext};
//!
//! let greet = |ctx: &mut UsecaseContext<'_>| -> Result<(), BadRequestContentError> {
//!     ctx.present(Response::success(StatusCode::Ok, "hello"));
//!     Ok(())
//! };
//!
//! let mut presenter = ResponsePresenter::new();
//! Interactor::new(greet).with_presenter(&mut presenter).execute()?;
//! assert!(presenter.response().is_some());
//! # Ok::<(), BadRequestContentError>(())
//! ```
//!
//! Errors raised by a usecase propagate unchanged to the caller of
//! [`Interactor::execute`].

use serde::de::DeserializeOwned;
use serde_json::Value;

use cleanarch_core::{BadRequestContentError, Payload};
use cleanarch_request::Request;

use crate::presenter::Presenter;
use crate::response::Response;

/// Business logic executed against a context.
pub trait Usecase {
    /// Run the usecase.
    fn execute(&self, ctx: &mut UsecaseContext<'_>) -> Result<(), BadRequestContentError>;
}

impl<F> Usecase for F
where
    F: Fn(&mut UsecaseContext<'_>) -> Result<(), BadRequestContentError>,
{
    fn execute(&self, ctx: &mut UsecaseContext<'_>) -> Result<(), BadRequestContentError> {
        self(ctx)
    }
}

/// What a usecase can see and reach while executing.
#[derive(Default)]
pub struct UsecaseContext<'a> {
    request: Option<&'a Request>,
    presenter: Option<&'a mut dyn Presenter>,
}

impl<'a> UsecaseContext<'a> {
    /// A context with neither request nor presenter.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_request(mut self, request: &'a Request) -> Self {
        self.request = Some(request);
        self
    }

    pub fn with_presenter(mut self, presenter: &'a mut dyn Presenter) -> Self {
        self.presenter = Some(presenter);
        self
    }

    /// The attached request, if any.
    pub fn request(&self) -> Option<&Request> {
        self.request
    }

    /// A copy of the request payload; empty when no request is attached.
    pub fn request_data(&self) -> Payload {
        self.request
            .map(|request| request.to_payload().clone())
            .unwrap_or_default()
    }

    /// Read a request field by dotted path.
    pub fn field(&self, path: &str) -> Option<&Value> {
        self.request.and_then(|request| request.get(path))
    }

    /// Read a request field by dotted path as `T`.
    pub fn field_as<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        self.request.and_then(|request| request.get_as(path))
    }

    pub fn has_presenter(&self) -> bool {
        self.presenter.is_some()
    }

    /// Hand a response to the presenter. Dropped when none is attached.
    pub fn present(&mut self, response: Response) {
        match self.presenter.as_deref_mut() {
            Some(presenter) => presenter.present(response),
            None => tracing::debug!(
                status_code = %response.status_code(),
                "no presenter attached, response dropped"
            ),
        }
    }
}

/// Binds a usecase to its request and presenter, then runs it.
pub struct Interactor<'a, U> {
    usecase: U,
    context: UsecaseContext<'a>,
}

impl<'a, U: Usecase> Interactor<'a, U> {
    pub fn new(usecase: U) -> Self {
        Self {
            usecase,
            context: UsecaseContext::new(),
        }
    }

    /// Set the request the usecase processes.
    pub fn with_request(mut self, request: &'a Request) -> Self {
        self.context = self.context.with_request(request);
        self
    }

    /// Set the presenter that receives the usecase response.
    pub fn with_presenter(mut self, presenter: &'a mut dyn Presenter) -> Self {
        self.context = self.context.with_presenter(presenter);
        self
    }

    /// Run the usecase.
    pub fn execute(self) -> Result<(), BadRequestContentError> {
        let Self {
            usecase,
            mut context,
        } = self;
        if let Some(request) = context.request() {
            tracing::trace!(request_id = %request.request_id(), "executing usecase");
        }
        usecase.execute(&mut context)
    }
}

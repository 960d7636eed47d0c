//! # cleanarch-usecase: Usecases, Responses and Presenters
//!
//! The outer ring of the workspace. A usecase consumes a validated
//! [`Request`](cleanarch_request::Request), produces a [`Response`], and
//! hands it to a [`Presenter`]; the [`Interactor`] binds the three with
//! `with_request` / `with_presenter` and runs the usecase.
//!
//! Nothing here validates input. Request content errors are raised when the
//! request is built; usecases only propagate the errors they raise
//! themselves.

pub mod presenter;
pub mod response;
pub mod usecase;

pub use presenter::{Presenter, ResponsePresenter};
pub use response::{OutputBody, Response, ResponseOutput};
pub use usecase::{Interactor, Usecase, UsecaseContext};

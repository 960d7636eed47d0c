//! # Presenters
//!
//! A presenter receives the [`Response`] a usecase produces and exposes it
//! to the delivery layer, either as-is or formatted.

use crate::response::{Response, ResponseOutput};

/// Receives usecase responses.
pub trait Presenter {
    /// Called by the usecase to deliver its response.
    fn present(&mut self, response: Response);

    /// The last response delivered, if any.
    fn response(&self) -> Option<&Response>;

    /// The last response rendered through [`Response::output`].
    fn formatted_response(&self) -> Option<ResponseOutput> {
        self.response().map(Response::output)
    }
}

/// Pass-through presenter that keeps the last response.
#[derive(Debug, Clone, Default)]
pub struct ResponsePresenter {
    response: Option<Response>,
}

impl ResponsePresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the stored response, leaving the presenter empty.
    pub fn take_response(&mut self) -> Option<Response> {
        self.response.take()
    }
}

impl Presenter for ResponsePresenter {
    fn present(&mut self, response: Response) {
        self.response = Some(response);
    }

    fn response(&self) -> Option<&Response> {
        self.response.as_ref()
    }
}

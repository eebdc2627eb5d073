//! Aggregation and view-model layer.
//!
//! Turns raw customer lists from a [`CustomerService`](crate::banking::CustomerService)
//! into display-ready page data. Loaders never return errors: failures become
//! [`PageState::Failed`] or a failure [`Notice`].
//!
//! Each loader is one fetch cycle owned by the request that runs it. The
//! result is only ever written into the page being rendered for that request;
//! if the browser goes away, axum drops the handler future and any in-flight
//! calls with it, so a late response has nowhere to land.

pub mod dashboard;
pub mod detail;
pub mod forms;
pub mod join;
pub mod management;
pub mod notice;
pub mod report;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use forms::{FieldError, FormErrors, RegistrationForm, RegistrationMode, UpdateForm};
pub use notice::{Notice, NoticeKind};
pub use state::PageState;

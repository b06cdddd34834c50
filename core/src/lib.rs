//! Request composer core: builds HTTP requests from sparse form fields and
//! normalizes whatever comes back.
//!
//! # Overview
//! `build` turns a method, a URL and `RawFields` into a `RequestDescriptor`
//! without touching the network. `Executor::execute` sends it over a
//! `Transport`, times the exchange and folds the response (or the transport
//! error) into an `ExchangeOutcome`.
//!
//! # Design
//! - Building is pure and infallible; bad URLs fail at the transport.
//! - Any completed response is a success outcome, 2xx or not. Non-JSON
//!   bodies are kept as text.
//! - At most one submission in flight is a caller policy enforced through a
//!   `SubmitSlot`, not a lock inside the core.

pub mod builder;
pub mod draft;
pub mod error;
pub mod executor;
pub mod fields;
pub mod http;
pub mod outcome;
pub mod render;
pub mod submit;
pub mod transport;

pub use builder::build;
pub use draft::RequestDraft;
pub use error::{DraftError, TransportError};
pub use executor::Executor;
pub use fields::{Coercion, FieldName, RawFields, FIELD_TABLE};
pub use http::{HttpMethod, RawResponse, RequestDescriptor};
pub use outcome::{normalize, Exchange, ExchangeOutcome, ExchangeResponse, ResponseData};
pub use submit::{Composer, SubmissionState, SubmitPermit, SubmitSlot};
pub use transport::{Transport, TransportConfig, UreqTransport};

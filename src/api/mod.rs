//! MoneyLover web API
//!
//! Layered bottom-up: [`transport`] moves JSON over HTTP, [`session`] owns the
//! login/refresh lifecycle, and [`client`] exposes the authenticated domain
//! calls on top of both.

pub mod client;
pub mod endpoints;
pub mod envelope;
pub mod session;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use client::MoneyLoverClient;
pub use endpoints::Endpoints;
pub use envelope::{EnvelopeStatus, ResponseEnvelope};
pub use session::{extract_client_id, ExportedSession, Session};
pub use transport::{
    HttpRequest, HttpResponse, HttpSender, ReqwestSender, Transport, TransportConfig,
};

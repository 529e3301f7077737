//! Remote data gateway for the Dompet wallet client.
//!
//! One typed async function per remote operation. The gateway holds no
//! application state: it shapes a request, sends it through the
//! [`dompet_transport::Channel`] and decodes the envelope's `data`. Errors
//! from the channel are returned unchanged, and nothing is retried.

pub mod gateway;
pub mod requests;
pub mod routes;

pub use gateway::Gateway;
pub use requests::Registration;

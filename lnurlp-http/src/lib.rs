#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `reqwest` transport for [`lnurlp`].
//!
//! [`HttpTransport`] implements [`lnurlp::LnurlTransport`] with a per-request
//! timeout, a bounded redirect policy and a response size cap.
//!
//! # Modules
//!
//! - [`constants`] - Defaults applied by [`HttpTransportConfig`]
//! - [`error`] - Construction errors
//! - [`transport`] - The transport itself
//!
//! # Example
//!
//! ```no_run
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use lnurlp::AmountSats;
//! use lnurlp_http::{HttpTransport, HttpTransportConfig};
//!
//! let resolver = HttpTransport::resolver(HttpTransportConfig::default())?;
//! let invoice = resolver
//!     .resolve(Some("alice@pay.example"), AmountSats::new(100)?, None)
//!     .await?;
//! println!("{invoice}");
//! # Ok(())
//! # }
//! ```

pub mod constants;
pub mod error;
pub mod transport;

pub use error::HttpTransportError;
pub use transport::{HttpTransport, HttpTransportConfig};

/// A [`lnurlp::Resolver`] backed by [`HttpTransport`].
pub type HttpResolver = lnurlp::Resolver<HttpTransport>;

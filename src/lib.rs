//! Client for the public `translate_a/single` web endpoint.
//!
//! A call runs four stages in order:
//!
//! - `token`: sign the text into the `tk` parameter
//! - `request`: assemble the query and endpoint URL
//! - `fetch`: GET with bounded retries, fixed delay and cancellation
//! - `decode`: project the positional JSON payload into a [`TranslationResult`]
//!
//! [`Translator`] ties them together.
//!
//! # Example
//!
//! ```rust,no_run
//! use gtranslate::{ClientOptions, Tongue, Translator};
//!
//! # async fn demo() -> Result<(), gtranslate::TranslateError> {
//! let translator = Translator::new(ClientOptions::default())?;
//! let result = translator
//!     .run("Hello World", &Tongue::ENGLISH, &Tongue::CHINESE)
//!     .await?;
//! println!("{} ({})", result.response_text, result.response_tongue);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod fetch;
pub mod request;
pub mod retry;
pub mod token;
pub mod tongue;

pub use client::Translator;
pub use config::ClientOptions;
pub use decode::{SegmentPolicy, TranslationResult};
pub use error::{DecodeError, TranslateError};
pub use request::TranslationRequest;
pub use retry::RetryPolicy;
pub use token::{SeedKey, SigningToken};
pub use tongue::Tongue;
pub use tokio_util::sync::CancellationToken;

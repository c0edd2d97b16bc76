//! Content languages and request-language resolution.
//!
//! - `registry`: the supported languages and which one records are authored in
//! - `language`: validated `Language` type plus `Language::resolve` for
//!   free-form preferences such as `Accept-Language` headers
//!
//! ```rust,ignore
//! use portfolio_backend::i18n::Language;
//!
//! let lang = Language::resolve(Some("en-US,fr;q=0.8"));
//! assert_eq!(lang, Language::ENGLISH);
//! ```

mod language;
mod registry;

pub use language::Language;
pub use registry::{LanguageConfig, LanguageRegistry};

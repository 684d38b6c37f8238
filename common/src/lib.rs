//! Count Vision Common Library
//!
//! CLIとWeb(WASM)で共有される型と表示状態のロジック

pub mod types;
pub mod error;
pub mod normalizer;
pub mod sampler;
pub mod pagination;
pub mod correction;
pub mod api;
pub mod session;
pub mod notice;
pub mod route;

pub use types::{DetectionResult, NormalizedMatch, NormalizedResult, RawMatch};
pub use error::{Error, Result};
pub use normalizer::{display_mode, normalize, normalize_all, MatchDisplay, StaticBase};
pub use sampler::{stable_hash, stable_sample, SampleBounds};
pub use pagination::Paginator;
pub use correction::{CorrectionDrafts, UserCorrections};
pub use api::{CorrectionRequest, Endpoint, LoginRequest, LoginResponse, Method, RegisterRequest};
pub use session::Session;
pub use notice::{Notice, NoticeLevel};
pub use route::Route;

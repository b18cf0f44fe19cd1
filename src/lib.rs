mod allowed_headers;
mod allowed_methods;
pub mod config;
pub mod constants;
mod context;
mod cors;
mod duration;
mod exposed_headers;
mod header_builder;
mod headers;
mod logging;
mod middleware;
mod options;
mod origin;
mod result;
mod util;

pub use allowed_headers::AllowedHeaders;
pub use allowed_methods::AllowedMethods;
pub use config::{ConfigError, ExtraConfig};
pub use context::RequestContext;
pub use cors::Cors;
pub use duration::{DurationError, parse_duration};
pub use exposed_headers::ExposedHeaders;
pub use headers::Headers;
pub use logging::Logger;
pub use middleware::{CorsLayer, CorsService};
pub use options::{CorsOptions, ValidationError};
pub use origin::{Origin, OriginDecision, OriginMatcher, PatternError};
pub use result::{ActualResult, CorsDecision, PreflightResult};
#[doc(hidden)]
pub use util::equals_ignore_case;

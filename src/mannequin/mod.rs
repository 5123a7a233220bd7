pub mod types;
pub mod service;
pub mod resolver;

pub use types::{MannequinIdentity, ReclaimRequest};
pub use service::{IdentityService, ServiceError};
pub use resolver::MannequinResolver;

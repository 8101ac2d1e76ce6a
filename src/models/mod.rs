pub mod error;
pub mod request;
pub mod response;

pub use error::{BAD_REQUEST_PREFIX, ClassifiedError, ErrorKind, SERVER_ERROR_PREFIX};
pub use request::NormalizedRequest;
pub use response::{GreetingResponse, HandlerResult, OutboundResponse};

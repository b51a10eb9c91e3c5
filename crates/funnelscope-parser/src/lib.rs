pub mod countries;
pub mod errors;
pub mod model;
pub mod reader;
pub mod schema;

pub use countries::{
    resolver_for, CountryResolver, ResolverKind, INVALID_COUNTRY, OTHER_COUNTRY, UNKNOWN_COUNTRY,
};
pub use errors::{ParserError, SchemaError};
pub use model::EventRecord;
pub use reader::{events_from_reader, events_from_slice, parse_event_timestamp};
pub use schema::{validate_headers, REQUIRED_COLUMNS};

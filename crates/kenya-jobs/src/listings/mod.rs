pub mod domain;
pub mod extractor;
pub mod sites;

pub use domain::{truncate_description, JobListing, DESCRIPTION_LIMIT, TRUNCATION_MARKER};
pub use extractor::{format_timestamp, ListingExtractor};
pub use sites::{FieldRule, PatternSet, SiteId, SiteRegistry};

//! Directory module - resources, filter matching and result paging.

mod filters;
mod options;
mod pagination;
mod resource;

pub use filters::{FilterParams, ZipIndex};
pub use options::{
    highest_option_in, options_in, tracked_who_options, who_none_index, ALL_INDEX,
    DEFAULT_LANGUAGE, LANGUAGE_OPTIONS, NONE_OPTION, WHAT_OPTIONS, WHO_OPTIONS,
};
pub use pagination::{paginate, split_message, DEFAULT_MAX_MESSAGE_LENGTH, PAGE_SIZE};
pub use resource::{sort_by_level, Level, Resource, ResourceStatus};

pub mod activity_event;
pub mod attribute_filter;
pub mod build_info;
pub mod deadline;
pub mod filter_request;

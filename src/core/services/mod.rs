pub mod event_projector;
pub mod filter_composer;
pub mod lookup_service;
pub mod page_fetcher;
pub mod validator;

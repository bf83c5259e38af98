pub mod event_pages;

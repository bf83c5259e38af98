pub mod cloudtrail_pages;

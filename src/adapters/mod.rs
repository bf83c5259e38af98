pub mod cloudtrail;

//! Service implementations composing the domain seams.

pub mod report_service;

pub use report_service::ReportService;

//! Business logic services for the application layer.

pub mod auth_service;
pub mod report_service;

pub use auth_service::{AuthService, AuthorizationRequest};
pub use report_service::{
    CALL_INFO_KEY, DemoReport, ReportQuery, ReportService, SNP_INFO_KEY, SnpReport,
};

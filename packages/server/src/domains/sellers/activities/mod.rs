pub mod approval;
pub mod request_status;

pub mod hosted_client;
pub mod inference_client;

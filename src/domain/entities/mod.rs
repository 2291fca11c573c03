mod upload_payload;

pub use upload_payload::UploadPayload;

mod fetch_image;
mod upload_image;

pub use fetch_image::FetchImageUseCase;
pub use upload_image::UploadImageUseCase;

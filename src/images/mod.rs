pub mod services;

pub use services::{discard_image, store_image, UploadItem, IMAGE_FIELD};

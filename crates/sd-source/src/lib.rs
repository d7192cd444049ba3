/// Image collaborators for sampledither: grayscale decode, binary PNG encode,
/// and folder scanning for batch runs.

pub mod export;
pub mod folder_batch;
pub mod image;

pub use export::{check_png_path, default_output_path, save_binary};
pub use folder_batch::scan_images;
pub use self::image::{grid_from_image, load_gray};

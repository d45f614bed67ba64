pub mod branding;
pub mod image;
pub mod os_release;
pub mod symlink;

//! Ties the os-release rewrite and the compatibility link to an image root.

use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::branding::Branding;
use crate::os_release;
use crate::symlink::{self, LinkOutcome};

const DESCRIPTOR: &str = "usr/lib/os-release";
const LINK: &str = "etc/os-release";
const LINK_TARGET: &str = "../usr/lib/os-release";

/// Filesystem locations inside an image tree.
#[derive(Debug, Clone)]
pub struct ImageLayout {
    pub root: PathBuf,
}

impl Default for ImageLayout {
    fn default() -> Self {
        Self::new("/")
    }
}

impl ImageLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn descriptor_path(&self) -> PathBuf {
        self.root.join(DESCRIPTOR)
    }

    pub fn link_path(&self) -> PathBuf {
        self.root.join(LINK)
    }

    /// Relative target stored in the link, so it stays valid once the image is booted.
    pub fn link_target(&self) -> &'static Path {
        Path::new(LINK_TARGET)
    }
}

/// Summary of a customization run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub descriptor: PathBuf,
    pub descriptor_found: bool,
    pub replaced: Vec<String>,
    pub link: PathBuf,
    pub link_outcome: LinkOutcome,
    /// PRETTY_NAME read back from the descriptor after the rewrite.
    pub pretty_name: Option<String>,
}

/// Brands os-release under `layout` and restores the compatibility link.
///
/// The rewrite runs first; a failure there aborts before the link is touched.
pub fn customize(layout: &ImageLayout, branding: &Branding) -> Result<Report> {
    let descriptor = layout.descriptor_path();
    let rewrite = os_release::rewrite_file(&descriptor, branding)?;

    let link = layout.link_path();
    let link_outcome = symlink::reconcile_link(&link, layout.link_target())?;

    let pretty_name = match &rewrite {
        Some(_) => {
            let fields = os_release::parse_os_release(&descriptor)?;
            fields.get("PRETTY_NAME").cloned()
        }
        None => None,
    };
    if let Some(name) = &pretty_name {
        tracing::info!(pretty_name = %name, "image identifies as");
    }

    Ok(Report {
        descriptor,
        descriptor_found: rewrite.is_some(),
        replaced: rewrite.map(|r| r.replaced).unwrap_or_default(),
        link,
        link_outcome,
        pretty_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_is_live_root() {
        let layout = ImageLayout::default();
        assert_eq!(layout.descriptor_path(), Path::new("/usr/lib/os-release"));
        assert_eq!(layout.link_path(), Path::new("/etc/os-release"));
    }

    #[test]
    fn link_target_resolves_to_descriptor() {
        let layout = ImageLayout::new("/mnt/image");
        let via_link = layout
            .link_path()
            .parent()
            .unwrap()
            .join(layout.link_target());
        assert_eq!(via_link, Path::new("/mnt/image/etc/../usr/lib/os-release"));
    }
}

//! Utility functions

use std::path::PathBuf;

// Document with a score ring — header logo and window icon
pub const LOGO_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 128 128"><defs><style>.d{fill:#fff;stroke:#09090b;stroke-width:2px}.l{fill:none;stroke:#71717a;stroke-width:6px;stroke-linecap:round}.r{fill:none;stroke:#2dd4bf;stroke-width:10px;stroke-linecap:round}</style></defs><path class="d" d="M22 8h56l28 28v84H22z"/><path class="l" d="M36 40h36M36 56h48M36 72h28"/><circle class="r" cx="86" cy="96" r="22" stroke-dasharray="104 139"/></svg>"##;

/// Rasterize the logo SVG to a square image (header logo and window/taskbar icon).
/// Returns `None` if the SVG cannot be parsed or the size is zero.
pub fn rasterize_logo(size: u32) -> Option<(Vec<u8>, u32, u32)> {
    let tree = resvg::usvg::Tree::from_str(LOGO_SVG, &resvg::usvg::Options::default()).ok()?;
    let scale = size as f32 / tree.size().width();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size, size)?;
    resvg::render(
        &tree,
        resvg::usvg::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Some((premul_to_straight(&pixmap), size, size))
}

fn premul_to_straight(pixmap: &resvg::tiny_skia::Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let a = p.alpha();
            if a == 0 {
                [0, 0, 0, 0]
            } else {
                let r = (p.red() as u16 * 255 / a as u16) as u8;
                let g = (p.green() as u16 * 255 / a as u16) as u8;
                let b = (p.blue() as u16 * 255 / a as u16) as u8;
                [r, g, b, a]
            }
        })
        .collect()
}

/// Get the app data directory path
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(crate::constants::APP_NAME)
}

/// Format bytes into human-readable string (B, KB, MB)
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_sizes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024 + 512 * 1024), "3.5 MB");
    }

    #[test]
    fn logo_rasterizes_square() {
        let (pixels, w, h) = rasterize_logo(64).expect("logo renders");
        assert_eq!((w, h), (64, 64));
        assert_eq!(pixels.len(), 64 * 64 * 4);
        assert!(pixels.chunks(4).any(|p| p[3] > 0));
    }
}

mod app;
mod fetch;
mod panel;
mod scene3d;
mod texture;

use winit::dpi::LogicalSize;

use meridian_engine::device::GpuInit;
use meridian_engine::logging::{init_logging, LoggingConfig};
use meridian_engine::text::{FontId, FontSystem};
use meridian_engine::window::{Runtime, RuntimeConfig};

use app::ViewerApp;

/// Atlas image mapped onto the cube faces. Override with MERIDIAN_TEXTURE
/// (an http(s) URL or a local file path).
const DEFAULT_TEXTURE_URL: &str =
    "https://live.staticflickr.com/65535/49093406911_7d185dba0e_b.jpg";

fn main() {
    init_logging(LoggingConfig::default());

    let texture_source =
        std::env::var("MERIDIAN_TEXTURE").unwrap_or_else(|_| DEFAULT_TEXTURE_URL.to_string());

    let mut fonts = FontSystem::new();
    let panel_font = load_panel_font(&mut fonts);

    let config = RuntimeConfig {
        title: "Meridian".to_string(),
        initial_size: LogicalSize::new(960.0, 564.0),
    };

    let app = ViewerApp::new(fonts, panel_font, texture_source);

    if let Err(e) = Runtime::run(config, GpuInit::default(), app) {
        eprintln!("meridian runtime error: {e:#}");
        std::process::exit(1);
    }
}

fn load_panel_font(fonts: &mut FontSystem) -> Option<FontId> {
    const CANDIDATES: [&str; 5] = [
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    ];

    for path in CANDIDATES {
        let Ok(bytes) = std::fs::read(path) else {
            continue;
        };
        match fonts.load_font(&bytes) {
            Ok(id) => {
                log::debug!("panel font: {path}");
                return Some(id);
            }
            Err(e) => log::warn!("failed to parse font {path}: {e}"),
        }
    }

    log::warn!("no system font found; the control panel will render without labels");
    None
}

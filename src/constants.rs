/// Page contract and render constants.
///
/// The selectors, classes and attributes below are what the page markup and
/// stylesheet agree on; the render values tune the viewer output.
// Heading animator
pub const HEADING_SELECTOR: &str = "h1";
pub const GLYPH_TAG: &str = "span";

// Media popup
pub const MEDIA_SELECTOR: &str = ".grid-item img, .grid-item video";
pub const POPUP_CLASS: &str = "popup-img";
pub const POPUP_ACTIVE_CLASS: &str = "active";
pub const POPUP_ENTER_EVENT: &str = "mouseenter";
pub const POPUP_LEAVE_EVENT: &str = "mouseleave";

// Model viewer
pub const VIEWER_SELECTOR: &str = ".asset-viewer";
pub const MODEL_ATTRIBUTE: &str = "data-model";
pub const VIEWER_CANVAS_STYLE: &str = "display:block;touch-action:none";

// Scene background as authored (sRGB hex)
pub const BACKGROUND_SRGB: u32 = 0x333333;

// Render targets
pub const MSAA_SAMPLES: u32 = 4;
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

/// sRGB-encoded channel in 0..=1 to linear light.
#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// `0xRRGGBB` (sRGB) to a linear clear colour.
pub fn hex_to_linear_rgb(hex: u32) -> [f32; 3] {
    let ch = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
    [ch(16), ch(8), ch(0)]
}

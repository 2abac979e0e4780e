use image::DynamicImage;
use image::imageops::FilterType;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

const UPPER_HALF: &str = "▀";

/// Renders an image into `width` x `height` terminal cells. Each cell carries
/// two vertical pixels: the upper one as foreground of a half block, the
/// lower one as background. Aspect ratio is kept, so the result may use fewer
/// cells than requested.
pub fn halfblock_lines(image: &DynamicImage, width: u16, height: u16) -> Vec<Line<'static>> {
    if width == 0 || height == 0 {
        return Vec::new();
    }
    let scaled = image
        .resize(u32::from(width), u32::from(height) * 2, FilterType::Triangle)
        .to_rgb8();
    let (w, h) = scaled.dimensions();

    let mut lines = Vec::with_capacity(h.div_ceil(2) as usize);
    for y in (0..h).step_by(2) {
        let spans = (0..w)
            .map(|x| {
                let top = scaled.get_pixel(x, y).0;
                let mut style = Style::default().fg(Color::Rgb(top[0], top[1], top[2]));
                if y + 1 < h {
                    let bottom = scaled.get_pixel(x, y + 1).0;
                    style = style.bg(Color::Rgb(bottom[0], bottom[1], bottom[2]));
                }
                Span::styled(UPPER_HALF, style)
            })
            .collect::<Vec<_>>();
        lines.push(Line::from(spans));
    }
    lines
}

use std::io::Cursor;
use std::path::Path;
use ab_glyph::FontArc;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use tokio::fs;
use common::detection::bounding_box::BoundingBox;
use common::detection::class_table::palette_index;
use common::detection::detection_batch::DetectionBatch;
use crate::utils::config::Config;

/// Draws detection outlines and `label: NN.NN%` captions onto an image.
#[derive(Clone)]
pub struct Annotator {
    font: Option<FontArc>,
    font_size: f32,
    border_width: u32,
    palette: Vec<Rgb<u8>>,
    text_color: Rgb<u8>,
}

impl Annotator {
    pub fn new(config: &Config, font: Option<FontArc>) -> Self {
        Self {
            font,
            font_size: config.font_size,
            border_width: config.border_width,
            palette: config.palette.iter().copied().map(Rgb).collect(),
            text_color: Rgb(config.text_color),
        }
    }

    pub async fn load_font<P: AsRef<Path>>(font_path: P) -> Result<FontArc, String> {
        let font_path = font_path.as_ref();
        let font_data = fs::read(font_path).await
            .map_err(|err| format!("Cannot read file {}: {err}", font_path.display()))?;
        FontArc::try_from_vec(font_data)
            .map_err(|err| format!("Unable to parse font data {}: {err}", font_path.display()))
    }

    fn color(&self, class_id: usize) -> Rgb<u8> {
        self.palette.get(palette_index(class_id, self.palette.len()))
            .copied()
            .unwrap_or(Rgb([255, 0, 0]))
    }

    /// Clamps the box to the canvas; `None` when nothing of it is visible.
    fn visible_rect(bounding_box: &BoundingBox, canvas_width: u32, canvas_height: u32) -> Option<Rect> {
        let (width, height) = (f64::from(canvas_width), f64::from(canvas_height));
        if bounding_box.x_max < 0.0 || bounding_box.y_max < 0.0 || bounding_box.x_min > width || bounding_box.y_min > height {
            return None;
        }
        let left = bounding_box.x_min.clamp(0.0, width).round() as u32;
        let top = bounding_box.y_min.clamp(0.0, height).round() as u32;
        let right = bounding_box.x_max.clamp(0.0, width).round() as u32;
        let bottom = bounding_box.y_max.clamp(0.0, height).round() as u32;
        Some(Rect::at(left as i32, top as i32).of_size(right.saturating_sub(left).max(1), bottom.saturating_sub(top).max(1)))
    }

    pub fn annotate(&self, image: &DynamicImage, batch: &DetectionBatch) -> RgbImage {
        let mut canvas = image.to_rgb8();
        let (canvas_width, canvas_height) = canvas.dimensions();
        for detection in batch.iter() {
            let Some(base_rect) = Self::visible_rect(detection.bounding_box, canvas_width, canvas_height) else {
                continue;
            };
            let color = self.color(detection.class_id);
            let (left, top) = (base_rect.left(), base_rect.top());
            for i in 0..self.border_width {
                let offset = i32::try_from(i).unwrap_or(i32::MAX);
                let offset_rect = Rect::at(left.saturating_sub(offset), top.saturating_sub(offset))
                    .of_size(base_rect.width().saturating_add(i.saturating_mul(2)), base_rect.height().saturating_add(i.saturating_mul(2)));
                draw_hollow_rect_mut(&mut canvas, offset_rect, color);
            }
            if let Some(font) = &self.font {
                let text = format!("{}: {:.2}%", detection.label, detection.confidence * 100.0);
                let (text_width, text_height) = text_size(self.font_size, font, &text);
                let border = i32::try_from(self.border_width).unwrap_or(i32::MAX);
                let caption_top = top.saturating_sub(border).saturating_sub(text_height as i32);
                let caption_top = if caption_top < 0 { top } else { caption_top };
                let caption_left = left.saturating_sub(border).saturating_add(1);
                let background = Rect::at(caption_left, caption_top).of_size(text_width.max(1), text_height.max(1));
                draw_filled_rect_mut(&mut canvas, background, color);
                draw_text_mut(&mut canvas, self.text_color, caption_left, caption_top, self.font_size, font, &text);
            }
        }
        canvas
    }

    pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>, String> {
        let mut buffer = Cursor::new(Vec::new());
        image.write_to(&mut buffer, ImageFormat::Png)
            .map_err(|err| err.to_string())?;
        Ok(buffer.into_inner())
    }
}

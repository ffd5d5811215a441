// THEORY:
// Debug overlay drawn into the frame after a pass, before it is handed off for
// encoding. It is purely observational: nothing here feeds back into tracking.

use crate::core_modules::bounding_box::BoundingBox;
use crate::core_modules::frame::FrameView;
use crate::core_modules::pixel::pixel::Rgb;

pub const OVERLAY_COLOR: Rgb = Rgb::GREEN;
const CROSSHAIR_LENGTH: usize = 10;

/// First and last cell of a `length`-cell segment centred on `center`, shifted so it
/// stays inside `0..limit`.
fn clamped_segment(center: usize, length: usize, limit: usize) -> (usize, usize) {
    let start = center
        .saturating_sub(length / 2)
        .min(limit.saturating_sub(length));
    let end = (start + length - 1).min(limit - 1);
    (start, end)
}

/// Draws a 10-pixel horizontal and vertical segment through the box midpoint.
pub fn draw_crosshair(frame: &mut FrameView, bbox: &BoundingBox) {
    let center = bbox.center();
    let (x0, x1) = clamped_segment(center.x, CROSSHAIR_LENGTH, frame.width());
    let (y0, y1) = clamped_segment(center.y, CROSSHAIR_LENGTH, frame.height());
    let cx = center.x.min(frame.width() - 1);
    let cy = center.y.min(frame.height() - 1);

    frame.draw_line((x0, cy), (x1, cy), OVERLAY_COLOR);
    frame.draw_line((cx, y0), (cx, y1), OVERLAY_COLOR);
}

/// Draws both diagonals of the box, marking a track that was found again this frame.
pub fn draw_box_cross(frame: &mut FrameView, bbox: &BoundingBox) {
    let min = bbox.min();
    let max = bbox.max();
    frame.draw_line((min.x, min.y), (max.x, max.y), OVERLAY_COLOR);
    frame.draw_line((min.x, max.y), (max.x, min.y), OVERLAY_COLOR);
}

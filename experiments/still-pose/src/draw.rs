use pose_base::Vec2;
use pose_infer::{GeometryMapper, PoseEstimationOutput};

/// Line colors, cycled per person.
const PALETTE: [[u8; 3]; 6] = [
    [0, 255, 0],
    [0, 255, 255],
    [255, 255, 0],
    [255, 0, 255],
    [255, 128, 0],
    [0, 128, 255],
];

const KEYPOINT_COLOR: [u8; 3] = [255, 255, 255];
const KEYPOINT_RADIUS: i32 = 3;

/// Draw a line using Bresenham's algorithm with clipping
pub fn draw_line(
    buf: &mut [u8],
    width: usize,
    height: usize,
    from: (i32, i32),
    to: (i32, i32),
    color: [u8; 3],
) {
    let ((mut x0, mut y0), (mut x1, mut y1)) = (from, to);

    // Cohen-Sutherland clipping to bounds
    loop {
        let outcode0 = compute_outcode(x0, y0, width as i32, height as i32);
        let outcode1 = compute_outcode(x1, y1, width as i32, height as i32);

        if (outcode0 | outcode1) == 0 {
            break;
        } else if (outcode0 & outcode1) != 0 {
            return;
        } else {
            let outcode = if outcode0 != 0 { outcode0 } else { outcode1 };
            let (x, y) = clip_point(x0, y0, x1, y1, outcode, width as i32, height as i32);

            if outcode == outcode0 {
                x0 = x;
                y0 = y;
            } else {
                x1 = x;
                y1 = y;
            }
        }
    }

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    loop {
        set_pixel(buf, width, x0 as usize, y0 as usize, color);

        if x0 == x1 && y0 == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x0 += sx;
        }
        if e2 < dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Draw a filled circle with clipping
pub fn draw_filled_circle(
    buf: &mut [u8],
    width: usize,
    height: usize,
    center: (i32, i32),
    radius: i32,
    color: [u8; 3],
) {
    let (cx, cy) = center;
    let r2 = radius * radius;

    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= r2 {
                let x = cx + dx;
                let y = cy + dy;
                if x >= 0 && x < width as i32 && y >= 0 && y < height as i32 {
                    set_pixel(buf, width, x as usize, y as usize, color);
                }
            }
        }
    }
}

/// Draw every person's lines and keypoints onto an RGB frame buffer.
///
/// Keypoints are normalized model positions; `geometry` maps them back onto
/// the frame the model input was cropped from.
pub fn draw_pose(
    buf: &mut [u8],
    width: usize,
    height: usize,
    output: &PoseEstimationOutput,
    geometry: &GeometryMapper,
) {
    let to_pixel = |position: Vec2<f32>| {
        let point = geometry.model_to_frame(position);
        (point.x.round() as i32, point.y.round() as i32)
    };

    for (index, human) in output.humans.iter().enumerate() {
        let color = PALETTE[index % PALETTE.len()];
        for line in &human.lines {
            draw_line(
                buf,
                width,
                height,
                to_pixel(line.from.position),
                to_pixel(line.to.position),
                color,
            );
        }
    }

    for keypoint in output.keypoints() {
        draw_filled_circle(
            buf,
            width,
            height,
            to_pixel(keypoint.position),
            KEYPOINT_RADIUS,
            KEYPOINT_COLOR,
        );
    }
}

fn set_pixel(buf: &mut [u8], width: usize, x: usize, y: usize, color: [u8; 3]) {
    let idx = (y * width + x) * 3;
    if let Some(pixel) = buf.get_mut(idx..idx + 3) {
        pixel.copy_from_slice(&color);
    }
}

// Cohen-Sutherland outcodes
const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

fn compute_outcode(x: i32, y: i32, width: i32, height: i32) -> u8 {
    let mut code = INSIDE;
    if x < 0 {
        code |= LEFT;
    } else if x >= width {
        code |= RIGHT;
    }
    if y < 0 {
        code |= TOP;
    } else if y >= height {
        code |= BOTTOM;
    }
    code
}

fn clip_point(
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    outcode: u8,
    width: i32,
    height: i32,
) -> (i32, i32) {
    let dx = x1 - x0;
    let dy = y1 - y0;

    if outcode & TOP != 0 {
        (x0 + dx * (0 - y0) / dy, 0)
    } else if outcode & BOTTOM != 0 {
        (x0 + dx * (height - 1 - y0) / dy, height - 1)
    } else if outcode & LEFT != 0 {
        (0, y0 + dy * (0 - x0) / dx)
    } else {
        (width - 1, y0 + dy * (width - 1 - x0) / dx)
    }
}

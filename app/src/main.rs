/*
 * Copyright (c) Radzivon Bartoshyk. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use alphablur::{shadow_mask, AlphaBoxBlur, AnisotropicRadius, IntRect, Rect};
use image::{GrayImage, Luma, Rgb, RgbImage};
use std::error::Error;
use std::time::Instant;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const SHAPE_COLOR: Rgb<u8> = Rgb([0, 128, 255]);
const SHADOW_COLOR: Rgb<u8> = Rgb([128, 128, 128]);
const SHADOW_OFFSET: (i32, i32) = (5, 5);

/// Coverage of an axis aligned ellipse inscribed into `bounds`, 4x4 supersampled.
fn ellipse_coverage(bounds: &Rect, x: i32, y: i32) -> u8 {
    let cx = bounds.x + bounds.width / 2.;
    let cy = bounds.y + bounds.height / 2.;
    let rx = bounds.width / 2.;
    let ry = bounds.height / 2.;
    let mut inside = 0u32;
    for sy in 0..4 {
        for sx in 0..4 {
            let px = (x as f32 + (sx as f32 + 0.5) / 4. - cx) / rx;
            let py = (y as f32 + (sy as f32 + 0.5) / 4. - cy) / ry;
            if px * px + py * py <= 1. {
                inside += 1;
            }
        }
    }
    (inside * 255 / 16) as u8
}

fn blend(dst: &mut Rgb<u8>, color: Rgb<u8>, coverage: u8) {
    let a = coverage as u32;
    for (d, c) in dst.0.iter_mut().zip(color.0.iter()) {
        *d = ((*d as u32 * (255 - a) + *c as u32 * a + 127) / 255) as u8;
    }
}

/// Blends an alpha mask placed at `origin` over the canvas.
fn mask_onto(canvas: &mut RgbImage, mask: &[u8], stride: usize, origin: IntRect, color: Rgb<u8>) {
    for y in 0..origin.height.max(0) {
        for x in 0..origin.width.max(0) {
            let cx = origin.x + x;
            let cy = origin.y + y;
            if cx < 0 || cy < 0 || cx >= canvas.width() as i32 || cy >= canvas.height() as i32 {
                continue;
            }
            let coverage = mask[y as usize * stride + x as usize];
            blend(canvas.get_pixel_mut(cx as u32, cy as u32), color, coverage);
        }
    }
}

fn ellipse_with_shadow(canvas: &mut RgbImage, bounds: Rect) -> Result<(), Box<dyn Error>> {
    let blur = AlphaBoxBlur::from_radiuses(
        bounds,
        AnisotropicRadius::new(0),
        AnisotropicRadius::new(5),
        None,
        None,
    )?;
    let surface_rect = blur.surface_rect();
    let stride = blur.stride() as usize;
    let mut mask = vec![0u8; blur.surface_allocation_size()];
    for y in 0..surface_rect.height {
        for x in 0..surface_rect.width {
            mask[y as usize * stride + x as usize] =
                ellipse_coverage(&bounds, surface_rect.x + x, surface_rect.y + y);
        }
    }
    let shape = mask.clone();

    let start = Instant::now();
    blur.blur(&mut mask)?;
    log::info!(
        "blurred {:?} surface in {:?}",
        blur.surface_size(),
        start.elapsed()
    );

    let shadow_rect = IntRect::new(
        surface_rect.x + SHADOW_OFFSET.0,
        surface_rect.y + SHADOW_OFFSET.1,
        surface_rect.width,
        surface_rect.height,
    );
    mask_onto(canvas, &mask, stride, shadow_rect, SHADOW_COLOR);
    mask_onto(canvas, &shape, stride, surface_rect, SHAPE_COLOR);
    Ok(())
}

fn bar_with_shadow(canvas: &mut RgbImage, origin: (i32, i32)) -> Result<(), Box<dyn Error>> {
    let bar = GrayImage::from_fn(110, 30, |_, _| Luma([255]));
    let (rect, shadow) =
        shadow_mask(&bar, AnisotropicRadius::new(2), AnisotropicRadius::create(6, 3))?;
    let shadow_rect = IntRect::new(
        origin.0 + rect.x + SHADOW_OFFSET.0,
        origin.1 + rect.y + SHADOW_OFFSET.1,
        rect.width,
        rect.height,
    );
    mask_onto(
        canvas,
        shadow.as_raw(),
        shadow.width() as usize,
        shadow_rect,
        SHADOW_COLOR,
    );
    mask_onto(
        canvas,
        bar.as_raw(),
        bar.width() as usize,
        IntRect::new(origin.0, origin.1, bar.width() as i32, bar.height() as i32),
        SHAPE_COLOR,
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut canvas = RgbImage::from_pixel(410, 100, BACKGROUND);
    bar_with_shadow(&mut canvas, (20, 30))?;
    ellipse_with_shadow(&mut canvas, Rect::new(180.5, 18., 190., 60.))?;

    canvas.save("sample.png")?;
    Ok(())
}

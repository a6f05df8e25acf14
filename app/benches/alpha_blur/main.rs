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
use alphablur::{calculate_blur_radius, AlphaBoxBlur, AnisotropicRadius, Rect};
use criterion::{criterion_group, criterion_main, Criterion};

fn filled_surface(blur: &AlphaBoxBlur) -> Vec<u8> {
    (0..blur.surface_allocation_size())
        .map(|i| ((i * 2654435761usize) >> 11) as u8)
        .collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("alphablur: 3000x1000 radius 5", |b| {
        let blur = AlphaBoxBlur::from_radiuses(
            Rect::new(0., 0., 3000., 1000.),
            AnisotropicRadius::new(0),
            AnisotropicRadius::new(5),
            None,
            None,
        )
        .unwrap();
        let mut data = filled_surface(&blur);
        b.iter(|| {
            blur.blur(&mut data).unwrap();
        })
    });

    c.bench_function("alphablur: 3000x1000 spread 3 radius 5", |b| {
        let blur = AlphaBoxBlur::from_radiuses(
            Rect::new(0., 0., 3000., 1000.),
            AnisotropicRadius::new(3),
            AnisotropicRadius::new(5),
            None,
            None,
        )
        .unwrap();
        let mut data = filled_surface(&blur);
        b.iter(|| {
            blur.blur(&mut data).unwrap();
        })
    });

    c.bench_function("alphablur: 3000x1000 sigma 40", |b| {
        let blur =
            AlphaBoxBlur::from_sigma(Rect::new(0., 0., 3000., 1000.), 3000, 40., 40.).unwrap();
        let mut data = filled_surface(&blur);
        b.iter(|| {
            blur.blur(&mut data).unwrap();
        })
    });

    c.bench_function("alphablur: 3000x1000 radius 5 skip center", |b| {
        let blur = AlphaBoxBlur::from_radiuses(
            Rect::new(0., 0., 3000., 1000.),
            AnisotropicRadius::new(0),
            AnisotropicRadius::new(5),
            None,
            Some(Rect::new(100., 100., 2800., 800.)),
        )
        .unwrap();
        let mut data = filled_surface(&blur);
        b.iter(|| {
            blur.blur(&mut data).unwrap();
        })
    });

    // boxes too large for 32-bit accumulators
    let sigma = 3000.;
    assert!(calculate_blur_radius(sigma, sigma).x_axis > 6200);
    c.bench_function("alphablur: 1000x1000 wide accumulators", |b| {
        let blur =
            AlphaBoxBlur::from_sigma(Rect::new(0., 0., 1000., 1000.), 1000, sigma, sigma).unwrap();
        let mut data = filled_surface(&blur);
        b.iter(|| {
            blur.blur(&mut data).unwrap();
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

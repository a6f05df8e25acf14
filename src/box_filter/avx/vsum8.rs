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
use crate::box_filter::avx::shuffle;
use crate::box_filter::box_blur::column_sum_emit;
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

pub(crate) fn avx_column_sum_emit(
    previous: &[u32],
    next: &[u32],
    dst: &mut [u8],
    working_row: &mut [u32],
    reciprocal: u32,
) {
    unsafe {
        avx_column_sum_emit_impl(previous, next, dst, working_row, reciprocal);
    }
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn mul_hi_epu32(weight: __m256i, v_reciprocal: __m256i) -> __m256i {
    let even = _mm256_mul_epu32(weight, v_reciprocal);
    let odd = _mm256_mul_epu32(_mm256_srli_epi64::<32>(weight), v_reciprocal);
    _mm256_blend_epi32::<0b10101010>(_mm256_srli_epi64::<32>(even), odd)
}

#[target_feature(enable = "avx2")]
unsafe fn avx_column_sum_emit_impl(
    previous: &[u32],
    next: &[u32],
    dst: &mut [u8],
    working_row: &mut [u32],
    reciprocal: u32,
) {
    let v_reciprocal = _mm256_set1_epi32(reciprocal as i32);

    let chunks = dst.chunks_exact(32).len();

    for (((src_previous, src_next), buffer), dst) in previous
        .chunks_exact(32)
        .zip(next.chunks_exact(32))
        .zip(working_row.chunks_exact_mut(32))
        .zip(dst.chunks_exact_mut(32))
    {
        unsafe {
            let mut weight0 = _mm256_loadu_si256(buffer.as_ptr() as *const _);
            let mut weight1 = _mm256_loadu_si256(buffer.get_unchecked(8..).as_ptr() as *const _);
            let mut weight2 = _mm256_loadu_si256(buffer.get_unchecked(16..).as_ptr() as *const _);
            let mut weight3 = _mm256_loadu_si256(buffer.get_unchecked(24..).as_ptr() as *const _);

            let k0 = mul_hi_epu32(weight0, v_reciprocal);
            let k1 = mul_hi_epu32(weight1, v_reciprocal);
            let k2 = mul_hi_epu32(weight2, v_reciprocal);
            let k3 = mul_hi_epu32(weight3, v_reciprocal);

            const MASK: i32 = shuffle(3, 1, 2, 0);

            let r0 = _mm256_permute4x64_epi64::<MASK>(_mm256_packus_epi32(k0, k1));
            let r1 = _mm256_permute4x64_epi64::<MASK>(_mm256_packus_epi32(k2, k3));

            _mm256_storeu_si256(
                dst.as_mut_ptr() as *mut _,
                _mm256_permute4x64_epi64::<MASK>(_mm256_packus_epi16(r0, r1)),
            );

            let previous0 = _mm256_loadu_si256(src_previous.as_ptr() as *const _);
            let previous1 =
                _mm256_loadu_si256(src_previous.get_unchecked(8..).as_ptr() as *const _);
            let previous2 =
                _mm256_loadu_si256(src_previous.get_unchecked(16..).as_ptr() as *const _);
            let previous3 =
                _mm256_loadu_si256(src_previous.get_unchecked(24..).as_ptr() as *const _);

            let next0 = _mm256_loadu_si256(src_next.as_ptr() as *const _);
            let next1 = _mm256_loadu_si256(src_next.get_unchecked(8..).as_ptr() as *const _);
            let next2 = _mm256_loadu_si256(src_next.get_unchecked(16..).as_ptr() as *const _);
            let next3 = _mm256_loadu_si256(src_next.get_unchecked(24..).as_ptr() as *const _);

            weight0 = _mm256_add_epi32(_mm256_sub_epi32(weight0, previous0), next0);
            weight1 = _mm256_add_epi32(_mm256_sub_epi32(weight1, previous1), next1);
            weight2 = _mm256_add_epi32(_mm256_sub_epi32(weight2, previous2), next2);
            weight3 = _mm256_add_epi32(_mm256_sub_epi32(weight3, previous3), next3);

            _mm256_storeu_si256(buffer.as_mut_ptr() as *mut _, weight0);
            _mm256_storeu_si256(
                buffer.get_unchecked_mut(8..).as_mut_ptr() as *mut _,
                weight1,
            );
            _mm256_storeu_si256(
                buffer.get_unchecked_mut(16..).as_mut_ptr() as *mut _,
                weight2,
            );
            _mm256_storeu_si256(
                buffer.get_unchecked_mut(24..).as_mut_ptr() as *mut _,
                weight3,
            );
        }
    }

    let tail = chunks * 32;
    if tail < dst.len() {
        column_sum_emit(
            &previous[tail..],
            &next[tail..],
            &mut dst[tail..],
            &mut working_row[tail..],
            reciprocal,
        );
    }
}
